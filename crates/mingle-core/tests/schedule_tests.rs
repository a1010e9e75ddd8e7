mod common;

use common::recount;
use mingle_core::verifier;
use mingle_core::{Schedule, Sex};
use rstest::rstest;

#[rstest]
#[case(2, 2, 0, 2)]
#[case(3, 3, 3, 3)]
#[case(6, 6, 6, 6)]
#[case(4, 1, 2, 5)]
#[case(2, 2, 2, 1)]
fn initialization_satisfies_every_invariant(
    #[case] groups: usize,
    #[case] males: usize,
    #[case] females: usize,
    #[case] days: usize,
) {
    let schedule = Schedule::new(groups, males, females, days, Some(41)).unwrap();
    verifier::check(&schedule).unwrap();
    let (score, penalty) = recount(&schedule.snapshot());
    assert_eq!(score, schedule.score());
    assert_eq!(penalty, schedule.repetition_penalty());
}

#[test]
fn day_zero_is_canonical() {
    let snap = Schedule::new(3, 2, 2, 4, Some(1)).unwrap().snapshot();
    for group in 0..3 {
        for slot in 0..2 {
            assert_eq!(snap.male_at[0][group][slot], (slot * 3 + group) as u32);
            assert_eq!(snap.female_at[0][group][slot], 6 + (slot * 3 + group) as u32);
        }
    }
}

#[test]
fn empty_state_rejects_bad_configuration() {
    assert!(Schedule::empty(Some(1)).set_immovable_females(&[0]).is_err());
    assert!(Schedule::new(0, 2, 2, 2, None).is_err());
    assert!(Schedule::new(2, 0, 0, 2, None).is_err());
    assert!(Schedule::new(2, 2, 2, 0, None).is_err());
}

#[test]
fn tiny_roster_delta_matches_brute_force_everywhere() {
    for seed in 0..32 {
        let schedule = Schedule::new(2, 2, 0, 2, Some(seed)).unwrap();
        let base = schedule.score();
        assert!((2..=4).contains(&base));

        for g1 in 0..2 {
            for s1 in 0..2 {
                for g2 in 0..2 {
                    for s2 in 0..2 {
                        let delta = schedule.contact_delta(1, Sex::Male, g1, s1, g2, s2);
                        let mut moved = schedule.clone();
                        moved.swap(1, Sex::Male, g1, s1, g2, s2);
                        let (after, _) = recount(&moved.snapshot());
                        assert_eq!(
                            delta,
                            after - base,
                            "seed {seed}, swap ({g1},{s1})<->({g2},{s2})"
                        );
                        assert_eq!(moved.score(), after);
                    }
                }
            }
        }
    }
}

#[test]
fn within_group_swap_is_an_objective_noop() {
    let schedule = Schedule::new(3, 3, 3, 3, Some(9)).unwrap();
    assert_eq!(schedule.contact_delta(1, Sex::Female, 2, 0, 2, 2), 0);
    assert_eq!(schedule.penalty_delta(1, Sex::Female, 2, 0, 2, 2), 0);

    let mut moved = schedule.clone();
    moved.swap(1, Sex::Female, 2, 0, 2, 2);
    assert_eq!(moved.score(), schedule.score());
    assert_eq!(moved.repetition_penalty(), schedule.repetition_penalty());

    let total = schedule.total_people() as u32;
    for i in 0..total {
        for j in 0..total {
            assert_eq!(moved.contact_count(i, j), schedule.contact_count(i, j));
        }
    }
    // The two slot positions did exchange occupants.
    assert_eq!(
        moved.snapshot().female_at[1][2][0],
        schedule.snapshot().female_at[1][2][2]
    );
}

#[test]
fn double_swap_restores_everything() {
    let original = Schedule::new(4, 3, 2, 4, Some(77)).unwrap();
    let mut moved = original.clone();
    moved.swap(2, Sex::Male, 0, 1, 3, 2);
    moved.swap(2, Sex::Male, 0, 1, 3, 2);

    assert_eq!(moved.snapshot(), original.snapshot());
    assert_eq!(moved.score(), original.score());
    assert_eq!(moved.repetition_penalty(), original.repetition_penalty());
    let total = original.total_people() as u32;
    for i in 0..total {
        for j in 0..total {
            assert_eq!(moved.contact_count(i, j), original.contact_count(i, j));
        }
    }
}

#[test]
fn single_day_schedule_never_moves() {
    let mut schedule = Schedule::new(3, 2, 2, 1, Some(4)).unwrap();
    let before = schedule.snapshot();
    let score = schedule.score();

    schedule.anneal(1_000);
    for _ in 0..100 {
        schedule.hillclimb_step();
        schedule.sa_penalty_step(10.0);
    }

    assert_eq!(schedule.snapshot(), before);
    assert_eq!(schedule.score(), score);
    verifier::check(&schedule).unwrap();
}

#[test]
fn immovable_prefixes_are_restored_across_days() {
    let mut schedule = Schedule::new(6, 6, 6, 6, Some(123)).unwrap();
    schedule.set_immovable_males(&[1, 0, 1, 1, 1, 1]).unwrap();
    schedule.set_immovable_females(&[0, 1, 0, 0, 0, 0]).unwrap();
    verifier::check(&schedule).unwrap();

    let snap = schedule.snapshot();
    for day in 1..6 {
        assert_eq!(snap.male_at[day][0][0], snap.male_at[0][0][0]);
        assert_eq!(snap.female_at[day][1][0], snap.female_at[0][1][0]);
    }
    let (score, penalty) = recount(&snap);
    assert_eq!(score, schedule.score());
    assert_eq!(penalty, schedule.repetition_penalty());
}

#[test]
fn immovables_survive_annealing() {
    let mut schedule = Schedule::new(6, 6, 6, 6, Some(3)).unwrap();
    schedule.set_immovable_males(&[1, 0, 1, 1, 1, 1]).unwrap();
    schedule.set_immovable_females(&[0, 1, 0, 0, 0, 0]).unwrap();
    schedule.anneal(20_000);
    verifier::check(&schedule).unwrap();
}

#[test]
fn immovable_setter_contract() {
    let mut schedule = Schedule::new(3, 2, 2, 3, Some(1)).unwrap();
    assert!(schedule.set_immovable_males(&[1, 1]).is_err());
    assert!(schedule.set_immovable_males(&[3, 0, 0]).is_err());
    schedule.set_immovable_males(&[2, 0, 1]).unwrap();
    verifier::check(&schedule).unwrap();
}

#[test]
fn fully_frozen_group_is_resampled_not_crashed() {
    let mut schedule = Schedule::new(3, 2, 2, 3, Some(8)).unwrap();
    schedule.set_immovable_males(&[2, 0, 0]).unwrap();
    schedule.anneal(5_000);
    verifier::check(&schedule).unwrap();
}

#[test]
fn all_groups_frozen_skips_the_sex() {
    let mut schedule = Schedule::new(2, 1, 1, 3, Some(8)).unwrap();
    schedule.set_immovable_males(&[1, 1]).unwrap();
    let males_before = schedule.snapshot().male_at.clone();

    schedule.anneal(2_000);

    assert_eq!(schedule.snapshot().male_at, males_before);
    verifier::check(&schedule).unwrap();
}

#[test]
fn roster_without_females_still_optimizes() {
    let mut schedule = Schedule::new(2, 2, 0, 2, Some(21)).unwrap();
    schedule.anneal(1_000);
    verifier::check(&schedule).unwrap();
    assert!(schedule.score() >= 2);
}

#[test]
fn average_contacts_doubles_score_over_headcount() {
    let schedule = Schedule::new(3, 2, 2, 2, Some(6)).unwrap();
    let expected = (schedule.score() as f32 * 2.0) / 12.0;
    assert!((schedule.average_contacts_per_person() - expected).abs() < 1e-6);
}
