use crate::core_types::{PersonId, ScheduleSnapshot};
use crate::schedule::Schedule;
use itertools::Itertools;

/// Recomputes every structural invariant from first principles and lists
/// everything that does not hold: per-day permutations, the canonical day-0
/// ordering, immovable fixity, matrix symmetry and correctness, and the
/// incrementally maintained score and repetition penalty.
pub fn check(schedule: &Schedule) -> Result<(), Vec<String>> {
    let snap = schedule.snapshot();
    let mut problems = Vec::new();

    check_permutations(&snap, &mut problems);
    check_canonical_day_zero(&snap, &mut problems);
    check_immovables(&snap, &mut problems, schedule);
    check_matrix(schedule, &snap, &mut problems);

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

fn check_permutations(snap: &ScheduleSnapshot, problems: &mut Vec<String>) {
    let total_males = snap.total_males() as PersonId;
    let total_people = snap.total_people() as PersonId;
    for day in 0..snap.days {
        let mut males: Vec<PersonId> = snap.male_at[day].iter().flatten().copied().collect();
        males.sort_unstable();
        if males != (0..total_males).collect::<Vec<_>>() {
            problems.push(format!("day {day}: male ids are not a permutation"));
        }
        let mut females: Vec<PersonId> = snap.female_at[day].iter().flatten().copied().collect();
        females.sort_unstable();
        if females != (total_males..total_people).collect::<Vec<_>>() {
            problems.push(format!("day {day}: female ids are not a permutation"));
        }
    }
}

fn check_canonical_day_zero(snap: &ScheduleSnapshot, problems: &mut Vec<String>) {
    if snap.days == 0 {
        return;
    }
    let total_males = snap.total_males() as PersonId;
    for group in 0..snap.groups {
        for slot in 0..snap.males_per_group {
            let want = (slot * snap.groups + group) as PersonId;
            if snap.male_at[0][group][slot] != want {
                problems.push(format!(
                    "day 0 group {group} male slot {slot}: expected id {want}"
                ));
            }
        }
        for slot in 0..snap.females_per_group {
            let want = total_males + (slot * snap.groups + group) as PersonId;
            if snap.female_at[0][group][slot] != want {
                problems.push(format!(
                    "day 0 group {group} female slot {slot}: expected id {want}"
                ));
            }
        }
    }
}

fn check_immovables(snap: &ScheduleSnapshot, problems: &mut Vec<String>, schedule: &Schedule) {
    for day in 1..snap.days {
        for group in 0..snap.groups {
            for slot in 0..schedule.immovable_males()[group] {
                if snap.male_at[day][group][slot] != snap.male_at[0][group][slot] {
                    problems.push(format!(
                        "day {day} group {group}: immovable male slot {slot} moved"
                    ));
                }
            }
            for slot in 0..schedule.immovable_females()[group] {
                if snap.female_at[day][group][slot] != snap.female_at[0][group][slot] {
                    problems.push(format!(
                        "day {day} group {group}: immovable female slot {slot} moved"
                    ));
                }
            }
        }
    }
}

fn check_matrix(schedule: &Schedule, snap: &ScheduleSnapshot, problems: &mut Vec<String>) {
    let total = snap.total_people();
    let mut expected = vec![0u32; total * total];

    for day in 0..snap.days {
        for group in 0..snap.groups {
            let mut members: Vec<PersonId> = snap.male_at[day][group].clone();
            members.extend(&snap.female_at[day][group]);
            for (a, b) in members.iter().copied().tuple_combinations::<(_, _)>() {
                expected[a as usize * total + b as usize] += 1;
                expected[b as usize * total + a as usize] += 1;
            }
        }
    }

    let mut score = 0i64;
    let mut penalty = 0i64;
    for (i, j) in (0..total).tuple_combinations::<(_, _)>() {
        let c = expected[i * total + j];
        if c > 0 {
            score += 1;
        }
        if c > 1 {
            penalty += ((c - 1) as i64) * ((c - 1) as i64);
        }
        if c as usize > snap.days {
            problems.push(format!(
                "pair ({i}, {j}) co-attends {c} times over {} days",
                snap.days
            ));
        }
        let stored = schedule.contact_count(i as PersonId, j as PersonId);
        let mirrored = schedule.contact_count(j as PersonId, i as PersonId);
        if stored != mirrored {
            problems.push(format!(
                "matrix asymmetry for pair ({i}, {j}): {stored} vs {mirrored}"
            ));
        }
        if stored != c {
            problems.push(format!(
                "pair ({i}, {j}): matrix holds {stored}, schedule implies {c}"
            ));
        }
    }

    if score != schedule.score() {
        problems.push(format!(
            "score {} does not match the {score} distinct pairs",
            schedule.score()
        ));
    }
    if penalty != schedule.repetition_penalty() {
        problems.push(format!(
            "repetition penalty {} does not match recomputed {penalty}",
            schedule.repetition_penalty()
        ));
    }
    let cap = (total * total.saturating_sub(1) / 2) as i64;
    if schedule.score() > cap {
        problems.push(format!(
            "score {} exceeds the pair bound {cap}",
            schedule.score()
        ));
    }
}
