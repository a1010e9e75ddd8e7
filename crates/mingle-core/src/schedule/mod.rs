pub mod anneal;
pub mod delta;

use crate::contacts::ContactMatrix;
use crate::core_types::{PersonId, ScheduleSnapshot, Sex};
use crate::error::{MingleError, MingleResult};
use crate::rng::Xorshift128p;
use tracing::debug;

#[inline(always)]
pub(crate) fn sq(x: u32) -> i64 {
    (x as i64) * (x as i64)
}

/// One sex's seating plan: `seats[day][group][slot]` flattened, plus the
/// per-group immovable prefix lengths.
#[derive(Debug, Clone)]
pub(crate) struct SexPlan {
    seats: Vec<PersonId>,
    groups: usize,
    per_group: usize,
    base: PersonId,
    immovable: Vec<usize>,
}

impl SexPlan {
    fn new(groups: usize, per_group: usize, base: PersonId) -> Self {
        Self {
            seats: Vec::new(),
            groups,
            per_group,
            base,
            immovable: vec![0; groups],
        }
    }

    #[inline(always)]
    fn idx(&self, day: usize, group: usize, slot: usize) -> usize {
        (day * self.groups + group) * self.per_group + slot
    }

    #[inline(always)]
    pub(crate) fn person(&self, day: usize, group: usize, slot: usize) -> PersonId {
        self.seats[self.idx(day, group, slot)]
    }

    #[inline(always)]
    fn set(&mut self, day: usize, group: usize, slot: usize, id: PersonId) {
        let idx = self.idx(day, group, slot);
        self.seats[idx] = id;
    }

    /// All slots of one group on one day, in slot order.
    #[inline(always)]
    pub(crate) fn group(&self, day: usize, group: usize) -> &[PersonId] {
        let start = self.idx(day, group, 0);
        &self.seats[start..start + self.per_group]
    }

    pub(crate) fn total(&self) -> usize {
        self.groups * self.per_group
    }

    pub(crate) fn immovable(&self) -> &[usize] {
        &self.immovable
    }

    /// Whether any group still has a swappable slot.
    pub(crate) fn any_movable(&self) -> bool {
        self.immovable.iter().any(|&imm| imm < self.per_group)
    }

    fn locate(&self, day: usize, id: PersonId) -> Option<(usize, usize)> {
        for group in 0..self.groups {
            for slot in 0..self.per_group {
                if self.person(day, group, slot) == id {
                    return Some((group, slot));
                }
            }
        }
        None
    }

    fn swap_slots(&mut self, day: usize, a: (usize, usize), b: (usize, usize)) {
        let ia = self.idx(day, a.0, a.1);
        let ib = self.idx(day, b.0, b.1);
        self.seats.swap(ia, ib);
    }

    /// Fills every day. Day 0 walks slots in the outer loop and groups in
    /// the inner loop, handing out ascending ids; later days get a uniform
    /// random permutation distributed by the same walk.
    fn fill_initial(&mut self, days: usize, rng: &mut fastrand::Rng) {
        let total = self.total();
        self.seats = vec![0; days * total];
        for day in 0..days {
            let mut ids: Vec<PersonId> =
                (0..total as PersonId).map(|i| self.base + i).collect();
            if day > 0 {
                rng.shuffle(&mut ids);
            }
            let mut cursor = 0;
            for slot in 0..self.per_group {
                for group in 0..self.groups {
                    self.set(day, group, slot, ids[cursor]);
                    cursor += 1;
                }
            }
        }
    }
}

/// The mutable optimization state: who is where per day, the co-attendance
/// matrix kept in lock-step, and the current objective values.
///
/// After [`Schedule::initialize`] the state is only ever mutated through the
/// swap applier, which keeps score and matrix consistent with each other.
#[derive(Debug, Clone)]
pub struct Schedule {
    groups: usize,
    males_per_group: usize,
    females_per_group: usize,
    days: usize,

    pub(crate) men: SexPlan,
    pub(crate) women: SexPlan,

    pub(crate) contacts: ContactMatrix,
    pub(crate) score: i64,
    pub(crate) repetition_penalty: i64,

    pub(crate) rng: Xorshift128p,
    shuffle_rng: fastrand::Rng,
}

impl Schedule {
    /// An unsized state. [`Schedule::initialize`] must run before anything
    /// else touches it.
    pub fn empty(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => Xorshift128p::with_seed(s),
            None => Xorshift128p::from_clock(),
        };
        let shuffle_rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s.wrapping_add(9999)),
            None => fastrand::Rng::new(),
        };
        Self {
            groups: 0,
            males_per_group: 0,
            females_per_group: 0,
            days: 0,
            men: SexPlan::new(0, 0, 0),
            women: SexPlan::new(0, 0, 0),
            contacts: ContactMatrix::new(0),
            score: 0,
            repetition_penalty: 0,
            rng,
            shuffle_rng,
        }
    }

    pub fn new(
        groups: usize,
        males_per_group: usize,
        females_per_group: usize,
        days: usize,
        seed: Option<u64>,
    ) -> MingleResult<Self> {
        let mut schedule = Self::empty(seed);
        schedule.initialize(groups, males_per_group, females_per_group, days)?;
        Ok(schedule)
    }

    /// Allocates the plans and matrix, seats everyone (day 0 canonical,
    /// later days random), and computes score and penalty by a full pass.
    /// Any previously configured immovables are discarded.
    pub fn initialize(
        &mut self,
        groups: usize,
        males_per_group: usize,
        females_per_group: usize,
        days: usize,
    ) -> MingleResult<()> {
        if groups == 0 {
            return Err(MingleError::InvalidRoster(
                "at least one group is required".into(),
            ));
        }
        if days == 0 {
            return Err(MingleError::InvalidRoster(
                "at least one day is required".into(),
            ));
        }
        if males_per_group + females_per_group == 0 {
            return Err(MingleError::InvalidRoster("groups cannot be empty".into()));
        }

        self.groups = groups;
        self.males_per_group = males_per_group;
        self.females_per_group = females_per_group;
        self.days = days;

        let total_males = (groups * males_per_group) as PersonId;
        self.men = SexPlan::new(groups, males_per_group, 0);
        self.women = SexPlan::new(groups, females_per_group, total_males);
        self.men.fill_initial(days, &mut self.shuffle_rng);
        self.women.fill_initial(days, &mut self.shuffle_rng);

        self.contacts = ContactMatrix::new(self.total_people());
        self.rebuild_contacts();

        debug!(
            groups,
            males_per_group,
            females_per_group,
            days,
            score = self.score,
            "schedule initialized"
        );
        Ok(())
    }

    pub fn set_immovable_males(&mut self, counts: &[usize]) -> MingleResult<()> {
        self.set_immovables(Sex::Male, counts)
    }

    pub fn set_immovable_females(&mut self, counts: &[usize]) -> MingleResult<()> {
        self.set_immovables(Sex::Female, counts)
    }

    /// Declares the first `counts[g]` slots of every group immovable, then
    /// restores those slots on every later day to their day-0 occupants via
    /// in-day position swaps and recomputes score and matrix.
    fn set_immovables(&mut self, sex: Sex, counts: &[usize]) -> MingleResult<()> {
        self.ensure_initialized()?;
        let days = self.days;
        let plan = match sex {
            Sex::Male => &mut self.men,
            Sex::Female => &mut self.women,
        };
        if counts.len() != plan.groups {
            return Err(MingleError::ImmovableCountMismatch {
                got: counts.len(),
                have: plan.groups,
            });
        }
        if let Some(&bad) = counts.iter().find(|&&c| c > plan.per_group) {
            return Err(MingleError::ImmovableOutOfRange {
                count: bad,
                per_group: plan.per_group,
            });
        }
        plan.immovable = counts.to_vec();

        for day in 1..days {
            for group in 0..plan.groups {
                for slot in 0..plan.immovable[group] {
                    let want = plan.person(0, group, slot);
                    if plan.person(day, group, slot) == want {
                        continue;
                    }
                    // P1 guarantees the id exists somewhere on this day.
                    if let Some(found) = plan.locate(day, want) {
                        plan.swap_slots(day, (group, slot), found);
                    }
                }
            }
        }
        self.rebuild_contacts();
        Ok(())
    }

    /// Full contact pass. Same-sex pairs are visited in ordered fashion and
    /// counted at their `a < b` representative; cross-sex pairs are visited
    /// once and mirrored into both matrix halves on the spot. Together the
    /// two passes fill both halves for every pair, which the swap routines
    /// rely on.
    fn rebuild_contacts(&mut self) {
        let days = self.days;
        let groups = self.groups;
        let Self {
            men,
            women,
            contacts,
            score,
            repetition_penalty,
            ..
        } = self;
        contacts.reset();
        *score = 0;

        for day in 0..days {
            for group in 0..groups {
                let males = men.group(day, group);
                let females = women.group(day, group);

                for &a in males {
                    for &b in males {
                        let fresh = contacts.get(a, b) == 0;
                        contacts.bump_one(a, b);
                        if fresh && a < b {
                            *score += 1;
                        }
                    }
                    for &b in females {
                        if contacts.raise(a, b) == 0 {
                            *score += 1;
                        }
                    }
                }
                for &a in females {
                    for &b in females {
                        let fresh = contacts.get(a, b) == 0;
                        contacts.bump_one(a, b);
                        if fresh && a < b {
                            *score += 1;
                        }
                    }
                }
            }
        }
        *repetition_penalty = contacts.repetition_total();
    }

    fn ensure_initialized(&self) -> MingleResult<()> {
        if self.days == 0 {
            return Err(MingleError::Uninitialized);
        }
        Ok(())
    }

    #[inline(always)]
    pub(crate) fn plan(&self, sex: Sex) -> &SexPlan {
        match sex {
            Sex::Male => &self.men,
            Sex::Female => &self.women,
        }
    }

    pub fn groups(&self) -> usize {
        self.groups
    }

    pub fn males_per_group(&self) -> usize {
        self.males_per_group
    }

    pub fn females_per_group(&self) -> usize {
        self.females_per_group
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn total_people(&self) -> usize {
        self.groups * (self.males_per_group + self.females_per_group)
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn repetition_penalty(&self) -> i64 {
        self.repetition_penalty
    }

    pub fn average_contacts_per_person(&self) -> f32 {
        (self.score as f32 * 2.0) / self.total_people() as f32
    }

    pub fn contact_count(&self, i: PersonId, j: PersonId) -> u32 {
        self.contacts.get(i, j)
    }

    pub fn immovable_males(&self) -> &[usize] {
        self.men.immovable()
    }

    pub fn immovable_females(&self) -> &[usize] {
        self.women.immovable()
    }

    /// Copy-out of the full seating plan.
    pub fn snapshot(&self) -> ScheduleSnapshot {
        let copy_plan = |plan: &SexPlan| -> Vec<Vec<Vec<PersonId>>> {
            (0..self.days)
                .map(|day| {
                    (0..plan.groups)
                        .map(|group| plan.group(day, group).to_vec())
                        .collect()
                })
                .collect()
        };
        ScheduleSnapshot {
            groups: self.groups,
            males_per_group: self.males_per_group,
            females_per_group: self.females_per_group,
            days: self.days,
            male_at: copy_plan(&self.men),
            female_at: copy_plan(&self.women),
        }
    }
}
