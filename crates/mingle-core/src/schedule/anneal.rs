use super::{sq, Schedule};
use crate::consts::{DEFAULT_T_END, DEFAULT_T_START};
use crate::core_types::Sex;
use crate::rng::Xorshift128p;

/// Geometric cooling factor: temperature is divided by this after every
/// iteration, so it decays from `t_start` to `t_end` over the run.
pub fn cooling_factor(t_start: f64, t_end: f64, iterations: u64) -> f64 {
    (t_start / t_end).powf(1.0 / iterations as f64)
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Objective {
    Contacts,
    Repetition,
}

impl Schedule {
    /// Physically exchanges the two occupants and, for cross-group swaps,
    /// replays on the matrix, the score and the repetition penalty exactly
    /// the changes the delta evaluators predicted.
    pub fn swap(&mut self, day: usize, sex: Sex, g1: usize, s1: usize, g2: usize, s2: usize) {
        let Self {
            men,
            women,
            contacts,
            score,
            repetition_penalty,
            ..
        } = self;
        let plan = match sex {
            Sex::Male => men,
            Sex::Female => women,
        };

        let p1 = plan.person(day, g1, s1);
        let p2 = plan.person(day, g2, s2);
        plan.set(day, g2, s2, p1);
        plan.set(day, g1, s1, p2);

        // A within-group swap only exchanges slot positions.
        if g1 == g2 {
            return;
        }

        // Losses of p1 against its old groupmates. Slot s1 now holds p2 and
        // is skipped; the pair (p1, p2) is in no group on this day.
        for (slot, &q) in plan.group(day, g1).iter().enumerate() {
            if slot == s1 {
                continue;
            }
            let before = contacts.lower(q, p1);
            if before == 1 {
                *score -= 1;
            } else {
                *repetition_penalty -= sq(before - 1) - sq(before - 2);
            }
        }
        // Losses of p2 against its old groupmates.
        for (slot, &q) in plan.group(day, g2).iter().enumerate() {
            if slot == s2 {
                continue;
            }
            let before = contacts.lower(q, p2);
            if before == 1 {
                *score -= 1;
            } else {
                *repetition_penalty -= sq(before - 1) - sq(before - 2);
            }
        }
        // Gains of p1 among its new groupmates.
        for (slot, &q) in plan.group(day, g2).iter().enumerate() {
            if slot == s2 {
                continue;
            }
            let before = contacts.raise(q, p1);
            if before == 0 {
                *score += 1;
            } else {
                *repetition_penalty += sq(before) - sq(before - 1);
            }
        }
        // Gains of p2 among its new groupmates.
        for (slot, &q) in plan.group(day, g1).iter().enumerate() {
            if slot == s1 {
                continue;
            }
            let before = contacts.raise(q, p2);
            if before == 0 {
                *score += 1;
            } else {
                *repetition_penalty += sq(before) - sq(before - 1);
            }
        }
    }

    /// One annealing iteration: a male and a female candidate move on the
    /// same randomly drawn day, each accepted by the Metropolis rule. Day 0
    /// keeps the canonical ordering and is never drawn; with a single day
    /// there is nothing to draw at all.
    pub fn sa_step(&mut self, temp: f64) {
        if self.days < 2 {
            return;
        }
        let day = (self.rng.below((self.days - 1) as u64) + 1) as usize;
        self.metropolis_move(day, Sex::Male, temp, Objective::Contacts);
        self.metropolis_move(day, Sex::Female, temp, Objective::Contacts);
    }

    /// Like [`Schedule::sa_step`] but optimizing the repetition penalty
    /// downward instead of the contact count upward.
    pub fn sa_penalty_step(&mut self, temp: f64) {
        if self.days < 2 {
            return;
        }
        let day = (self.rng.below((self.days - 1) as u64) + 1) as usize;
        self.metropolis_move(day, Sex::Male, temp, Objective::Repetition);
        self.metropolis_move(day, Sex::Female, temp, Objective::Repetition);
    }

    /// One hill-climbing iteration: a male and a female candidate, each on
    /// its own random day, applied only when no contacts are lost.
    pub fn hillclimb_step(&mut self) {
        if self.days < 2 {
            return;
        }
        self.hillclimb_move(Sex::Male);
        self.hillclimb_move(Sex::Female);
    }

    fn hillclimb_move(&mut self, sex: Sex) {
        let day = (self.rng.below((self.days - 1) as u64) + 1) as usize;
        let Some((g1, g2, s1, s2)) = self.draw_candidate(sex) else {
            return;
        };
        if self.contact_delta(day, sex, g1, s1, g2, s2) >= 0 {
            self.swap(day, sex, g1, s1, g2, s2);
        }
    }

    fn metropolis_move(&mut self, day: usize, sex: Sex, temp: f64, objective: Objective) {
        let Some((g1, g2, s1, s2)) = self.draw_candidate(sex) else {
            return;
        };
        let delta = match objective {
            Objective::Contacts => self.contact_delta(day, sex, g1, s1, g2, s2),
            Objective::Repetition => -self.penalty_delta(day, sex, g1, s1, g2, s2),
        };
        // Only a worsening move draws the acceptance uniform; the random
        // stream is part of the reproducibility contract.
        if delta >= 0 {
            self.swap(day, sex, g1, s1, g2, s2);
        } else if self.rng.next_unit() < (delta as f64 / temp).exp() {
            self.swap(day, sex, g1, s1, g2, s2);
        }
    }

    /// Draws `(g1, g2, s1, s2)` for one sex. Groups whose slots are all
    /// immovable are redrawn; a sex with no movable slot anywhere (or no
    /// slots at all) yields no candidate.
    fn draw_candidate(&mut self, sex: Sex) -> Option<(usize, usize, usize, usize)> {
        let Self {
            men, women, rng, ..
        } = self;
        let plan = match sex {
            Sex::Male => &*men,
            Sex::Female => &*women,
        };
        if plan.per_group == 0 || !plan.any_movable() {
            return None;
        }
        let groups = plan.groups as u64;
        let movable_group = |rng: &mut Xorshift128p| loop {
            let g = rng.below(groups) as usize;
            if plan.immovable[g] < plan.per_group {
                break g;
            }
        };
        let g1 = movable_group(rng);
        let g2 = movable_group(rng);
        let s1 =
            plan.immovable[g1] + rng.below((plan.per_group - plan.immovable[g1]) as u64) as usize;
        let s2 =
            plan.immovable[g2] + rng.below((plan.per_group - plan.immovable[g2]) as u64) as usize;
        Some((g1, g2, s1, s2))
    }

    /// Runs `iterations` annealing steps under the default cooling schedule.
    pub fn anneal(&mut self, iterations: u64) {
        self.anneal_between(iterations, DEFAULT_T_START, DEFAULT_T_END);
    }

    /// Runs `iterations` annealing steps, cooling geometrically from
    /// `t_start` to `t_end`.
    pub fn anneal_between(&mut self, iterations: u64, t_start: f64, t_end: f64) {
        if iterations == 0 {
            return;
        }
        let lambda = cooling_factor(t_start, t_end, iterations);
        let mut temp = t_start;
        for _ in 0..iterations {
            self.sa_step(temp);
            temp /= lambda;
        }
    }
}
