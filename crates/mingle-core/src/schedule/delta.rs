use super::{sq, Schedule};
use crate::core_types::Sex;

impl Schedule {
    /// Exact change in score that swapping the occupants of
    /// `(g1, s1)` and `(g2, s2)` of the given sex on `day` would cause.
    /// Nothing is mutated.
    ///
    /// Only same-sex pairs are scanned: a swap within one sex leaves the
    /// other sex's membership of both groups untouched, so every cross-sex
    /// and other-sex count is unchanged. Both slots must be movable and
    /// `day` must be at least 1; day 0 is never a swap target.
    pub fn contact_delta(
        &self,
        day: usize,
        sex: Sex,
        g1: usize,
        s1: usize,
        g2: usize,
        s2: usize,
    ) -> i64 {
        if g1 == g2 {
            return 0;
        }
        debug_assert!(day >= 1 && day < self.days());
        let plan = self.plan(sex);
        debug_assert!(s1 >= plan.immovable()[g1] && s2 >= plan.immovable()[g2]);

        let p1 = plan.person(day, g1, s1);
        let p2 = plan.person(day, g2, s2);
        let mut delta = 0i64;

        // Contacts p1 loses in g1. The scan includes p1's own slot: that
        // reads the diagonal, which holds the day count and never trips the
        // == 1 test for any day the driver can pick.
        for &q in plan.group(day, g1) {
            debug_assert!(
                self.contacts.get(q, p1) > 0,
                "pair ({q}, {p1}) shares a group but has no recorded contact"
            );
            if self.contacts.get(q, p1) == 1 {
                delta -= 1;
            }
        }
        // Contacts p2 loses in g2.
        for &q in plan.group(day, g2) {
            debug_assert!(
                self.contacts.get(q, p2) > 0,
                "pair ({q}, {p2}) shares a group but has no recorded contact"
            );
            if self.contacts.get(q, p2) == 1 {
                delta -= 1;
            }
        }
        // Contacts p1 gains in g2; p2 is leaving and is not met.
        for (slot, &q) in plan.group(day, g2).iter().enumerate() {
            if slot != s2 && self.contacts.get(q, p1) == 0 {
                delta += 1;
            }
        }
        // Contacts p2 gains in g1.
        for (slot, &q) in plan.group(day, g1).iter().enumerate() {
            if slot != s1 && self.contacts.get(q, p2) == 0 {
                delta += 1;
            }
        }

        delta
    }

    /// Exact change in the repetition penalty the same swap would cause.
    /// Self slots are skipped in every scan so the diagonal cannot leak
    /// into the penalty.
    pub fn penalty_delta(
        &self,
        day: usize,
        sex: Sex,
        g1: usize,
        s1: usize,
        g2: usize,
        s2: usize,
    ) -> i64 {
        if g1 == g2 {
            return 0;
        }
        debug_assert!(day >= 1 && day < self.days());
        let plan = self.plan(sex);

        let p1 = plan.person(day, g1, s1);
        let p2 = plan.person(day, g2, s2);
        let mut delta = 0i64;

        for (slot, &q) in plan.group(day, g1).iter().enumerate() {
            if slot == s1 {
                continue;
            }
            let leaving = self.contacts.get(q, p1);
            if leaving >= 2 {
                delta -= sq(leaving - 1) - sq(leaving - 2);
            }
            let joining = self.contacts.get(q, p2);
            if joining >= 1 {
                delta += sq(joining) - sq(joining - 1);
            }
        }
        for (slot, &q) in plan.group(day, g2).iter().enumerate() {
            if slot == s2 {
                continue;
            }
            let leaving = self.contacts.get(q, p2);
            if leaving >= 2 {
                delta -= sq(leaving - 1) - sq(leaving - 2);
            }
            let joining = self.contacts.get(q, p1);
            if joining >= 1 {
                delta += sq(joining) - sq(joining - 1);
            }
        }

        delta
    }
}
