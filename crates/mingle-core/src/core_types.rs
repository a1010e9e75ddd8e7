use serde::{Deserialize, Serialize};

/// Stable person identifier. Males occupy `0..total_males`, females
/// `total_males..total_people`. Ids never change for the lifetime of a
/// schedule.
pub type PersonId = u32;

/// Which of the two seating rosters a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// Copy-out of a full seating plan: `male_at[day][group][slot]` holds the id
/// seated there, analogously for `female_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    pub groups: usize,
    pub males_per_group: usize,
    pub females_per_group: usize,
    pub days: usize,
    pub male_at: Vec<Vec<Vec<PersonId>>>,
    pub female_at: Vec<Vec<Vec<PersonId>>>,
}

impl ScheduleSnapshot {
    pub fn total_people(&self) -> usize {
        self.groups * (self.males_per_group + self.females_per_group)
    }

    pub fn total_males(&self) -> usize {
        self.groups * self.males_per_group
    }
}

/// Outcome of a full solver run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub initial_score: i64,
    pub final_score: i64,
    pub final_repetition_penalty: i64,
    pub average_contacts: f32,
    pub iterations: u64,
    pub restarts: usize,
    pub schedule: ScheduleSnapshot,
}
