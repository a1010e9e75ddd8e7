use crate::config::{Algorithm, SolveConfig};
use crate::consts::{COMBINED_ROUNDS, COMBINED_TEMP_BOOST};
use crate::core_types::SolveReport;
use crate::error::{MingleError, MingleResult};
use crate::schedule::anneal::cooling_factor;
use crate::schedule::Schedule;
use crate::verifier;
use tracing::{debug, info};

pub trait ProgressCallback {
    /// Called at a coarse stride during a run. Return false to stop early.
    fn on_progress(&self, step: u64, score: i64, temp: f64) -> bool;
}

/// Callback that never reports and never stops the run.
pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_progress(&self, _step: u64, _score: i64, _temp: f64) -> bool {
        true
    }
}

/// Owns a full optimization run: best-of-k independent initializations
/// followed by one pass of the configured algorithm, verified before the
/// result is handed out.
pub struct Solver {
    config: SolveConfig,
}

impl Solver {
    pub fn new(config: SolveConfig) -> Self {
        Self { config }
    }

    pub fn run<CB: ProgressCallback>(
        &self,
        seed: Option<u64>,
        callback: CB,
    ) -> MingleResult<SolveReport> {
        let roster = &self.config.roster;
        let params = &self.config.anneal;
        params.validate()?;
        let immovable_males = roster.immovable_male_counts()?;
        let immovable_females = roster.immovable_female_counts()?;

        let mut best: Option<Schedule> = None;
        for attempt in 0..params.restarts {
            let attempt_seed = seed.map(|s| s.wrapping_add(attempt as u64));
            let mut schedule = Schedule::new(
                roster.groups,
                roster.males_per_group,
                roster.females_per_group,
                roster.days,
                attempt_seed,
            )?;
            schedule.set_immovable_males(&immovable_males)?;
            schedule.set_immovable_females(&immovable_females)?;
            debug!(attempt, score = schedule.score(), "initial state");
            if best.as_ref().map_or(true, |b| schedule.score() > b.score()) {
                best = Some(schedule);
            }
        }
        let mut schedule = best.ok_or_else(|| {
            MingleError::InvalidParams("at least one restart is required".to_string())
        })?;

        let initial_score = schedule.score();
        info!(
            initial_score,
            restarts = params.restarts,
            algorithm = ?params.algorithm,
            "optimization start"
        );

        match params.algorithm {
            Algorithm::Hillclimb => run_hillclimb(&mut schedule, params.iterations, &callback),
            Algorithm::Anneal => run_anneal(
                &mut schedule,
                params.iterations,
                params.t_start,
                params.t_end,
                &callback,
            ),
            Algorithm::Combined => run_combined(
                &mut schedule,
                params.iterations,
                params.t_start,
                params.t_end,
                &callback,
            ),
        }

        verifier::check(&schedule)
            .map_err(|problems| MingleError::BrokenInvariants { problems })?;

        info!(final_score = schedule.score(), "optimization done");
        Ok(SolveReport {
            initial_score,
            final_score: schedule.score(),
            final_repetition_penalty: schedule.repetition_penalty(),
            average_contacts: schedule.average_contacts_per_person(),
            iterations: params.iterations,
            restarts: params.restarts,
            schedule: schedule.snapshot(),
        })
    }
}

fn report_stride(iterations: u64) -> u64 {
    (iterations / 100).max(1)
}

/// Applies a candidate swap only when it does not lose contacts.
pub fn run_hillclimb<CB: ProgressCallback>(
    schedule: &mut Schedule,
    iterations: u64,
    callback: &CB,
) {
    let stride = report_stride(iterations);
    for step in 0..iterations {
        schedule.hillclimb_step();
        if step % stride == 0 && !callback.on_progress(step, schedule.score(), 0.0) {
            break;
        }
    }
}

/// Plain simulated annealing under geometric cooling.
pub fn run_anneal<CB: ProgressCallback>(
    schedule: &mut Schedule,
    iterations: u64,
    t_start: f64,
    t_end: f64,
    callback: &CB,
) {
    if iterations == 0 {
        return;
    }
    let lambda = cooling_factor(t_start, t_end, iterations);
    let stride = report_stride(iterations);
    let mut temp = t_start;
    for step in 0..iterations {
        schedule.sa_step(temp);
        temp /= lambda;
        if step % stride == 0 && !callback.on_progress(step, schedule.score(), temp) {
            break;
        }
    }
}

/// Alternating schedule: every round boosts the temperature and spends a
/// tenth of the budget pushing repeats down, then relaxes and spends a tenth
/// on contacts, cooling through the whole of it.
pub fn run_combined<CB: ProgressCallback>(
    schedule: &mut Schedule,
    iterations: u64,
    t_start: f64,
    t_end: f64,
    callback: &CB,
) {
    if iterations == 0 {
        return;
    }
    let lambda = cooling_factor(t_start, t_end, iterations);
    let stride = report_stride(iterations);
    let slice = iterations / COMBINED_ROUNDS;
    let mut temp = t_start;
    let mut step = 0u64;
    for _ in 0..COMBINED_ROUNDS {
        temp *= COMBINED_TEMP_BOOST;
        for _ in 0..slice {
            schedule.sa_penalty_step(temp);
            temp /= lambda;
            step += 1;
            if step % stride == 0 && !callback.on_progress(step, schedule.score(), temp) {
                return;
            }
        }
        temp /= COMBINED_TEMP_BOOST;
        for _ in 0..slice {
            schedule.sa_step(temp);
            temp /= lambda;
            step += 1;
            if step % stride == 0 && !callback.on_progress(step, schedule.score(), temp) {
                return;
            }
        }
    }
}
