use crate::consts::{DEFAULT_ITERATIONS, DEFAULT_T_END, DEFAULT_T_START};
use crate::error::{MingleError, MingleResult};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct SolveConfig {
    #[command(flatten)]
    #[serde(default)]
    pub roster: RosterParams,

    #[command(flatten)]
    #[serde(default)]
    pub anneal: AnnealParams,
}

impl SolveConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> MingleResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterParams {
    #[arg(long, default_value_t = 6, help = "Number of groups per day")]
    pub groups: usize,

    #[arg(long, default_value_t = 6, help = "Male slots in every group")]
    pub males_per_group: usize,

    #[arg(long, default_value_t = 6, help = "Female slots in every group")]
    pub females_per_group: usize,

    #[arg(long, default_value_t = 6, help = "Number of schedule days")]
    pub days: usize,

    #[arg(
        long,
        default_value = "",
        help = "Comma-separated immovable male count per group, e.g. 1,0,1,1,1,1"
    )]
    pub immovable_males: String,

    #[arg(
        long,
        default_value = "",
        help = "Comma-separated immovable female count per group"
    )]
    pub immovable_females: String,
}

impl Default for RosterParams {
    fn default() -> Self {
        Self {
            groups: 6,
            males_per_group: 6,
            females_per_group: 6,
            days: 6,
            immovable_males: String::new(),
            immovable_females: String::new(),
        }
    }
}

impl RosterParams {
    pub fn immovable_male_counts(&self) -> MingleResult<Vec<usize>> {
        parse_count_list(&self.immovable_males, self.groups, "immovable-males")
    }

    pub fn immovable_female_counts(&self) -> MingleResult<Vec<usize>> {
        parse_count_list(&self.immovable_females, self.groups, "immovable-females")
    }
}

#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealParams {
    #[arg(long, default_value_t = DEFAULT_ITERATIONS, help = "Annealing iterations")]
    pub iterations: u64,

    #[arg(long, default_value_t = DEFAULT_T_START, help = "Starting temperature")]
    pub t_start: f64,

    #[arg(long, default_value_t = DEFAULT_T_END, help = "End temperature")]
    pub t_end: f64,

    #[arg(
        long,
        default_value_t = 1,
        help = "Independent initializations; the best-scoring start is optimized"
    )]
    pub restarts: usize,

    #[arg(long, value_enum, default_value_t = Algorithm::Anneal)]
    pub algorithm: Algorithm,
}

impl Default for AnnealParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            t_start: DEFAULT_T_START,
            t_end: DEFAULT_T_END,
            restarts: 1,
            algorithm: Algorithm::Anneal,
        }
    }
}

impl AnnealParams {
    pub fn validate(&self) -> MingleResult<()> {
        if self.t_start <= 0.0 || self.t_end <= 0.0 {
            return Err(MingleError::InvalidParams(
                "temperatures must be positive".to_string(),
            ));
        }
        if self.t_end >= self.t_start {
            return Err(MingleError::InvalidParams(format!(
                "t_end ({}) must be below t_start ({})",
                self.t_end, self.t_start
            )));
        }
        if self.restarts == 0 {
            return Err(MingleError::InvalidParams(
                "at least one restart is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Accept a candidate swap only when it does not lose contacts.
    Hillclimb,
    /// Metropolis acceptance under geometric cooling.
    Anneal,
    /// Alternating repetition-penalty and contact phases.
    Combined,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Algorithm::Hillclimb => "hillclimb",
            Algorithm::Anneal => "anneal",
            Algorithm::Combined => "combined",
        })
    }
}

fn parse_count_list(input: &str, groups: usize, option: &'static str) -> MingleResult<Vec<usize>> {
    if input.trim().is_empty() {
        return Ok(vec![0; groups]);
    }
    let counts: Vec<usize> = input
        .split(',')
        .map(|part| {
            part.trim().parse::<usize>().map_err(|_| MingleError::BadCountList {
                option,
                problem: format!("'{part}' is not a count"),
            })
        })
        .collect::<MingleResult<_>>()?;
    if counts.len() != groups {
        return Err(MingleError::BadCountList {
            option,
            problem: format!("lists {} groups, roster has {}", counts.len(), groups),
        });
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_means_no_immovables() {
        let roster = RosterParams::default();
        assert_eq!(roster.immovable_male_counts().unwrap(), vec![0; 6]);
    }

    #[test]
    fn count_list_is_parsed() {
        let roster = RosterParams {
            immovable_males: "1,0,1,1,1,1".to_string(),
            ..Default::default()
        };
        assert_eq!(
            roster.immovable_male_counts().unwrap(),
            vec![1, 0, 1, 1, 1, 1]
        );
    }

    #[test]
    fn wrong_length_is_rejected() {
        let roster = RosterParams {
            immovable_males: "1,2".to_string(),
            ..Default::default()
        };
        assert!(roster.immovable_male_counts().is_err());
    }

    #[test]
    fn garbage_entry_is_rejected() {
        let roster = RosterParams {
            immovable_females: "1,x,0,0,0,0".to_string(),
            ..Default::default()
        };
        assert!(roster.immovable_female_counts().is_err());
    }

    #[test]
    fn anneal_params_validate_temperatures() {
        let mut params = AnnealParams::default();
        assert!(params.validate().is_ok());
        params.t_end = params.t_start;
        assert!(params.validate().is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solve.json");
        let config = SolveConfig::default();
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        let loaded = SolveConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.roster.groups, config.roster.groups);
        assert_eq!(loaded.anneal.iterations, config.anneal.iterations);
    }
}
