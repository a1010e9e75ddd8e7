/// Second word of the xorshift128+ seed. The first word is taken from the
/// wall clock (or a caller-supplied seed), so a fixed non-zero second word
/// guarantees the generator state is never all zero.
pub const PRNG_SEED_WORD_B: u64 = 1_234_124_124;

/// Default starting temperature of the geometric cooling schedule.
pub const DEFAULT_T_START: f64 = 1000.0;

/// Default end temperature of the geometric cooling schedule.
pub const DEFAULT_T_END: f64 = 0.001;

/// Default annealing iteration count.
pub const DEFAULT_ITERATIONS: u64 = 5_000_000;

/// Rounds of the alternating repetition/contacts phases in the combined
/// algorithm.
pub const COMBINED_ROUNDS: u64 = 10;

/// Temperature boost applied to the repetition phase of each combined round.
pub const COMBINED_TEMP_BOOST: f64 = 5.0;
