//! Constants used throughout the crate.

/// Default deterministic seed for all RNG streams.
///
/// Same seed + same history = same directive.
/// The value `0x7374616972` is "stair" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x7374616972;

// =============================================================================
// Ability grid
// =============================================================================

/// Lower bound of the ability grid.
pub const GRID_MIN: f64 = -5.0;

/// Upper bound of the ability grid.
pub const GRID_MAX: f64 = 5.0;

/// Number of grid points.
pub const GRID_POINTS: usize = 200;

/// Mass added to every grid point before renormalizing.
///
/// Keeps the posterior well-defined when the likelihood underflows to zero
/// across the whole grid.
pub const POSTERIOR_FLOOR: f64 = 1e-300;

// =============================================================================
// Default session limits
// =============================================================================

/// Number of items administered in a full adaptive VLAT session.
pub const DEFAULT_ITEM_BUDGET: usize = 27;

/// Number of forced-choice trials before a staircase stops.
pub const DEFAULT_TRIAL_LIMIT: usize = 50;

/// Step applied after a correct response (gap shrinks).
pub const DEFAULT_STEP_SMALL: f64 = 0.01;

/// Step applied after an incorrect response (gap grows).
pub const DEFAULT_STEP_LARGE: f64 = 0.03;

/// Lowest value a staircase may take.
pub const DEFAULT_DOMAIN_MIN: f64 = 0.01;

/// Highest value a staircase may take.
pub const DEFAULT_DOMAIN_MAX: f64 = 1.0;

/// Gap at or below which the staircase counts as converged.
pub const DEFAULT_CONVERGENCE_EPSILON: f64 = 0.01;

/// Consecutive converged trials required to stop early.
pub const DEFAULT_CONVERGENCE_WINDOW: usize = 2;

/// Decimal places staircase values are rounded to.
pub const DEFAULT_DECIMALS: u32 = 2;

/// Tolerance for comparing rounded staircase values.
pub const VALUE_TOLERANCE: f64 = 1e-9;

// =============================================================================
// Reference calibration sample
// =============================================================================

/// Ability estimates from the calibration tryout of the item bank.
///
/// The initial prior is the normal density fit (mean and population standard
/// deviation) to these values.
pub const REFERENCE_ABILITY_SAMPLE: [f64; 191] = [
    2.98530963, 2.26547287, 0.47080041, 0.96055864, 0.97129651, 0.85147839,
    0.49167494, 0.32598163, 0.23617328, 0.75140709, 0.4379747, 0.89021346,
    1.95678745, 0.46671114, 0.43121635, 0.48382087, 0.7061291, 0.25740084,
    0.57526741, 0.41269657, 0.44926689, 0.34097188, 0.6853534, 2.06499294,
    0.35356854, 0.5014103, 0.60471721, 0.35648783, 0.55006742, 0.7328309,
    0.58740872, 0.07316467, 0.37773089, 0.25774662, 1.67778516, 0.37425087,
    0.00468991, 0.09117124, -0.072024, 0.27787841, 0.50850991, 0.26712845,
    0.23313045, 0.17836876, -0.06713018, 2.52157004, 0.2163555, 0.19764337,
    0.16053735, 0.01037715, 0.49067257, 0.37890493, 0.14471502, -0.15786205,
    0.37664253, -0.12646154, 1.48456846, 0.11995221, 0.45500459, 0.06510908,
    0.30381369, 0.23628236, -0.0132403, 0.12346196, -0.16156058, -0.11441727,
    -0.09874702, 2.06170801, 0.03819284, -0.33842136, -0.299268, -0.18361791,
    -0.27032307, -0.36719226, -0.63351759, -0.13235381, -0.32526859, -0.75094893,
    2.00068807, -0.21555599, -0.29719866, -0.73570516, -0.96429984, -0.62994905,
    -0.5959251, -0.75414598, -0.91139529, -0.23647941, -1.15477916, 2.13079529,
    -1.19334718, -1.17815316, -0.3703066, -0.86774687, -0.62753559, -1.24836742,
    -0.73756034, -0.57090316, -1.36838053, -1.10974556, 1.79120327, -0.99938515,
    -1.8725358, 2.81432538, 1.95511785, 1.82598207, 1.91495919, 1.64615882,
    1.73761896, 1.74653664, 1.51736399, 1.48752685, 1.97221306, 1.19522668,
    2.34740724, 1.54242075, 1.95637583, 1.65824094, 1.68725777, 1.97725808,
    1.58887618, 1.51179316, 1.44743075, 1.63524539, 1.34980521, 2.94575102,
    1.50590524, 1.58325844, 1.33751502, 0.97699839, 1.17390674, 1.45071628,
    0.89705259, 1.26159178, 1.28050271, 1.2415599, 2.4859962, 1.52956813,
    0.9266179, 1.55897714, 1.66185973, 1.39525797, 1.02554983, 1.56911437,
    1.08589595, 1.2344817, 1.0596063, 2.3289334, 0.9177088, 0.91794547,
    1.03755144, 1.35990785, 1.13449186, 0.97657427, 0.61813711, 0.94747231,
    0.83248912, 1.15351712, 2.19894252, 1.29781779, 1.0320319, 0.95034002,
    1.17618522, 0.97588753, 0.87400339, 1.08163796, 0.94947705, 1.11457895,
    0.63173389, 2.29482725, 0.90212167, 0.87044902, 0.22467558, 0.79733281,
    0.31442579, 0.38325478, 0.70994584, 1.06667696, 0.89253087, 0.34143484,
    2.14695731, 0.84056897, 0.88750332, 1.08639498, 0.88874537, 0.7858341,
    0.7279417, 0.12745017, 0.29013591, 0.4602226, 0.74735825,
];
