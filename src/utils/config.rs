//! Configuration and constants for the CLI.

/// Current summary JSON schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Field aggregated when none is given on the command line
pub const DEFAULT_FIELD_NAME: &str = "power";

/// Number of `_`-separated tokens in a run identifier (`a_b_c_tag_rank`)
pub const RUN_ID_TOKENS: usize = 5;

// File naming
pub const INPUT_EXTENSION: &str = "h5";
pub const OUTPUT_SUFFIX: &str = "_all.vsh5";

// Input node and attribute names
pub const TIME_GROUP: &str = "time";
pub const GLOBAL_LIMITS_GROUP: &str = "globalLimits";
pub const RUN_INFO_GROUP: &str = "runInfo";
pub const TIME_ATTR: &str = "vsTime";
pub const ZBAR_ATTR: &str = "zbarTotal";
pub const LOWER_BOUNDS_ATTR: &str = "vsLowerBounds";
pub const UPPER_BOUNDS_ATTR: &str = "vsUpperBounds";

// Output node names
pub const GRID_SI: &str = "gridZ_SI";
pub const GRID_SCALED: &str = "gridZScaled";
pub const TIME_SERIES_MESH: &str = "timeSeries";
pub const Z_SERIES_MESH: &str = "zSeries";
pub const ENERGY_DATASET: &str = "Energy";
pub const PEAK_POWER_DATASET: &str = "PeakPower";

// Axis labels carried over from the VizSchema layout consumers expect
pub const GRID_SI_LABELS: &str = "ct-z,z";
pub const GRID_SCALED_LABELS: &str = "Z2bar,Zbar";
pub const SERIES_LABEL: &str = "zbar";
pub const ENERGY_LABELS: &str = "zbar, Energy";
