/// Status filter value that lets every record through
pub const STATUS_FILTER_ALL: &str = "all";

/// Pipeline status label counted as completed by the aggregator
pub const STATUS_COMPLETED: &str = "Completed";

/// Pipeline status label counted as in progress by the aggregator
pub const STATUS_IN_PROGRESS: &str = "In Progress";

/// Upper bound of every score and sub-score
pub const MAX_SCORE: u8 = 100;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Runway (in months) at which the financial health suggestion saturates
pub const HEALTHY_RUNWAY_MONTHS: f64 = 24.0;
