pub const DEFAULT_WINDOW_HOURS: u32 = 12;
// three years
pub const MAX_WINDOW_HOURS: u32 = 26_280;

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const MAX_TIMEOUT_SECS: u64 = 300;

pub const DEFAULT_CHART_WIDTH: u16 = 80;
pub const DEFAULT_CHART_HEIGHT: u16 = 20;
pub const MIN_CHART_WIDTH: u16 = 20;
pub const MAX_CHART_WIDTH: u16 = 400;
pub const MIN_CHART_HEIGHT: u16 = 5;
pub const MAX_CHART_HEIGHT: u16 = 100;
/// Rows kept free below the chart for the statistics box and axis labels.
pub const CHART_RESERVED_ROWS: u16 = 24;

pub const STATS_BOX_WIDTH: usize = 70;

pub const ENV_PREFIX: &str = "SPOT";
pub const LOG_ENV_VAR: &str = "SPOT_LOG";
pub const CONFIG_DIR_NAME: &str = "spot-pricing";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const EMPTY_RESULT_MESSAGE: &str = "No spot price data found for the specified parameters. \
Try adjusting the time window or instance type.";
