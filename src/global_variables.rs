// Server address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

// Light timer interval bounds (milliseconds)
pub const DEFAULT_LIGHT_MIN_INTERVAL_MS: u64 = 500;
pub const DEFAULT_LIGHT_MAX_INTERVAL_MS: u64 = 2000;

// Environment variable names
pub const ENV_BIND_ADDR: &str = "TRAFFIC_LIGHT_ADDR";
pub const ENV_SERVER_URL: &str = "TRAFFIC_LIGHT_URL";
pub const ENV_LIGHT_MIN_INTERVAL_MS: &str = "LIGHT_MIN_INTERVAL_MS";
pub const ENV_LIGHT_MAX_INTERVAL_MS: &str = "LIGHT_MAX_INTERVAL_MS";
pub const ENV_JOURNAL_PATH: &str = "TRAFFIC_JOURNAL";

// Endpoint paths
pub const ROUTE_UNIQUE_ID: &str = "/getUniqueId";
pub const ROUTE_LIGHT_STATE: &str = "/getLightState";
pub const ROUTE_QUEUE: &str = "/queue";
pub const ROUTE_FIRST_IN_LINE: &str = "/isFirstInLine";
pub const ROUTE_PASS: &str = "/pass";

// Car client pause after a transport failure before starting over
pub const CLIENT_RESTART_DELAY_MS: u64 = 2000;
