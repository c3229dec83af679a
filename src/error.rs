use std::io;

/// Bad or unparsable configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("light interval bounds invalid: min {min_ms} ms, max {max_ms} ms")]
    InvalidLightInterval { min_ms: u64, max_ms: u64 },
}

/// Errors from starting or running the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("bind failed on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("serve error: {0}")]
    Serve(#[source] io::Error),
}

/// Errors a car sees when talking to the traffic light over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to traffic light failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("traffic light answered {status} on {route}")]
    Status {
        route: &'static str,
        status: reqwest::StatusCode,
    },
}

/// Errors reading or writing the pass outcome journal.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("journal I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("journal CSV error: {0}")]
    Csv(#[from] csv::Error),
}
