use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmtpVerifyError {
    #[error("connection to {host}:{port} failed: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("connection to {host}:{port} timed out after {after:?}")]
    ConnectTimeout {
        host: String,
        port: u16,
        after: Duration,
    },
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
    #[error("probe exceeded its {0:?} deadline")]
    Deadline(Duration),
}

impl SmtpVerifyError {
    pub fn connect(host: &str, port: u16, source: std::io::Error) -> Self {
        Self::Connect {
            host: host.to_string(),
            port,
            source,
        }
    }

    pub fn io(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}
