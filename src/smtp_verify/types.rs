use std::fmt;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Classification of the `RCPT TO` reply for a mailbox.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The server accepted the recipient (2xx).
    Exists,
    /// The server rejected the recipient permanently and said it does not exist.
    NotExists,
    /// Anything else: other replies, timeouts, transport failures.
    Undetermined,
}

impl Resolution {
    /// Classify the raw text read after `RCPT TO`, without trimming it.
    pub fn classify(reply: &str) -> Self {
        if reply.starts_with('2') {
            Self::Exists
        } else if reply.starts_with('5') && reply.contains("exist") {
            Self::NotExists
        } else {
            Self::Undetermined
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exists => "Exists",
            Self::NotExists => "NotExists",
            Self::Undetermined => "Undetermined",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of probing one address.
///
/// An unreachable provider always carries [`Resolution::Undetermined`].
#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    provider_reachable: bool,
    resolution: Resolution,
}

impl ProbeResult {
    pub fn unreachable() -> Self {
        Self {
            provider_reachable: false,
            resolution: Resolution::Undetermined,
        }
    }

    pub fn reachable(resolution: Resolution) -> Self {
        Self {
            provider_reachable: true,
            resolution,
        }
    }

    pub fn provider_reachable(&self) -> bool {
        self.provider_reachable
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }
}
