use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Configuration knobs for [`SmtpProbe`](crate::smtp_verify::SmtpProbe).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    pub helo_domain: String,
    pub mail_from: String,
    /// Bounds establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Read timeout for the greeting, `HELO` and `MAIL FROM` replies.
    pub command_timeout: Duration,
    /// Read timeout for the `RCPT TO` reply.
    pub rcpt_timeout: Duration,
    /// Hard limit on the whole conversation after connecting.
    pub probe_deadline: Duration,
    pub read_greeting: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            helo_domain: "localhost".to_string(),
            mail_from: "TEST@DOMAIN.com".to_string(),
            connect_timeout: Duration::from_secs(10),
            command_timeout: Duration::from_secs(10),
            rcpt_timeout: Duration::from_secs(60),
            probe_deadline: Duration::from_secs(120),
            read_greeting: true,
        }
    }
}

impl ProbeOptions {
    pub fn helo_command(&self) -> String {
        let name = if self.helo_domain.trim().is_empty() {
            "localhost"
        } else {
            self.helo_domain.trim()
        };
        format!("HELO {name}\r\n")
    }

    pub fn mail_from_command(&self) -> String {
        format!("MAIL FROM:<{}>\r\n", self.mail_from)
    }

    pub fn rcpt_command(address: &str) -> String {
        format!("RCPT TO:<{address}>\r\n")
    }
}
