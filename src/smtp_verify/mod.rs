//! SMTP mailbox probing.
//!
//! [`SmtpProbe`] drives a minimal `HELO` / `MAIL FROM` / `RCPT TO` dialogue over
//! a [`Transport`] and classifies the `RCPT TO` reply into a [`Resolution`].
//! No message is ever sent: the dialogue always ends with `QUIT`.

mod error;
mod options;
mod probe;
mod session;
mod types;

pub use error::SmtpVerifyError;
pub use options::ProbeOptions;
pub use probe::SmtpProbe;
pub use session::{Connection, TcpConnection, TcpTransport, Transport};
pub use types::{ProbeResult, Resolution};
