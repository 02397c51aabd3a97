#![forbid(unsafe_code)]
//! bulkcheck_lib — bulk SMTP mailbox probing
//!
//! Addresses are grouped by domain, each domain's preferred mail exchanger is
//! resolved, and every address is checked with a `HELO` / `MAIL FROM` /
//! `RCPT TO` dialogue without sending mail.

pub mod batch;
pub mod grouping;
pub mod mx;
pub mod pipeline;
pub mod report;
pub mod results;
pub mod smtp_verify;

pub use batch::{BatchOrchestrator, DEFAULT_MAX_CONCURRENCY};
pub use grouping::{DomainGroups, domain_of, group};
pub use mx::{Error as MxError, LookupMx, MxRecord, MxResolver, Nslookup};
#[cfg(feature = "with-dns")]
pub use mx::DnsLookup;
pub use pipeline::{JobSummary, Pipeline, PipelineError, PipelineSettings, SMTP_PORT};
pub use results::ResultSet;
pub use smtp_verify::{
    ProbeOptions, ProbeResult, Resolution, SmtpProbe, SmtpVerifyError, TcpTransport, Transport,
};
