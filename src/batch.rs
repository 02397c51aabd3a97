//! Bounded-concurrency probing of the addresses of one domain.

use tracing::{debug, info, warn};

use crate::results::ResultSet;
use crate::smtp_verify::{ProbeResult, SmtpProbe, Transport};

pub const DEFAULT_MAX_CONCURRENCY: usize = 32;

/// Probes addresses in consecutive chunks; a chunk fully completes before the
/// next one starts.
#[derive(Debug, Clone)]
pub struct BatchOrchestrator<T> {
    probe: SmtpProbe<T>,
}

impl<T: Transport> BatchOrchestrator<T> {
    pub fn new(probe: SmtpProbe<T>) -> Self {
        Self { probe }
    }

    pub fn probe(&self) -> &SmtpProbe<T> {
        &self.probe
    }

    /// Probe every address against `host:port`.
    ///
    /// `max_concurrency` of zero is treated as one. Results are recorded in
    /// input order after each chunk joins; for a repeated address the first
    /// result is kept.
    pub async fn run(
        &self,
        max_concurrency: usize,
        addresses: &[String],
        host: &str,
        port: u16,
    ) -> ResultSet {
        let chunk_size = max_concurrency.max(1);
        let mut results = ResultSet::new();

        for (n, chunk) in addresses.chunks(chunk_size).enumerate() {
            info!(host, chunk = n, tasks = chunk.len(), "probing chunk");

            let handles: Vec<_> = chunk
                .iter()
                .map(|address| {
                    let probe = self.probe.clone();
                    let address = address.clone();
                    let host = host.to_string();
                    tokio::spawn(async move { probe.probe(&address, &host, port).await })
                })
                .collect();

            let mut outcomes = Vec::with_capacity(handles.len());
            for (address, handle) in chunk.iter().zip(handles) {
                let result = handle.await.unwrap_or_else(|err| {
                    warn!(address = %address, error = %err, "probe task failed");
                    ProbeResult::unreachable()
                });
                outcomes.push((address, result));
            }

            for (address, result) in outcomes {
                if !results.insert_first(address.as_str(), result) {
                    debug!(address = %address, "duplicate address, keeping first result");
                }
            }
        }

        results
    }
}
