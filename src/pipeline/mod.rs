//! Top-level run: group addresses by domain, resolve each domain's preferred
//! mail exchanger, probe its addresses and collect one [`ResultSet`].

mod error;

pub use error::PipelineError;

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, warn};

use crate::batch::{BatchOrchestrator, DEFAULT_MAX_CONCURRENCY};
use crate::grouping::{self, DomainGroups};
use crate::mx::{LookupMx, MxResolver};
use crate::report;
use crate::results::ResultSet;
use crate::smtp_verify::{SmtpProbe, Transport};

pub const SMTP_PORT: u16 = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub max_concurrency: usize,
    pub port: u16,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            port: SMTP_PORT,
        }
    }
}

/// What a run produced, for logging by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub addresses: usize,
    pub domains: usize,
    pub domains_skipped: usize,
    pub results: usize,
    pub report: Option<PathBuf>,
}

pub struct Pipeline<L, T> {
    resolver: MxResolver<L>,
    batch: BatchOrchestrator<T>,
    settings: PipelineSettings,
}

impl<L: LookupMx, T: Transport> Pipeline<L, T> {
    pub fn new(lookup: L, probe: SmtpProbe<T>, settings: PipelineSettings) -> Self {
        Self {
            resolver: MxResolver::new(lookup),
            batch: BatchOrchestrator::new(probe),
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Probe every address, domain by domain. Domains whose MX resolution
    /// fails are logged and left out of the results.
    pub async fn check<I, S>(&self, addresses: I) -> ResultSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let groups = grouping::group(addresses);
        self.run(&groups).await.0
    }

    /// Returns the merged results and the number of skipped domains.
    pub async fn run(&self, groups: &DomainGroups) -> (ResultSet, usize) {
        let mut results = ResultSet::new();
        let mut skipped = 0usize;

        for (domain, addresses) in groups.iter() {
            let mx = match self.resolver.preferred(domain).await {
                Ok(mx) => mx,
                Err(err) => {
                    warn!(
                        domain,
                        addresses = addresses.len(),
                        error = %err,
                        "MX resolution failed, skipping domain"
                    );
                    skipped += 1;
                    continue;
                }
            };
            info!(
                domain,
                exchange = %mx.exchange,
                preference = mx.preference,
                addresses = addresses.len(),
                "probing domain"
            );

            let domain_results = self
                .batch
                .run(
                    self.settings.max_concurrency,
                    addresses,
                    &mx.exchange,
                    self.settings.port,
                )
                .await;
            results.merge(domain_results);
        }

        (results, skipped)
    }

    /// Read `input`, probe every address and write the report into
    /// `output_dir`. Nothing is written when no address got a result.
    pub async fn run_job(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<JobSummary, PipelineError> {
        let addresses = read_addresses(input).await?;
        let groups = grouping::group(addresses);
        info!(
            addresses = groups.address_count(),
            domains = groups.len(),
            "address list loaded"
        );

        let (results, domains_skipped) = self.run(&groups).await;

        let report = if results.is_empty() {
            info!("no result to report");
            None
        } else {
            let path = report::write_report(output_dir, &results, Local::now()).await?;
            info!(path = %path.display(), rows = results.len(), "report written");
            Some(path)
        };

        Ok(JobSummary {
            addresses: groups.address_count(),
            domains: groups.len(),
            domains_skipped,
            results: results.len(),
            report,
        })
    }
}

/// One address per line; a leading byte order mark, surrounding whitespace
/// and blank lines are dropped.
pub async fn read_addresses(path: &Path) -> Result<Vec<String>, PipelineError> {
    let content =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PipelineError::ReadInput {
                path: path.to_path_buf(),
                source,
            })?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
