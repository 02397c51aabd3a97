use async_trait::async_trait;
use tracing::debug;

use super::{Error, MxRecord};

/// Source of MX records for a domain.
#[async_trait]
pub trait LookupMx: Send + Sync {
    /// Returns the records in the order the backend produced them.
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error>;
}

#[async_trait]
impl<L: LookupMx + ?Sized> LookupMx for Box<L> {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error> {
        (**self).lookup_mx(domain).await
    }
}

/// Resolves a domain to its preferred mail exchanger through a [`LookupMx`] backend.
#[derive(Debug, Clone)]
pub struct MxResolver<L> {
    lookup: L,
}

impl<L: LookupMx> MxResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Lookup every MX record of `domain`. An empty domain fails without
    /// querying the backend.
    pub async fn resolve(&self, domain: &str) -> Result<Vec<MxRecord>, Error> {
        let domain = normalize_domain(domain)?;
        let records = self.lookup.lookup_mx(domain).await?;
        debug!(domain, count = records.len(), "MX records resolved");
        Ok(records)
    }

    /// Resolve `domain` and keep the most preferred exchanger.
    pub async fn preferred(&self, domain: &str) -> Result<MxRecord, Error> {
        let records = self.resolve(domain).await?;
        select_preferred(&records)
            .cloned()
            .ok_or_else(|| Error::no_records(domain))
    }
}

/// Lowest preference wins; on a tie the first record encountered is kept.
pub fn select_preferred(records: &[MxRecord]) -> Option<&MxRecord> {
    records.iter().min_by_key(|record| record.preference)
}

pub(crate) fn normalize_domain(domain: &str) -> Result<&str, Error> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    Ok(trimmed)
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    let trimmed = exchange.trim().trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}
