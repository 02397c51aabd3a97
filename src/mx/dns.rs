use async_trait::async_trait;
use trust_dns_resolver::TokioAsyncResolver;
use trust_dns_resolver::error::ResolveErrorKind;

use super::resolver::{LookupMx, normalize_exchange};
use super::{Error, MxRecord};

/// [`LookupMx`] backend querying DNS directly with the system resolver configuration.
#[derive(Clone)]
pub struct DnsLookup {
    resolver: TokioAsyncResolver,
}

impl DnsLookup {
    pub fn from_system_conf() -> Result<Self, Error> {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().map_err(Error::lookup)?;
        Ok(Self { resolver })
    }
}

#[async_trait]
impl LookupMx for DnsLookup {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error> {
        let ascii = idna::domain_to_ascii(domain).map_err(Error::idna)?;
        match self.resolver.mx_lookup(ascii.as_str()).await {
            Ok(lookup) => Ok(lookup
                .iter()
                .map(|mx| {
                    MxRecord::new(mx.preference(), normalize_exchange(&mx.exchange().to_utf8()))
                })
                .collect()),
            Err(err) => match err.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => Ok(Vec::new()),
                _ => Err(Error::lookup(err)),
            },
        }
    }
}
