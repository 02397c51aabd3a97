use thiserror::Error;

#[derive(Debug, Error)]
pub enum MxError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("malformed MX query output ({reason}): '{line}'")]
    Parse { line: String, reason: String },
    #[error("no mail exchanger found for '{domain}'")]
    NoRecords { domain: String },
    #[error("MX query for '{domain}' failed: {source}")]
    Query {
        domain: String,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "with-dns")]
    #[error("domain IDNA conversion failed")]
    IdnaConversion {
        #[source]
        source: idna::Errors,
    },
    #[cfg(feature = "with-dns")]
    #[error("MX lookup failed: {source}")]
    Lookup {
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
}

impl MxError {
    pub(crate) fn parse(line: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn no_records(domain: &str) -> Self {
        Self::NoRecords {
            domain: domain.to_string(),
        }
    }

    pub(crate) fn query(domain: &str, source: std::io::Error) -> Self {
        Self::Query {
            domain: domain.to_string(),
            source,
        }
    }

    #[cfg(feature = "with-dns")]
    pub(crate) fn idna(source: idna::Errors) -> Self {
        Self::IdnaConversion { source }
    }

    #[cfg(feature = "with-dns")]
    pub(crate) fn lookup(source: trust_dns_resolver::error::ResolveError) -> Self {
        Self::Lookup { source }
    }
}
