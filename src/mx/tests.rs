use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Error, LookupMx, MxRecord, MxResolver, select_preferred};

/// Scripted [`LookupMx`] backend: unknown domains fail with a parse error.
#[derive(Default)]
pub(crate) struct StubLookup {
    records: HashMap<String, Vec<MxRecord>>,
    calls: Mutex<Vec<String>>,
}

impl StubLookup {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, domain: &str, records: Vec<MxRecord>) -> Self {
        self.records.insert(domain.to_string(), records);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl LookupMx for StubLookup {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(domain.to_string());
        self.records
            .get(domain)
            .cloned()
            .ok_or_else(|| Error::parse("", format!("no scripted answer for {domain}")))
    }
}

#[test]
fn select_lowest_preference_first_on_tie() {
    let records = vec![
        MxRecord::new(20, "mx2"),
        MxRecord::new(10, "mx1"),
        MxRecord::new(10, "mx3"),
    ];
    let best = select_preferred(&records).expect("non-empty");
    assert_eq!(best.exchange, "mx1");
}

#[test]
fn select_on_empty_is_none() {
    assert!(select_preferred(&[]).is_none());
}

#[tokio::test]
async fn preferred_picks_lowest_preference() {
    let resolver = MxResolver::new(StubLookup::new().with(
        "example.com",
        vec![
            MxRecord::new(30, "mx3.example.com"),
            MxRecord::new(10, "mx1.example.com"),
        ],
    ));
    let best = resolver.preferred("example.com").await.expect("resolve");
    assert_eq!(best, MxRecord::new(10, "mx1.example.com"));
}

#[tokio::test]
async fn preferred_fails_without_records() {
    let resolver = MxResolver::new(StubLookup::new().with("example.com", Vec::new()));
    let err = resolver
        .preferred("example.com")
        .await
        .expect_err("no records");
    assert!(matches!(err, Error::NoRecords { ref domain } if domain == "example.com"));
}

#[tokio::test]
async fn empty_domain_fails_without_lookup() {
    let resolver = MxResolver::new(StubLookup::new());
    let err = resolver.preferred("").await.expect_err("empty domain");
    assert!(matches!(err, Error::EmptyDomain));
    assert!(resolver.lookup().calls().is_empty());
}

#[tokio::test]
async fn backend_errors_are_returned() {
    let resolver = MxResolver::new(StubLookup::new());
    let err = resolver
        .resolve("unknown.test")
        .await
        .expect_err("unscripted");
    assert!(matches!(err, Error::Parse { .. }));
    assert_eq!(resolver.lookup().calls(), vec!["unknown.test".to_string()]);
}

#[tokio::test]
async fn nslookup_spawn_failure_is_query_error() {
    let lookup = super::Nslookup::with_program("/nonexistent/bulkcheck-nslookup");
    let err = lookup
        .lookup_mx("example.com")
        .await
        .expect_err("missing program");
    assert!(matches!(err, Error::Query { .. }));
}
