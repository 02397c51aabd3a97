use std::collections::HashMap;

use crate::smtp_verify::ProbeResult;

/// Probe results keyed by address, in insertion order.
///
/// Keys are unique: inserting an address that is already present keeps the
/// existing result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    entries: Vec<(String, ProbeResult)>,
    index: HashMap<String, usize>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, address: &str) -> Option<&ProbeResult> {
        self.index.get(address).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.index.contains_key(address)
    }

    /// Returns `false` (and drops `result`) when `address` was already recorded.
    pub fn insert_first(&mut self, address: impl Into<String>, result: ProbeResult) -> bool {
        let address = address.into();
        if self.index.contains_key(&address) {
            return false;
        }
        self.index.insert(address.clone(), self.entries.len());
        self.entries.push((address, result));
        true
    }

    /// Moves every entry of `other` in, first write wins. Returns how many were new.
    pub fn merge(&mut self, other: ResultSet) -> usize {
        other
            .entries
            .into_iter()
            .filter(|(address, result)| self.insert_first(address.clone(), *result))
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProbeResult)> {
        self.entries
            .iter()
            .map(|(address, result)| (address.as_str(), result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smtp_verify::Resolution;

    #[test]
    fn first_write_wins() {
        let mut set = ResultSet::new();
        assert!(set.insert_first("a@x.test", ProbeResult::reachable(Resolution::Exists)));
        assert!(!set.insert_first("a@x.test", ProbeResult::unreachable()));
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get("a@x.test"),
            Some(&ProbeResult::reachable(Resolution::Exists))
        );
    }

    #[test]
    fn merge_keeps_order_and_existing_keys() {
        let mut global = ResultSet::new();
        global.insert_first("a@x.test", ProbeResult::reachable(Resolution::Exists));

        let mut domain = ResultSet::new();
        domain.insert_first("b@y.test", ProbeResult::unreachable());
        domain.insert_first("a@x.test", ProbeResult::reachable(Resolution::NotExists));

        assert_eq!(global.merge(domain), 1);
        let keys: Vec<&str> = global.iter().map(|(address, _)| address).collect();
        assert_eq!(keys, vec!["a@x.test", "b@y.test"]);
        assert_eq!(
            global.get("a@x.test").map(ProbeResult::resolution),
            Some(Resolution::Exists)
        );
    }
}
