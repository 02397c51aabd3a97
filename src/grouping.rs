//! Partition of an address list by mail domain.

use std::collections::HashMap;

/// Addresses grouped by the domain found after their last `@`.
///
/// Domains keep their first-seen order and each group keeps the input order
/// of its addresses, so probing order is reproducible from one run to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainGroups {
    groups: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl DomainGroups {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of addresses across every group.
    pub fn address_count(&self) -> usize {
        self.groups.iter().map(|(_, addrs)| addrs.len()).sum()
    }

    pub fn get(&self, domain: &str) -> Option<&[String]> {
        self.index
            .get(domain)
            .map(|&pos| self.groups[pos].1.as_slice())
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(domain, _)| domain.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(domain, addrs)| (domain.as_str(), addrs.as_slice()))
    }

    fn push(&mut self, domain: &str, address: String) {
        match self.index.get(domain) {
            Some(&pos) => self.groups[pos].1.push(address),
            None => {
                self.index.insert(domain.to_string(), self.groups.len());
                self.groups.push((domain.to_string(), vec![address]));
            }
        }
    }
}

/// Returns the part after the last `@`, or an empty string when there is none.
pub fn domain_of(address: &str) -> &str {
    address
        .rfind('@')
        .map(|pos| &address[pos + 1..])
        .unwrap_or("")
}

pub fn group<I, S>(addresses: I) -> DomainGroups
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut groups = DomainGroups::default();
    for address in addresses {
        let address = address.into();
        let domain = domain_of(&address).to_string();
        groups.push(&domain, address);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn domain_uses_last_at_sign() {
        assert_eq!(domain_of("\"a@b\"@example.com"), "example.com");
        assert_eq!(domain_of("user@"), "");
        assert_eq!(domain_of("no-at-sign"), "");
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let groups = group([
            "a@one.test",
            "b@two.test",
            "c@one.test",
            "broken",
            "d@two.test",
        ]);
        let domains: Vec<&str> = groups.domains().collect();
        assert_eq!(domains, vec!["one.test", "two.test", ""]);
        assert_eq!(
            groups.get("one.test").expect("group"),
            &["a@one.test".to_string(), "c@one.test".to_string()]
        );
        assert_eq!(groups.get("").expect("degenerate group"), &["broken".to_string()]);
    }

    #[test]
    fn empty_input_gives_empty_groups() {
        let groups = group(Vec::<String>::new());
        assert!(groups.is_empty());
        assert_eq!(groups.address_count(), 0);
    }

    #[test]
    fn duplicates_stay_in_their_group() {
        let groups = group(["x@dup.test", "x@dup.test"]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.address_count(), 2);
    }

    proptest! {
        #[test]
        fn address_count_is_preserved(input in prop::collection::vec("[a-z@.]{0,12}", 0..64)) {
            let groups = group(input.clone());
            prop_assert_eq!(groups.address_count(), input.len());
            for (domain, addrs) in groups.iter() {
                for addr in addrs {
                    prop_assert_eq!(domain_of(addr), domain);
                }
            }
        }
    }
}
