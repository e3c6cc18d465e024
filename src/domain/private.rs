//! Private section of the Public Suffix List.
//!
//! The snapshot bundled with `tldextract` covers the ICANN section only. Suffixes
//! run by private operators (`github.io`, `blogspot.com`, `*.compute.amazonaws.com`)
//! are matched here from a bundled copy of the private section.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::to_ascii;

static PRIVATE_SUFFIXES: LazyLock<SuffixRules> =
    LazyLock::new(|| SuffixRules::parse(include_str!("private_suffixes.dat")));

/// Normal, wildcard and exception rules, stored in ASCII form.
#[derive(Debug, Default)]
pub(crate) struct SuffixRules {
    normal: HashSet<String>,
    wildcard: HashSet<String>,
    exception: HashSet<String>,
}

impl SuffixRules {
    /// Parses rules in Public Suffix List format. Only the first word of a line
    /// counts; `//` comments and blank lines are skipped.
    pub(crate) fn parse(list: &str) -> Self {
        let mut rules = Self::default();
        for line in list.lines() {
            let Some(rule) = line.split_whitespace().next() else {
                continue;
            };
            if rule.starts_with("//") {
                continue;
            }
            let (set, name) = if let Some(base) = rule.strip_prefix("*.") {
                (&mut rules.wildcard, base)
            } else if let Some(name) = rule.strip_prefix('!') {
                (&mut rules.exception, name)
            } else {
                (&mut rules.normal, rule)
            };
            if let Ok(ascii) = to_ascii(name) {
                set.insert(ascii);
            }
        }
        rules
    }

    /// Label count of the longest suffix of `host` these rules make public.
    ///
    /// `host` must be in ASCII form. An exception rule wins over a wildcard at
    /// the same name and leaves its parent as the suffix.
    pub(crate) fn suffix_labels(&self, host: &str) -> Option<usize> {
        let parents = host.match_indices('.').map(|(i, _)| &host[i + 1..]);
        for candidate in std::iter::once(host).chain(parents) {
            let labels = candidate.split('.').count();
            if self.exception.contains(candidate) {
                return Some(labels - 1);
            }
            if self.normal.contains(candidate) {
                return Some(labels);
            }
            let parent = candidate.split_once('.').map(|(_, parent)| parent);
            if parent.is_some_and(|parent| self.wildcard.contains(parent)) {
                return Some(labels);
            }
        }
        None
    }
}

/// Label count of the longest private suffix `host` ends with.
pub(crate) fn private_suffix_labels(host: &str) -> Option<usize> {
    PRIVATE_SUFFIXES.suffix_labels(host)
}
