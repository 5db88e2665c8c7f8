//! Maps free-text and abbreviated university names to the canonical names
//! used as lookup keys in the requirement store.

/// Canonical names for the universities with known aliases.
pub const BERKELEY: &str = "University of California, Berkeley";
pub const MIT: &str = "Massachusetts Institute of Technology (MIT)";
pub const STANFORD: &str = "Stanford University";
pub const HARVARD: &str = "Harvard University";
pub const OXFORD: &str = "University of Oxford";
pub const CAMBRIDGE: &str = "University of Cambridge";

/// One alias rule: an optional exact token plus substrings, any of which
/// maps the input to `canonical`.
struct AliasRule {
    canonical: &'static str,
    exact: Option<&'static str>,
    substrings: &'static [&'static str],
}

impl AliasRule {
    fn matches(&self, lower: &str) -> bool {
        self.exact == Some(lower) || self.substrings.iter().any(|pattern| lower.contains(pattern))
    }
}

/// Ordered alias table. First matching rule wins; precedence is part of the
/// contract (Berkeley, MIT, Stanford, Harvard, Oxford, Cambridge).
const ALIAS_TABLE: &[AliasRule] = &[
    AliasRule {
        canonical: BERKELEY,
        exact: None,
        substrings: &["berkeley"],
    },
    AliasRule {
        canonical: MIT,
        exact: Some("mit"),
        substrings: &["massachusetts"],
    },
    AliasRule {
        canonical: STANFORD,
        exact: None,
        substrings: &["stanford"],
    },
    AliasRule {
        canonical: HARVARD,
        exact: None,
        substrings: &["harvard"],
    },
    AliasRule {
        canonical: OXFORD,
        exact: None,
        substrings: &["oxford"],
    },
    AliasRule {
        canonical: CAMBRIDGE,
        exact: None,
        substrings: &["cambridge"],
    },
];

/// Normalize a raw university name to its canonical form.
///
/// Case-insensitive, total over all strings; unmatched input is returned
/// unchanged.
pub fn normalize_university_name(raw: &str) -> String {
    let lower = raw.to_lowercase();
    ALIAS_TABLE
        .iter()
        .find(|rule| rule.matches(&lower))
        .map(|rule| rule.canonical.to_string())
        .unwrap_or_else(|| raw.to_string())
}
