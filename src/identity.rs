use std::sync::LazyLock;

use regex::Regex;

/// Marker appended to team labels listed with the post-season tournament field.
pub const QUALIFIER_TOKEN: &str = "NCAA";

static QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(QUALIFIER_TOKEN)))
        .expect("qualifier pattern is valid")
});

/// Canonical identity derived from a raw team label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamKey {
    /// Label with the qualifier removed and whitespace collapsed.
    pub key: String,
    /// Whether the raw label carried the qualifier as a whole word.
    pub qualified: bool,
}

/// Derives the canonical key for `team_name`.
///
/// The qualifier only counts as a separate word; a label that merely contains
/// the letters inside a longer word keeps them.
pub fn canonicalize(team_name: &str) -> TeamKey {
    let qualified = QUALIFIER.is_match(team_name);
    let stripped = if qualified {
        QUALIFIER.replace_all(team_name, " ")
    } else {
        team_name.into()
    };
    TeamKey {
        key: stripped.split_whitespace().collect::<Vec<_>>().join(" "),
        qualified,
    }
}
