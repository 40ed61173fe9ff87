use serde::{Deserialize, Serialize};

/// The fixed fleet of stores covered by the aggregate view.
///
/// Series generation itself is string-keyed and tolerates unknown store
/// names (falling back to a default profile), but aggregation and history
/// seeding always run over this fleet.
pub const ALL_STORES: [&str; 3] = ["London", "Copenhagen", "Paris"];

/// Selection unit for KPI and accuracy computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Scope {
    /// A single store, by name.
    Store(String),
    /// The union of all stores.
    All,
}

impl Scope {
    /// Stable string key for this scope, used to seed the accuracy jitter.
    pub fn key(&self) -> &str {
        match self {
            Scope::Store(name) => name.as_str(),
            Scope::All => "ALL",
        }
    }

    /// Parse a scope from its external string form ("ALL" or a store name).
    pub fn parse(raw: &str) -> Scope {
        if raw.eq_ignore_ascii_case("ALL") {
            Scope::All
        } else {
            Scope::Store(raw.to_string())
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Store(name) => write!(f, "{name}"),
            Scope::All => write!(f, "ALL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parse_all_is_case_insensitive() {
        assert_eq!(Scope::parse("ALL"), Scope::All);
        assert_eq!(Scope::parse("all"), Scope::All);
    }

    #[test]
    fn test_scope_parse_store_keeps_name() {
        assert_eq!(Scope::parse("London"), Scope::Store("London".to_string()));
        assert_eq!(Scope::parse("London").key(), "London");
    }

    #[test]
    fn test_all_scope_key() {
        assert_eq!(Scope::All.key(), "ALL");
    }
}
