use std::str::FromStr;

use halaqa_schema::SchemaEnum;

/// UI tag for a selector in its match-all state.
pub const MATCH_ALL: &str = "all";

/// One filter selector: match everything, or exactly one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection<V> {
    All,
    Only(V),
}

impl<V> Default for Selection<V> {
    fn default() -> Self {
        Self::All
    }
}

impl<V: PartialEq> Selection<V> {
    pub fn admits(&self, value: &V) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<V: FromStr> Selection<V> {
    /// Parses a dropdown tag. `"all"` in any case is the match-all sentinel.
    pub fn parse(tag: &str) -> Result<Self, V::Err> {
        if tag.eq_ignore_ascii_case(MATCH_ALL) {
            Ok(Self::All)
        } else {
            tag.parse().map(Self::Only)
        }
    }
}

/// Dropdown choices for an enumeration selector: the sentinel, then every
/// legal tag in declaration order.
pub fn choices<E: SchemaEnum>() -> Vec<&'static str> {
    std::iter::once(MATCH_ALL).chain(E::VALUES.iter().copied()).collect()
}
