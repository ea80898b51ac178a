//! Record types and list wiring for each page.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key `{0}`")]
pub struct UnknownSortKey(pub String);

/// Declares a page's closed set of sort keys and their UI tags.
macro_rules! sort_keys {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            pub const TAGS: &'static [&'static str] = &[$($tag),+];

            pub const fn tag(self) -> &'static str {
                match self {
                    $( Self::$variant => $tag, )+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::pages::UnknownSortKey;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $tag => Ok(Self::$variant), )+
                    other => Err($crate::pages::UnknownSortKey(other.to_owned())),
                }
            }
        }
    };
}

pub mod courses;
pub mod events;
pub mod forum;
pub mod inbox;
pub mod marketplace;
pub mod names;

/// Store counters are signed; page counters are not.
pub(crate) fn counter(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_clamps() {
        assert_eq!(counter(-3), 0);
        assert_eq!(counter(42), 42);
        assert_eq!(counter(i64::MAX), u32::MAX);
    }
}
