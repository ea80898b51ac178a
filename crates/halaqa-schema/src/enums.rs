use serde::Serialize;

/// A closed set of string tags persisted in the store.
pub trait SchemaEnum: Copy + 'static {
    const NAME: &'static str;
    /// Legal tags, in declaration order.
    const VALUES: &'static [&'static str];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnumDef {
    pub name: &'static str,
    pub values: &'static [&'static str],
}

impl EnumDef {
    pub const fn of<E: SchemaEnum>() -> Self {
        Self {
            name: E::NAME,
            values: E::VALUES,
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.values.contains(&tag)
    }

    /// Tag the store falls back to when an insert omits the column.
    pub fn default_tag(&self) -> Option<&'static str> {
        self.values.first().copied()
    }
}

/// Declares a closed enumeration stored as its string tag.
///
/// Emits the enum plus `ALL`, `as_str`, `FromStr`, `Display`, serde impls
/// keyed by tag, and the [`SchemaEnum`] / [`ColumnValue`](crate::ColumnValue)
/// impls. The calling crate must depend on `serde`.
#[macro_export]
macro_rules! enum_tags {
    (
        $(#[$meta:meta])*
        $name:ident = $enum_name:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $tag, )+
                }
            }
        }

        impl $crate::SchemaEnum for $name {
            const NAME: &'static str = $enum_name;
            const VALUES: &'static [&'static str] = &[$($tag),+];
        }

        impl $crate::ColumnValue for $name {
            const TYPE: $crate::ColumnType = $crate::ColumnType::Enum($enum_name);
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::SchemaError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $( $tag => Ok($name::$variant), )+
                    other => Err($crate::SchemaError::InvalidEnumValue {
                        enum_name: $enum_name,
                        value: other.to_owned(),
                    }),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let tag = <::std::string::String as ::serde::Deserialize>::deserialize(deserializer)?;
                tag.parse().map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnType, ColumnValue, SchemaError};

    enum_tags! {
        Season = "season" {
            Spring => "spring",
            Summer => "summer",
            Winter => "winter",
        }
    }

    #[test]
    fn test_tags_round_trip_through_str() {
        for season in Season::ALL {
            assert_eq!(season.as_str().parse::<Season>().unwrap(), *season);
        }
        assert_eq!(Season::Summer.to_string(), "summer");
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = "autumn".parse::<Season>().unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidEnumValue {
                enum_name: "season",
                value: "autumn".into()
            }
        );
        assert!(serde_json::from_str::<Season>("\"Spring\"").is_err());
    }

    #[test]
    fn test_enum_def_matches_declaration() {
        let def = EnumDef::of::<Season>();
        assert_eq!(def.name, "season");
        assert_eq!(def.values, &["spring", "summer", "winter"]);
        assert_eq!(def.default_tag(), Some("spring"));
        assert!(def.contains("winter"));
        assert!(!def.contains("Winter"));
        assert_eq!(<Season as ColumnValue>::TYPE, ColumnType::Enum("season"));
    }

    #[test]
    fn test_serde_uses_tags() {
        assert_eq!(serde_json::to_string(&Season::Winter).unwrap(), "\"winter\"");
        assert_eq!(serde_json::from_str::<Season>("\"spring\"").unwrap(), Season::Spring);
    }
}
