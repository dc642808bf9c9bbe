//! Strongly-typed, string-backed identifiers.
//!
//! Each entity type declares its own identifier with [`string_id!`], so a
//! `MovieId` can never be passed where a `FileId` is expected.

use uuid::Uuid;

use crate::error::DomainError;

/// Fresh unique token used as the value of generated identifiers.
///
/// UUIDv7 keeps identifiers roughly time-ordered.
pub fn generate_token() -> String {
    Uuid::now_v7().to_string()
}

/// Validate raw identifier input.
pub fn parse_token(kind: &str, raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_id(format!("{kind}: must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Declare a string-backed identifier newtype.
///
/// The declaring crate must depend on `serde`.
#[macro_export]
macro_rules! string_id {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $t(String);

        impl $t {
            /// Generate a new, unique identifier.
            pub fn generate() -> Self {
                Self($crate::id::generate_token())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

        }

        impl ::core::fmt::Display for $t {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $t {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::id::parse_token($name, s).map(Self)
            }
        }

        impl ::core::convert::TryFrom<String> for $t {
            type Error = $crate::DomainError;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                $crate::id::parse_token($name, &raw).map(Self)
            }
        }

        impl From<$t> for String {
            fn from(id: $t) -> String {
                id.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a registered user.
    ///
    /// Declared here so that other entities can reference users without
    /// depending on the users crate.
    UserId,
    "UserId"
);
