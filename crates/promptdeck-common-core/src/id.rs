//! Strongly-typed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A time-ordered UUID wrapper with a display prefix.
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[doc = concat!("A unique, time-derived identifier with prefix '", $prefix, "_'.")]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new id from the current time.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Parse from string (with or without prefix).
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                let s = s.strip_prefix(concat!($prefix, "_")).unwrap_or(s);
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| IdParseError::InvalidFormat)
            }

            /// Get the inner UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

/// Error parsing an ID.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IdParseError {
    /// The ID format is invalid.
    #[error("invalid ID format")]
    InvalidFormat,
}

define_id!(HistoryId, "prompt");

/// Identifier of a template in the deck.
///
/// Built-in templates carry fixed slugs such as `polaroid`; templates added at
/// runtime get a `custom-` id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    /// Prefix used for templates created at runtime.
    pub const CUSTOM_PREFIX: &'static str = "custom-";

    /// Wrap an existing slug.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id for a user-added template.
    pub fn custom() -> Self {
        Self(format!("{}{}", Self::CUSTOM_PREFIX, Uuid::now_v7().simple()))
    }

    /// Whether this id was generated for a user-added template.
    pub fn is_custom(&self) -> bool {
        self.0.starts_with(Self::CUSTOM_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TemplateId({})", self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for TemplateId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TemplateId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
