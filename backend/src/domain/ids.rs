//! Entity identifiers.
//!
//! Every record is keyed by a UUID v4 generated in the domain when the record
//! is created. Identifiers keep the canonical hyphenated lowercase string
//! alongside the parsed UUID, so equality, ordering and hashing agree.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when a string cannot be used as an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// The input was empty.
    #[error("{entity} id must not be empty")]
    Empty {
        /// Entity the identifier belongs to.
        entity: &'static str,
    },
    /// The input was not a UUID.
    #[error("{entity} id must be a valid UUID")]
    Invalid {
        /// Entity the identifier belongs to.
        entity: &'static str,
    },
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid, String);

        impl $name {
            /// Validate and construct an identifier from borrowed input.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdValidationError> {
                Self::from_owned(id.as_ref().to_owned())
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self::from_uuid(Uuid::new_v4())
            }

            /// Wrap an already parsed UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid, uuid.to_string())
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            fn from_owned(id: String) -> Result<Self, IdValidationError> {
                if id.is_empty() {
                    return Err(IdValidationError::Empty { entity: $entity });
                }
                if id.trim() != id {
                    return Err(IdValidationError::Invalid { entity: $entity });
                }
                let parsed = Uuid::parse_str(&id)
                    .map_err(|_| IdValidationError::Invalid { entity: $entity })?;
                Ok(Self::from_uuid(parsed))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.1.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.1
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_owned(value)
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.0.cmp(&other.0)
            }
        }
    };
}

define_id!(
    /// Stable user identifier.
    UserId,
    "user"
);
define_id!(
    /// Stable place identifier.
    PlaceId,
    "place"
);
define_id!(
    /// Stable amenity identifier.
    AmenityId,
    "amenity"
);
define_id!(
    /// Stable review identifier.
    ReviewId,
    "review"
);
