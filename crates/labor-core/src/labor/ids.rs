//! Opaque identifiers used across the labor domain.
//!
//! Every identifier wraps a string so ids minted elsewhere (person registry,
//! enterprise directory, brand catalogue) can be carried verbatim. Equality is by
//! the wrapped value only.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mint a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub(crate) fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identity of one person's labor resource aggregate.
    LaborResourceId
);
string_id!(
    /// Identity of a single employment snapshot.
    EmploymentEventId
);
string_id!(
    /// Natural person owning a labor resource.
    PersonId
);
string_id!(
    /// Employing enterprise.
    EnterpriseId
);
string_id!(
    /// Brand operated by an enterprise.
    BrandId
);
string_id!(
    /// Labor policy governing an employment.
    LaborPolicyId
);
