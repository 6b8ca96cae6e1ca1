//! Record identity shared by every stored collection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Collection-unique integer identifier.
///
/// Serialises as a bare JSON number.
///
/// # Examples
/// ```
/// use lmis_backend::domain::RecordId;
///
/// let id: RecordId = "42".parse().expect("numeric id");
/// assert_eq!(id.get(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// A value stored in a [`crate::domain::Collection`].
pub trait Record: Clone + Send + Sync + 'static {
    /// Identifier used for lookups.
    fn id(&self) -> RecordId;
}
