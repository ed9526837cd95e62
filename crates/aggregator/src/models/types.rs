use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Currency code as reported by a source (ISO 4217, e.g. "USD", "RUB")
pub type Currency = Cow<'static, str>;

/// Identifier of a distributor data source.
///
/// The set is closed: adding a distributor means adding a variant here and a
/// normalizer for its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    Getchips,
    Efind,
    Promelec,
}

impl SourceId {
    /// Every known source, in reporting order.
    pub const ALL: [SourceId; 3] = [SourceId::Getchips, SourceId::Efind, SourceId::Promelec];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Getchips => "getchips",
            Self::Efind => "efind",
            Self::Promelec => "promelec",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
