//! Seen-set entries recording which tracks a listener has been served.

use serde::Serialize;

/// How a listener disposed of a served track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewAction {
    Listen,
    Skip,
}

impl ViewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Listen => "listen",
            Self::Skip => "skip",
        }
    }
}
