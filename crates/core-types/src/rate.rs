use serde::{Deserialize, Serialize};
use std::fmt;

/// A single USD-BRL quote.
///
/// `bid` is kept as the decimal text the upstream sent; it is never parsed,
/// so what gets stored and echoed back is byte-for-byte what was quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// Currency identifier reported by the upstream (e.g. "USD"), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub bid: String,
}

impl Rate {
    pub fn new(code: Option<String>, bid: impl Into<String>) -> Self {
        Self {
            code,
            bid: bid.into(),
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} {}", code, self.bid),
            None => write!(f, "{}", self.bid),
        }
    }
}
