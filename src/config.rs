use serde::{Deserialize, Serialize};

use crate::error::Error;

/// What the decoder does with input longer than one instruction.
///
/// Short input is always rejected with [`Error::OutOfBounds`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LengthPolicy {
    /// Only exactly-sized input decodes; anything longer is [`Error::TrailingBytes`].
    #[default]
    Exact,
    /// The leading instruction is decoded and trailing bytes are never read.
    Prefix,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdapterConfig {
    pub length_policy: LengthPolicy,
}

impl AdapterConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}
