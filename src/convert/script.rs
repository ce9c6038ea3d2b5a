//! Written-script identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A written-script variant of Chinese.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// Simplified Chinese.
    Hans,
    /// Traditional Chinese (generic, no regional vocabulary).
    Hant,
    /// Traditional Chinese as written in Taiwan.
    Tw,
    /// Traditional Chinese as written in Hong Kong.
    Hk,
}

impl Script {
    pub const ALL: [Script; 4] = [Script::Hans, Script::Hant, Script::Tw, Script::Hk];

    /// Canonical name used in logs and serialized config.
    pub fn as_str(&self) -> &'static str {
        match self {
            Script::Hans => "Hans",
            Script::Hant => "Hant",
            Script::Tw => "TW",
            Script::Hk => "HK",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown script '{0}' (expected one of Hans/Simplified, Hant/Traditional, TW/Taiwan, HK/HongKong)")]
pub struct UnknownScript(pub String);

impl FromStr for Script {
    type Err = UnknownScript;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "hans" | "zhhans" | "simplified" | "s" | "cn" | "zhcn" => Ok(Script::Hans),
            "hant" | "zhhant" | "traditional" | "t" => Ok(Script::Hant),
            "tw" | "zhtw" | "taiwan" => Ok(Script::Tw),
            "hk" | "zhhk" | "hongkong" => Ok(Script::Hk),
            _ => Err(UnknownScript(s.to_string())),
        }
    }
}

impl Serialize for Script {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Script {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
