//! Static conversion dispatch table.
//!
//! # Design Decisions
//! - The set of supported `(source, dest)` pairs is closed; lookup is an
//!   exhaustive `match`, so adding a `Script` variant forces a decision here.
//! - Pairs with regional vocabulary (Taiwan) take the idiom flag; the rest
//!   convert characters only.
//! - Linguistic data lives in `zhconv`; this module only picks the variant.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zhconv::{zhconv, Variant};

use crate::convert::script::Script;

/// Which conversion to apply to a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversionSelector {
    pub source: Script,
    pub dest: Script,
    pub idiom: bool,
}

impl ConversionSelector {
    pub fn new(source: Script, dest: Script, idiom: bool) -> Self {
        Self { source, dest, idiom }
    }

    /// Fails if the pair has no registered conversion.
    pub fn validate(&self) -> Result<(), UnsupportedSelector> {
        self.resolve().map(|_| ())
    }

    fn resolve(&self) -> Result<Conversion, UnsupportedSelector> {
        lookup(self.source, self.dest).ok_or(UnsupportedSelector {
            from: self.source,
            to: self.dest,
        })
    }
}

impl std::fmt::Display for ConversionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{} (idiom={})", self.source, self.dest, self.idiom)
    }
}

/// The requested pair is not in the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no conversion registered from {from} to {to}")]
pub struct UnsupportedSelector {
    pub from: Script,
    pub to: Script,
}

/// A registered conversion function.
#[derive(Clone, Copy)]
pub enum Conversion {
    /// Character-level only.
    Plain(fn(&str) -> String),
    /// Optionally applies vocabulary-level substitution.
    Idiomatic(fn(&str, bool) -> String),
}

impl Conversion {
    pub fn apply(&self, text: &str, idiom: bool) -> String {
        match self {
            Conversion::Plain(f) => f(text),
            Conversion::Idiomatic(f) => f(text, idiom),
        }
    }
}

impl std::fmt::Debug for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conversion::Plain(_) => f.write_str("Conversion::Plain"),
            Conversion::Idiomatic(_) => f.write_str("Conversion::Idiomatic"),
        }
    }
}

/// Resolve a `(source, dest)` pair to its conversion.
pub fn lookup(source: Script, dest: Script) -> Option<Conversion> {
    use Script::*;

    match (source, dest) {
        (Hans, Hant) => Some(Conversion::Plain(hans_to_hant)),
        (Hant, Hans) => Some(Conversion::Plain(hant_to_hans)),
        (Hans, Hk) | (Hant, Hk) => Some(Conversion::Plain(to_hk)),
        (Hk, Hans) => Some(Conversion::Plain(hant_to_hans)),
        (Hk, Hant) => Some(Conversion::Plain(hk_to_hant)),
        (Hans, Tw) | (Hant, Tw) => Some(Conversion::Idiomatic(to_tw)),
        (Tw, Hans) => Some(Conversion::Idiomatic(tw_to_hans)),
        (Tw, Hant) => Some(Conversion::Idiomatic(tw_to_hant)),
        (Hans, Hans) | (Hant, Hant) | (Tw, Tw) | (Hk, Hk) => None,
        (Tw, Hk) | (Hk, Tw) => None,
    }
}

/// Convert `text` with the conversion registered for `selector`.
pub fn convert(text: &str, selector: &ConversionSelector) -> Result<String, UnsupportedSelector> {
    let conversion = selector.resolve()?;
    Ok(conversion.apply(text, selector.idiom))
}

fn hans_to_hant(text: &str) -> String {
    zhconv(text, Variant::ZhHant)
}

fn hant_to_hans(text: &str) -> String {
    zhconv(text, Variant::ZhHans)
}

fn to_hk(text: &str) -> String {
    zhconv(text, Variant::ZhHK)
}

fn hk_to_hant(text: &str) -> String {
    zhconv(text, Variant::ZhHant)
}

fn to_tw(text: &str, idiom: bool) -> String {
    if idiom {
        zhconv(text, Variant::ZhTW)
    } else {
        zhconv(text, Variant::ZhHant)
    }
}

fn tw_to_hans(text: &str, idiom: bool) -> String {
    if idiom {
        zhconv(text, Variant::ZhCN)
    } else {
        zhconv(text, Variant::ZhHans)
    }
}

/// Taiwan vocabulary is mapped back through mainland usage before re-encoding.
fn tw_to_hant(text: &str, idiom: bool) -> String {
    if idiom {
        zhconv(&zhconv(text, Variant::ZhCN), Variant::ZhHant)
    } else {
        zhconv(text, Variant::ZhHant)
    }
}
