//! Script conversion capability.
//!
//! # Data Flow
//! ```text
//! ProxyConfig (source_script, dest_script, idiom_convert)
//!     → ConversionSelector (validated once at startup)
//!     → table.rs (static (source, dest) → Conversion match)
//!     → scope.rs (whole body or chat content fields)
//!     → converted text
//! ```
//!
//! # Design Decisions
//! - Pure functions; no state beyond the compiled-in tables
//! - Unsupported pairs are a configuration error, reported as `UnsupportedSelector`

pub mod scope;
pub mod script;
pub mod table;

pub use scope::{convert_body, ConversionScope};
pub use script::{Script, UnknownScript};
pub use table::{convert, lookup, Conversion, ConversionSelector, UnsupportedSelector};
