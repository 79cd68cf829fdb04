#![warn(clippy::pedantic)]

pub mod charset;
pub mod dump;
pub mod engine;
pub mod error;
pub mod sanitize;
pub mod unit;

pub use charset::Charset;
pub use dump::{DumpConfig, DumpSummary, Dumper, unidump};
pub use engine::UnitDecoder;
pub use error::{DecodeError, DumpError};
pub use sanitize::{category_abbr, sanitize};
pub use unit::DecodedUnit;
