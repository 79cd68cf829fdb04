#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod formatter;
pub mod row;
pub mod template;

pub use config::{DEFAULT_ROW_WIDTH, FormatConfig};
pub use error::FormatError;
pub use formatter::LineFormatter;
pub use row::{Row, append_unit};
pub use template::{DEFAULT_TEMPLATE, LineTemplate};
