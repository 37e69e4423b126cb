//! Tolerant parsing of generation output into typed records

pub mod parser;

pub use parser::{ParseError, parse_json};
