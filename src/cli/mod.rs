//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by
//! main.rs.

mod compare;
mod document;

pub use compare::{
    parse_output_format, resolve_config, run_compare, CompareOptions, MatchKey, OutputFormat,
};
pub use document::{load_document, parse_document, DocumentFormat};

/// Process exit codes of the command-line front end.
pub mod exit_codes {
    /// The documents are equal
    pub const EQUAL: i32 = 0;
    /// At least one difference was found
    pub const DIFFERENT: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::exit_codes;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::EQUAL, 0);
        assert_eq!(exit_codes::DIFFERENT, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
