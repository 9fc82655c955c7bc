pub mod formatting;

pub use formatting::{format_row, output_name, sanitize, ECHO_PLACEHOLDER};
