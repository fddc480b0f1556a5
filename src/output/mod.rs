//! Output module for console status messages.

pub mod console;

pub use console::{print_error, print_info, print_success, print_warning};
