use std::fmt::Display;

use crate::parser::ErrorContext;

/// The console seam of the driver.
pub(crate) trait UserInterface: Send + Sync {
    fn print(&self, message: String);
    fn print_error(&self, error: &dyn Display);
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: &dyn Display) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}
