pub(crate) const HELP_NAMES: [&str; 2] = ["-h", "--help"];
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";
pub(crate) const VERSION_NAME: &str = "--version";
pub(crate) const VERSION_MESSAGE: &str = "Show the version and exit.";
pub(crate) const TERMINATOR: &str = "--";
// Jaro-Winkler similarity above which a name is considered a likely typo.
pub(crate) const SUGGESTION_THRESHOLD: f64 = 0.8;
