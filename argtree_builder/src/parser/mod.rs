use thiserror::Error;

use crate::model::{Nargs, Parsed};

mod base;
mod interface;
mod middleware;
mod printer;

pub use base::ConfigError;
pub(crate) use base::*;
pub(crate) use interface::*;
pub use middleware::GeneralParser;
pub(crate) use middleware::*;
pub(crate) use printer::*;

/// The kind of parameter a usage error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterClass {
    /// An option (ex: `--verbose`).
    Opt,
    /// A positional argument.
    Arg,
}

impl std::fmt::Display for ParameterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterClass::Opt => write!(f, "option"),
            ParameterClass::Arg => write!(f, "argument"),
        }
    }
}

fn did_you_mean(suggestions: &[String]) -> String {
    match suggestions {
        [] => String::default(),
        [only] => format!("  (Possible option: {only})"),
        _ => format!("  (Possible options: {})", suggestions.join(", ")),
    }
}

/// A mistake in the user's command line input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// An option-looking token matched no declared option.
    #[error("No such option: {name}.{}", did_you_mean(.suggestions))]
    NoSuchOption {
        /// The option name as given.
        name: String,
        /// Declared names resembling `name`.
        suggestions: Vec<String>,
    },

    /// An option invocation received a number of values outside its cardinality.
    #[error("Option '{name}' requires {expected} value(s), but {provided} were provided.")]
    IncorrectOptionValueCount {
        /// The canonical key of the option.
        option: String,
        /// The name the option was invoked by.
        name: String,
        /// The cardinality of the option.
        expected: Nargs,
        /// The number of values provided.
        provided: usize,
    },

    /// A value was attached to a flag (ex: `--verbose=yes`).
    #[error("Option '{name}' does not take a value.")]
    OptionTakesNoValue {
        /// The name the flag was invoked by.
        name: String,
    },

    /// A required parameter was not provided.
    #[error("Missing {kind} '{parameter}'.")]
    MissingParameter {
        /// The display name of the parameter.
        parameter: String,
        /// Whether the parameter is an option or an argument.
        kind: ParameterClass,
    },

    /// An argument received fewer tokens than its cardinality requires.
    #[error("Argument '{argument}' requires {expected} value(s), but {provided} were provided.")]
    IncorrectArgumentValueCount {
        /// The name of the argument.
        argument: String,
        /// The cardinality of the argument.
        expected: Nargs,
        /// The number of tokens provided.
        provided: usize,
    },

    /// Tokens remained after every argument was satisfied.
    #[error("Got unexpected extra argument(s): {}.", .tokens.join(" "))]
    UnexpectedArgument {
        /// The leftover tokens.
        tokens: Vec<String>,
    },

    /// A lone leftover token resembles a sub-command name.
    #[error("No such sub-command: {name}.{}", did_you_mean(.suggestions))]
    NoSuchSubcommand {
        /// The token as given.
        name: String,
        /// Sub-command names resembling `name`.
        suggestions: Vec<String>,
    },

    /// The command requires a sub-command, but none was given.
    #[error("Missing sub-command for '{command}'.")]
    MissingSubcommand {
        /// The command path.
        command: String,
    },

    /// A conversion or validation of a value failed.
    #[error("Invalid value for '{parameter}': {message}")]
    InvalidValue {
        /// The display name of the parameter.
        parameter: String,
        /// The failure reported by the conversion or validation.
        message: String,
    },
}

/// A usage error, along with the index of the offending token (when there is one).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error: {error}")]
pub struct ParseError {
    error: UsageError,
    index: Option<usize>,
}

impl ParseError {
    pub(crate) fn new(error: UsageError, index: Option<usize>) -> Self {
        Self { error, index }
    }

    /// The usage error.
    pub fn error(&self) -> &UsageError {
        &self.error
    }

    /// The index of the offending token.
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

/// Renders the command line with a caret under the offending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    index: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(index: usize, tokens: &[String]) -> Self {
        Self {
            index,
            tokens: tokens.to_vec(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let projection = self.tokens.join(" ");
        let width: usize = self
            .tokens
            .iter()
            .take(self.index)
            .map(|token| token.chars().count() + 1)
            .sum();

        write!(f, "{projection}\n{:width$}^", "")
    }
}

/// The usage errors of the command level where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageFailure {
    command: String,
    errors: Vec<ParseError>,
    tokens: Vec<String>,
}

impl UsageFailure {
    pub(crate) fn new(command: impl Into<String>, errors: Vec<ParseError>, tokens: Vec<String>) -> Self {
        assert!(!errors.is_empty(), "internal error - a usage failure carries errors");
        Self {
            command: command.into(),
            errors,
            tokens,
        }
    }

    /// The path of the command that failed (ex: `program sub`).
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Every error found, in discovery order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// The usage errors alone.
    pub fn usage_errors(&self) -> Vec<&UsageError> {
        self.errors.iter().map(ParseError::error).collect()
    }

    /// The caret rendering of the first error that points at a token.
    pub fn error_context(&self) -> Option<ErrorContext> {
        self.errors
            .iter()
            .find_map(ParseError::index)
            .map(|index| ErrorContext::new(index, &self.tokens))
    }
}

/// A successful short-circuit, such as help or version output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarlyExit {
    message: String,
    exit_code: i32,
}

impl EarlyExit {
    pub(crate) fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// The message to display.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The process exit code to use.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }
}

/// The result of parsing a command line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Every invoked level parsed and finalized.
    Success(Parsed),
    /// The command line contains mistakes.
    UsageFailure(UsageFailure),
    /// Parsing stopped early, on purpose.
    EarlyExit(EarlyExit),
}

impl ParseOutcome {
    /// The successful parse, if any.
    pub fn parsed(self) -> Option<Parsed> {
        match self {
            ParseOutcome::Success(parsed) => Some(parsed),
            _ => None,
        }
    }
}
