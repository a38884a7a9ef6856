use std::collections::HashMap;
use std::env;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{CommandError, Context, Eager, Handler};
use crate::model::{CommandValues, Parsed};
use crate::parser::{
    Action, EarlyExit, ParseError, ParseOutcome, Parser, Printer, UsageError, UsageFailure,
    UserInterface,
};

/// The configured command line parser.
/// Built via [`CommandLineParser::build_parser`](crate::api::CommandLineParser::build_parser).
///
/// The parser is immutable once built, so it may be shared and reused across any number of parses.
pub struct GeneralParser {
    root: ParseUnit,
    user_interface: Box<dyn UserInterface>,
}

/// A single command level, along with its sub-command levels.
pub(crate) struct ParseUnit {
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) parser: Parser,
    pub(crate) printer: Printer,
    pub(crate) subcommands: Vec<ParseUnit>,
    pub(crate) subcommand_index: HashMap<String, usize>,
    pub(crate) invoke_without_subcommand: bool,
    pub(crate) print_help_on_empty_args: bool,
    pub(crate) handler: Option<Handler>,
}

#[derive(Debug)]
enum Step {
    Exit(EarlyExit),
    Fail(Vec<ParseError>),
    Complete(CommandValues),
    Descend {
        values: CommandValues,
        child: usize,
        next: usize,
    },
}

impl ParseUnit {
    fn invoke(&self, tokens: &mut Vec<String>, start: usize) -> Step {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Dispatching '{}' from token {start}.", self.path);
        }

        match self.parser.consume(tokens, start, &self.subcommand_index) {
            Action::Exit(Eager::Help) => Step::Exit(EarlyExit::new(self.printer.render_help(), 0)),
            Action::Exit(Eager::Message(message)) => Step::Exit(EarlyExit::new(message, 0)),
            Action::Fail(errors) => Step::Fail(errors),
            Action::Continue {
                values,
                subcommand: Some((index, name)),
            } => match self.subcommand_index.get(&name) {
                Some(child) => Step::Descend {
                    values: CommandValues::new(&self.name, &self.path, values),
                    child: *child,
                    next: index + 1,
                },
                None => unreachable!("internal error - matched sub-command '{name}' must be indexed"),
            },
            Action::Continue {
                values,
                subcommand: None,
            } => {
                if !self.subcommands.is_empty() && !self.invoke_without_subcommand {
                    Step::Fail(vec![ParseError::new(
                        UsageError::MissingSubcommand {
                            command: self.path.clone(),
                        },
                        None,
                    )])
                } else {
                    Step::Complete(CommandValues::new(&self.name, &self.path, values))
                }
            }
        }
    }
}

fn run_handlers(
    units: &[&ParseUnit],
    levels: &[CommandValues],
    parent: Option<&Context<'_>>,
) -> Result<(), CommandError> {
    let (Some((unit, units)), Some((values, levels))) = (units.split_first(), levels.split_first())
    else {
        return Ok(());
    };
    let mut context = Context::new(values, parent);

    if let Some(handler) = &unit.handler {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Invoking the handler of '{}'.", unit.path);
        }

        handler(&mut context)?;
    }

    run_handlers(units, levels, Some(&context))
}

impl GeneralParser {
    pub(crate) fn new(root: ParseUnit, user_interface: Box<dyn UserInterface>) -> Self {
        Self {
            root,
            user_interface,
        }
    }

    /// Parse the input tokens, without printing or invoking any handler.
    ///
    /// Each command level consumes its tokens up to the first sub-command name, and hands the rest down to that sub-command.
    /// Parsing stops at the first level that fails, or that is short-circuited by an eager option (ex: `--help`).
    pub fn parse_tokens(&self, tokens: &[&str]) -> ParseOutcome {
        let mut tokens: Vec<String> = tokens.iter().map(|token| token.to_string()).collect();

        if tokens.is_empty() && self.root.print_help_on_empty_args {
            return ParseOutcome::EarlyExit(EarlyExit::new(self.root.printer.render_help(), 1));
        }

        let mut unit = &self.root;
        let mut start = 0;
        let mut levels = Vec::default();
        let mut route = Vec::default();

        loop {
            match unit.invoke(&mut tokens, start) {
                Step::Exit(early_exit) => return ParseOutcome::EarlyExit(early_exit),
                Step::Fail(errors) => {
                    return ParseOutcome::UsageFailure(UsageFailure::new(
                        unit.path.clone(),
                        errors,
                        tokens,
                    ))
                }
                Step::Complete(values) => {
                    levels.push(values);
                    return ParseOutcome::Success(Parsed::new(levels, route, tokens));
                }
                Step::Descend {
                    values,
                    child,
                    next,
                } => {
                    levels.push(values);
                    route.push(child);
                    unit = &unit.subcommands[child];
                    start = next;
                }
            }
        }
    }

    /// Run the command line parser against the input tokens.
    ///
    /// On success, the handler of each invoked command level is run, from the root downwards.
    /// Returns `Err(0)` after displaying an eager message (ex: `--help`), and `Err(1)` after displaying usage errors or a handler failure.
    pub fn run_tokens(&self, tokens: &[&str]) -> Result<(), i32> {
        match self.parse_tokens(tokens) {
            ParseOutcome::Success(parsed) => {
                let mut units = vec![&self.root];

                for child in parsed.route() {
                    let parent = units[units.len() - 1];
                    units.push(&parent.subcommands[*child]);
                }

                run_handlers(&units, parsed.levels(), None).map_err(|error| {
                    self.user_interface.print_error(&error);
                    1
                })
            }
            ParseOutcome::UsageFailure(failure) => {
                for error in failure.errors() {
                    self.user_interface.print_error(error);
                }

                if let Some(error_context) = failure.error_context() {
                    self.user_interface.print_error_context(error_context);
                }

                Err(1)
            }
            ParseOutcome::EarlyExit(early_exit) => {
                self.user_interface.print(early_exit.message().to_string());
                Err(early_exit.exit_code())
            }
        }
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// Exits the process (via `std::process::exit`) with the code `run_tokens` returns as an error.
    pub fn run(&self) {
        let command_input: Vec<String> = env::args().skip(1).collect();

        if let Err(exit_code) = self.run_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            std::process::exit(exit_code);
        }
    }
}
