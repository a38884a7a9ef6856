use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{Eager, Pipeline};
use crate::matcher::*;
use crate::model::{Invocation, Nargs, Value};
use crate::parser::{ParameterClass, ParseError, UsageError};

/// A mistake in the declaration of a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two parameters of one command share a name or key.
    #[error("Config error: duplicate parameter name '{0}'.")]
    DuplicateName(String),

    /// A parameter name is empty or malformed.
    #[error("Config error: '{0}' is not a valid parameter name.")]
    InvalidName(String),

    /// Only one argument per command may take a variable number of values.
    #[error("Config error: arguments '{first}' and '{second}' both take a variable number of values.")]
    MultipleVariableArguments {
        /// The argument declared first.
        first: String,
        /// The argument declared second.
        second: String,
    },

    /// Only one option per command may accept bare numbers.
    #[error("Config error: options '{first}' and '{second}' both accept bare numbers.")]
    MultipleNumberOptions {
        /// The option declared first.
        first: String,
        /// The option declared second.
        second: String,
    },

    /// The cardinality is not allowed for the parameter.
    #[error("Config error: '{parameter}' cannot take {nargs} value(s).")]
    InvalidNargs {
        /// The display name of the parameter.
        parameter: String,
        /// The rejected cardinality.
        nargs: Nargs,
    },

    /// Secondary names only apply to flags.
    #[error("Config error: '{0}' takes values, so it cannot have secondary names.")]
    SecondaryNameOnValueOption(String),

    /// Eager options must be flags.
    #[error("Config error: eager option '{0}' cannot take values.")]
    EagerOptionWithValues(String),

    /// Two sub-commands of one command share a name.
    #[error("Config error: duplicate sub-command '{0}'.")]
    DuplicateSubcommand(String),

    /// An alias would shadow a sub-command.
    #[error("Config error: alias '{0}' shadows a sub-command.")]
    InvalidAlias(String),
}

fn config_error(error: RegistryError, bound: Bound) -> ConfigError {
    match error {
        RegistryError::NoNames => ConfigError::InvalidName(String::default()),
        RegistryError::InvalidName(name) => ConfigError::InvalidName(name),
        RegistryError::DuplicateName(name) => ConfigError::DuplicateName(name),
        RegistryError::SecondaryNameOnValueOption(name) => {
            ConfigError::SecondaryNameOnValueOption(name)
        }
        RegistryError::MultipleNumberOptions { first, second } => {
            ConfigError::MultipleNumberOptions { first, second }
        }
        RegistryError::NumberOptionArity(parameter) => ConfigError::InvalidNargs {
            parameter,
            nargs: bound.into(),
        },
    }
}

impl From<MatchError> for UsageError {
    fn from(error: MatchError) -> Self {
        match error {
            MatchError::InvalidOption { name, suggestions } => {
                UsageError::NoSuchOption { name, suggestions }
            }
            MatchError::IncorrectValueCount {
                option,
                name,
                expected,
                provided,
            } => UsageError::IncorrectOptionValueCount {
                option,
                name,
                expected: expected.into(),
                provided,
            },
            MatchError::UnexpectedValue(name) => UsageError::OptionTakesNoValue { name },
            MatchError::MissingArgument(parameter) => UsageError::MissingParameter {
                parameter,
                kind: ParameterClass::Arg,
            },
            MatchError::IncorrectArgumentValueCount {
                argument,
                expected,
                provided,
            } => UsageError::IncorrectArgumentValueCount {
                argument,
                expected: expected.into(),
                provided,
            },
            MatchError::UnexpectedArguments(tokens) => UsageError::UnexpectedArgument { tokens },
            MatchError::InvalidSubcommand { name, suggestions } => {
                UsageError::NoSuchSubcommand { name, suggestions }
            }
        }
    }
}

/// An option, along with what to do with its invocations.
#[derive(Debug)]
pub(crate) struct OptionCapture {
    pub(crate) config: OptionConfig,
    pub(crate) pipeline: Pipeline,
    pub(crate) required: bool,
    pub(crate) eager: Option<Eager>,
}

impl OptionCapture {
    fn finalize(&self, invocations: Vec<Invocation>) -> Result<(Value, Option<usize>), Vec<ParseError>> {
        let bound = self.config.bound();
        let mut errors = Vec::default();
        let mut values = Vec::with_capacity(invocations.len());

        for invocation in &invocations {
            if bound.is_flag() {
                values.push(Value::Bool(!self.config.is_secondary(invocation.name())));
                continue;
            }

            let mut converted = Vec::default();

            for (offset, raw) in invocation.offset_values() {
                match self.pipeline.convert(raw) {
                    Ok(value) => converted.push(value),
                    Err(message) => errors.push(ParseError::new(
                        UsageError::InvalidValue {
                            parameter: invocation.name().to_string(),
                            message,
                        },
                        Some(*offset),
                    )),
                }
            }

            if bound.upper() == Some(1) {
                values.push(converted.pop().unwrap_or(Value::Absent));
            } else {
                values.push(Value::List(converted));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let reduce = self.pipeline.reduce();

        if values.is_empty() {
            return match self.pipeline.default_value() {
                Some(default) => Ok((default.clone(), None)),
                None if self.required => Err(vec![ParseError::new(
                    UsageError::MissingParameter {
                        parameter: self.config.display_name().to_string(),
                        kind: ParameterClass::Opt,
                    },
                    None,
                )]),
                None => Ok((reduce.empty(bound.is_flag()), None)),
            };
        }

        let index = invocations.last().map(Invocation::index);
        reduce
            .apply(values)
            .map(|value| (value, index))
            .map_err(|message| {
                vec![ParseError::new(
                    UsageError::InvalidValue {
                        parameter: self.config.display_name().to_string(),
                        message,
                    },
                    index,
                )]
            })
    }
}

/// An argument, along with what to do with its tokens.
#[derive(Debug)]
pub(crate) struct ArgumentCapture {
    pub(crate) config: ArgumentConfig,
    pub(crate) pipeline: Pipeline,
}

impl ArgumentCapture {
    fn finalize(&self, tokens: Vec<OffsetValue>) -> Result<(Value, Option<usize>), Vec<ParseError>> {
        let index = tokens.first().map(|(offset, _)| *offset);
        let mut errors = Vec::default();
        let mut converted = Vec::with_capacity(tokens.len());

        for (offset, raw) in &tokens {
            match self.pipeline.convert(raw) {
                Ok(value) => converted.push(value),
                Err(message) => errors.push(ParseError::new(
                    UsageError::InvalidValue {
                        parameter: self.config.name().to_string(),
                        message,
                    },
                    Some(*offset),
                )),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        if converted.is_empty() {
            if let Some(default) = self.pipeline.default_value() {
                return Ok((default.clone(), None));
            }
        }

        let value = if self.config.bound() == Bound::Range(1, 1) {
            converted.pop().unwrap_or(Value::Absent)
        } else {
            Value::List(converted)
        };

        Ok((value, index))
    }
}

struct Finalized<'p> {
    key: &'p str,
    parameter: &'p str,
    value: Value,
    index: Option<usize>,
    pipeline: &'p Pipeline,
}

/// What to do after consuming the tokens of a single command level.
#[derive(Debug)]
pub(crate) enum Action {
    Continue {
        values: HashMap<String, Value>,
        subcommand: Option<(usize, String)>,
    },
    Exit(Eager),
    Fail(Vec<ParseError>),
}

/// The parser of a single command level.
#[derive(Debug)]
pub(crate) struct Parser {
    registry: OptionRegistry,
    options: Vec<OptionCapture>,
    argument_configs: Vec<ArgumentConfig>,
    arguments: Vec<ArgumentCapture>,
    aliases: HashMap<String, Vec<String>>,
    settings: MatcherSettings,
}

impl Parser {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(
            Vec::default(),
            Vec::default(),
            HashMap::default(),
            MatcherSettings::default(),
        )
        .unwrap()
    }

    pub(crate) fn new(
        options: Vec<OptionCapture>,
        arguments: Vec<ArgumentCapture>,
        aliases: HashMap<String, Vec<String>>,
        settings: MatcherSettings,
    ) -> Result<Self, ConfigError> {
        let mut registry = OptionRegistry::default();
        let mut keys = HashSet::new();

        for option in &options {
            let bound = option.config.bound();

            if option.eager.is_some() && !bound.is_flag() {
                return Err(ConfigError::EagerOptionWithValues(
                    option.config.display_name().to_string(),
                ));
            }

            if let Bound::Range(i, j) = bound {
                if i > j {
                    return Err(ConfigError::InvalidNargs {
                        parameter: option.config.display_name().to_string(),
                        nargs: bound.into(),
                    });
                }
            }

            registry
                .register(option.config.clone())
                .map_err(|error| config_error(error, bound))?;

            if !keys.insert(option.config.key().to_string()) {
                return Err(ConfigError::DuplicateName(option.config.key().to_string()));
            }
        }

        let mut variable: Option<&str> = None;

        for argument in &arguments {
            let name = argument.config.name();
            let bound = argument.config.bound();

            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidName(name.to_string()));
            }

            match bound {
                Bound::Range(i, j) if i == 0 || i != j => {
                    return Err(ConfigError::InvalidNargs {
                        parameter: name.to_string(),
                        nargs: bound.into(),
                    });
                }
                Bound::Lower(_) => {
                    if let Some(first) = variable {
                        return Err(ConfigError::MultipleVariableArguments {
                            first: first.to_string(),
                            second: name.to_string(),
                        });
                    }

                    variable.replace(name);
                }
                Bound::Range(..) => {}
            }

            if !keys.insert(name.to_string()) {
                return Err(ConfigError::DuplicateName(name.to_string()));
            }
        }

        Ok(Self {
            registry,
            options,
            argument_configs: arguments.iter().map(|argument| argument.config.clone()).collect(),
            arguments,
            aliases,
            settings,
        })
    }

    /// Consume the tokens of this command level, starting at `start`.
    pub(crate) fn consume(
        &self,
        tokens: &mut Vec<String>,
        start: usize,
        subcommands: &HashMap<String, usize>,
    ) -> Action {
        let matcher = CommandMatcher::new(&self.registry, subcommands, &self.aliases, &self.settings);
        let Scan {
            invocations,
            positionals,
            subcommand,
            errors,
        } = matcher.scan(tokens, start);

        // Eager options win over any usage error.
        for (id, option) in self.options.iter().enumerate() {
            if let Some(eager) = &option.eager {
                if invocations.is_invoked(id) {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Eager option '{}' invoked.", option.config.display_name());
                    }

                    return Action::Exit(eager.clone());
                }
            }
        }

        let mut errors: Vec<ParseError> = errors
            .into_iter()
            .map(|(index, error)| ParseError::new(error.into(), index))
            .collect();
        let names: Vec<&str> = subcommands.keys().map(String::as_str).collect();

        let distribution = match distribute(&self.argument_configs, &positionals, &names) {
            Ok(distribution) if errors.is_empty() => distribution,
            Ok(_) => return Action::Fail(errors),
            Err((index, error)) => {
                errors.push(ParseError::new(error.into(), index));
                return Action::Fail(errors);
            }
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Distributed positionals: {distribution:?}.");
        }

        match self.finalize(invocations, distribution) {
            Ok(values) => Action::Continue { values, subcommand },
            Err(errors) => Action::Fail(errors),
        }
    }

    fn finalize(
        &self,
        invocations: InvocationRecorder,
        distribution: Distribution,
    ) -> Result<HashMap<String, Value>, Vec<ParseError>> {
        let mut grouped = invocations.group();
        let mut errors = Vec::default();
        let mut finalized = Vec::default();

        for (id, option) in self.options.iter().enumerate() {
            if option.eager.is_some() {
                continue;
            }

            match option.finalize(grouped.remove(&id).unwrap_or_default()) {
                Ok((value, index)) => finalized.push(Finalized {
                    key: option.config.key(),
                    parameter: option.config.display_name(),
                    value,
                    index,
                    pipeline: &option.pipeline,
                }),
                Err(option_errors) => errors.extend(option_errors),
            }
        }

        for (argument, tokens) in self.arguments.iter().zip(distribution) {
            match argument.finalize(tokens) {
                Ok((value, index)) => finalized.push(Finalized {
                    key: argument.config.name(),
                    parameter: argument.config.name(),
                    value,
                    index,
                    pipeline: &argument.pipeline,
                }),
                Err(argument_errors) => errors.extend(argument_errors),
            }
        }

        if errors.is_empty() {
            for item in &finalized {
                if let Err(message) = item.pipeline.validate(&item.value) {
                    errors.push(ParseError::new(
                        UsageError::InvalidValue {
                            parameter: item.parameter.to_string(),
                            message,
                        },
                        item.index,
                    ));
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(finalized
            .into_iter()
            .map(|item| (item.key.to_string(), item.value))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Reduce, Stage};
    use rstest::rstest;
    use std::sync::Arc;

    fn option(names: &[&str], nargs: Nargs) -> OptionCapture {
        OptionCapture {
            config: OptionConfig::new(names.iter().map(|n| n.to_string()).collect(), nargs.into()),
            pipeline: Pipeline::default(),
            required: false,
            eager: None,
        }
    }

    fn argument(name: &str, nargs: Nargs) -> ArgumentCapture {
        let bound = Bound::from(nargs);
        ArgumentCapture {
            config: ArgumentConfig::new(name, bound, bound.lower() > 0),
            pipeline: Pipeline::default(),
        }
    }

    fn integer() -> Stage {
        Stage::Convert(Arc::new(|value: Value| {
            value
                .to_string()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| format!("'{value}' is not an integer."))
        }))
    }

    fn consume(parser: &Parser, tokens: &[&str]) -> Action {
        let mut tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        parser.consume(&mut tokens, 0, &HashMap::default())
    }

    fn parser(options: Vec<OptionCapture>, arguments: Vec<ArgumentCapture>) -> Parser {
        Parser::new(options, arguments, HashMap::default(), MatcherSettings::default()).unwrap()
    }

    #[test]
    fn empty() {
        let parser = Parser::empty();
        assert_matches!(consume(&parser, &[]), Action::Continue { values, subcommand: None } => {
            assert!(values.is_empty());
        });
    }

    #[test]
    fn values() {
        // Setup
        let parser = parser(
            vec![
                option(&["-v", "--verbose"], Nargs::Precisely(0)),
                option(&["-x", "--xx"], Nargs::Precisely(1)),
                option(&["--many"], Nargs::Any),
            ],
            vec![argument("A", Nargs::Precisely(1)), argument("B", Nargs::Any)],
        );

        // Execute
        let action = consume(&parser, &["a", "--xx", "1", "b", "-x", "2", "--many", "c", "d"]);

        // Verify
        assert_matches!(action, Action::Continue { values, subcommand: None } => {
            assert_eq!(values["verbose"], Value::Bool(false));
            assert_eq!(values["xx"], Value::from("2"));
            assert_eq!(values["many"], Value::from(vec!["c", "d"]));
            assert_eq!(values["A"], Value::from("a"));
            assert_eq!(values["B"], Value::from(vec!["b"]));
        });
    }

    #[test]
    fn absent_values() {
        let parser = parser(
            vec![option(&["--xx"], Nargs::Precisely(1)), option(&["--many"], Nargs::Any)],
            vec![argument("A", Nargs::Any)],
        );

        assert_matches!(consume(&parser, &[]), Action::Continue { values, .. } => {
            assert_eq!(values["xx"], Value::Absent);
            assert_eq!(values["many"], Value::Absent);
            assert_eq!(values["A"], Value::List(vec![]));
        });
    }

    #[test]
    fn secondary_flag() {
        let mut color = option(&["--color"], Nargs::Precisely(0));
        color.config = color
            .config
            .with_secondary_names(vec!["--no-color".to_string()]);
        let parser = parser(vec![color], vec![]);

        assert_matches!(consume(&parser, &["--color", "--no-color"]), Action::Continue { values, .. } => {
            assert_eq!(values["color"], Value::Bool(false));
        });
        assert_matches!(consume(&parser, &["--no-color", "--color"]), Action::Continue { values, .. } => {
            assert_eq!(values["color"], Value::Bool(true));
        });
    }

    #[rstest]
    #[case(&[], Value::Int(0))]
    #[case(&["-v"], Value::Int(1))]
    #[case(&["-vvv"], Value::Int(3))]
    #[case(&["-v", "--verbose", "-vv"], Value::Int(4))]
    fn counted_flag(#[case] tokens: &[&str], #[case] expected: Value) {
        let mut verbose = option(&["-v", "--verbose"], Nargs::Precisely(0));
        verbose.pipeline.push(Stage::Reduce(Reduce::Count));
        let parser = parser(vec![verbose], vec![]);

        assert_matches!(consume(&parser, tokens), Action::Continue { values, .. } => {
            assert_eq!(values["verbose"], expected);
        });
    }

    #[test]
    fn default_value() {
        let mut xx = option(&["--xx"], Nargs::Precisely(1));
        xx.pipeline.push(integer());
        xx.pipeline.push(Stage::Default(Value::Int(5)));
        let mut a = argument("A", Nargs::Precisely(1));
        a.config = ArgumentConfig::new("A", Bound::Range(1, 1), false);
        a.pipeline.push(Stage::Default(Value::from("z")));
        let parser = parser(vec![xx], vec![a]);

        assert_matches!(consume(&parser, &[]), Action::Continue { values, .. } => {
            assert_eq!(values["xx"], Value::Int(5));
            assert_eq!(values["A"], Value::from("z"));
        });
        assert_matches!(consume(&parser, &["--xx", "7", "y"]), Action::Continue { values, .. } => {
            assert_eq!(values["xx"], Value::Int(7));
            assert_eq!(values["A"], Value::from("y"));
        });
    }

    #[test]
    fn required_option() {
        let mut xx = option(&["-x", "--xx"], Nargs::Precisely(1));
        xx.required = true;
        let parser = parser(vec![xx], vec![]);

        assert_matches!(consume(&parser, &[]), Action::Fail(errors) => {
            assert_eq!(errors, vec![ParseError::new(
                UsageError::MissingParameter { parameter: "--xx".to_string(), kind: ParameterClass::Opt },
                None,
            )]);
        });
    }

    #[test]
    fn conversion_errors_accumulate() {
        // Setup
        let mut xx = option(&["--xx"], Nargs::AtLeastOne);
        xx.pipeline.push(integer());
        let mut a = argument("A", Nargs::Precisely(1));
        a.pipeline.push(integer());
        let parser = parser(vec![xx], vec![a]);

        // Execute
        let action = consume(&parser, &["--xx", "1", "b", "3", "--", "d"]);

        // Verify
        assert_matches!(action, Action::Fail(errors) => {
            assert_eq!(errors, vec![
                ParseError::new(
                    UsageError::InvalidValue { parameter: "--xx".to_string(), message: "'b' is not an integer.".to_string() },
                    Some(2),
                ),
                ParseError::new(
                    UsageError::InvalidValue { parameter: "A".to_string(), message: "'d' is not an integer.".to_string() },
                    Some(5),
                ),
            ]);
        });
    }

    #[test]
    fn validation_after_conversion() {
        // Setup
        let mut xx = option(&["--xx"], Nargs::Precisely(1));
        xx.pipeline.push(Stage::Validate(Arc::new(|_: &Value| Err("never".to_string()))));
        let mut yy = option(&["--yy"], Nargs::Precisely(1));
        yy.pipeline.push(integer());
        let parser = parser(vec![xx, yy], vec![]);

        // Execute & verify
        assert_matches!(consume(&parser, &["--xx", "a", "--yy", "b"]), Action::Fail(errors) => {
            assert_eq!(errors.len(), 1);
            assert_matches!(errors[0].error(), UsageError::InvalidValue { parameter, .. } => {
                assert_eq!(parameter, "--yy");
            });
        });
        assert_matches!(consume(&parser, &["--xx", "a", "--yy", "1"]), Action::Fail(errors) => {
            assert_eq!(errors, vec![ParseError::new(
                UsageError::InvalidValue { parameter: "--xx".to_string(), message: "never".to_string() },
                Some(0),
            )]);
        });
        assert_matches!(consume(&parser, &["--yy", "1"]), Action::Continue { .. });
    }

    #[test]
    fn eager_wins() {
        // Setup
        let mut help = option(&["-h", "--help"], Nargs::Precisely(0));
        help.eager = Some(Eager::Help);
        let mut version = option(&["--version"], Nargs::Precisely(0));
        version.eager = Some(Eager::Message("1.0".to_string()));
        let parser = parser(vec![help, version], vec![argument("A", Nargs::Precisely(1))]);

        // Execute & verify
        assert_matches!(consume(&parser, &["--zz", "--version", "-h"]), Action::Exit(Eager::Help));
        assert_matches!(consume(&parser, &["--version", "a", "b"]), Action::Exit(Eager::Message(message)) => {
            assert_eq!(message, "1.0");
        });
    }

    #[test]
    fn usage_errors_accumulate() {
        let parser = parser(
            vec![option(&["-x"], Nargs::Precisely(1))],
            vec![argument("A", Nargs::Precisely(1))],
        );

        assert_matches!(consume(&parser, &["--zz", "-q"]), Action::Fail(errors) => {
            assert_eq!(errors.len(), 3);
            assert_eq!(errors[0].index(), Some(0));
            assert_eq!(errors[1].index(), Some(1));
            assert_eq!(errors[2], ParseError::new(
                UsageError::MissingParameter { parameter: "A".to_string(), kind: ParameterClass::Arg },
                None,
            ));
        });
    }

    #[test]
    fn subcommand_continue() {
        let parser = parser(vec![option(&["--xx"], Nargs::Precisely(1))], vec![]);
        let mut tokens: Vec<String> = ["--xx", "2", "sub", "--yy", "4"]
            .iter()
            .map(|t| t.to_string())
            .collect();

        let action = parser.consume(&mut tokens, 0, &HashMap::from([("sub".to_string(), 0)]));

        assert_matches!(action, Action::Continue { values, subcommand: Some((2, name)) } => {
            assert_eq!(name, "sub");
            assert_eq!(values["xx"], Value::from("2"));
        });
    }

    #[rstest]
    #[case(vec![option(&["-x"], Nargs::Precisely(1)), option(&["-x"], Nargs::Precisely(0))], vec![], ConfigError::DuplicateName("-x".to_string()))]
    #[case(vec![option(&["-x", "--xx"], Nargs::Precisely(1)), option(&["+x", "++xx"], Nargs::Precisely(0))], vec![], ConfigError::DuplicateName("xx".to_string()))]
    #[case(vec![option(&["--xx"], Nargs::Precisely(1))], vec![argument("xx", Nargs::Precisely(1))], ConfigError::DuplicateName("xx".to_string()))]
    #[case(vec![], vec![argument("A", Nargs::Precisely(1)), argument("A", Nargs::Any)], ConfigError::DuplicateName("A".to_string()))]
    #[case(vec![], vec![argument("A", Nargs::Any), argument("B", Nargs::AtLeastOne)], ConfigError::MultipleVariableArguments { first: "A".to_string(), second: "B".to_string() })]
    #[case(vec![], vec![argument("A", Nargs::Precisely(0))], ConfigError::InvalidNargs { parameter: "A".to_string(), nargs: Nargs::Precisely(0) })]
    #[case(vec![], vec![argument("A", Nargs::Between(1, 2))], ConfigError::InvalidNargs { parameter: "A".to_string(), nargs: Nargs::Between(1, 2) })]
    #[case(vec![], vec![argument("", Nargs::Precisely(1))], ConfigError::InvalidName("".to_string()))]
    #[case(vec![option(&["x"], Nargs::Precisely(1))], vec![], ConfigError::InvalidName("x".to_string()))]
    #[case(vec![option(&["--xx"], Nargs::Between(3, 2))], vec![], ConfigError::InvalidNargs { parameter: "--xx".to_string(), nargs: Nargs::Between(3, 2) })]
    fn config_errors(
        #[case] options: Vec<OptionCapture>,
        #[case] arguments: Vec<ArgumentCapture>,
        #[case] expected: ConfigError,
    ) {
        let result = Parser::new(options, arguments, HashMap::default(), MatcherSettings::default());
        assert_eq!(result.unwrap_err(), expected);
    }

    #[test]
    fn config_error_eager_with_values() {
        let mut help = option(&["--help"], Nargs::Precisely(1));
        help.eager = Some(Eager::Help);
        let result = Parser::new(vec![help], vec![], HashMap::default(), MatcherSettings::default());
        assert_eq!(
            result.unwrap_err(),
            ConfigError::EagerOptionWithValues("--help".to_string())
        );
    }

    #[test]
    fn config_error_number_option() {
        let mut lines = option(&["-n"], Nargs::Any);
        lines.config = lines.config.with_number_value(true);
        let result = Parser::new(vec![lines], vec![], HashMap::default(), MatcherSettings::default());
        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidNargs {
                parameter: "-n".to_string(),
                nargs: Nargs::Any,
            }
        );
    }
}
