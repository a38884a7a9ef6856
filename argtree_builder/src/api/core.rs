use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::api::{CommandError, Context, Eager, Handler, Parameter};
use crate::constant::*;
use crate::matcher::MatcherSettings;
use crate::parser::{
    ConfigError, ConsoleInterface, GeneralParser, ParameterClass, ParseUnit, Parser, Printer,
    UserInterface,
};

/// The command line parser builder.
///
/// The same builder describes the root command, and (via [`CommandLineParser::command`]) each sub-command.
///
/// ### Example
/// ```
/// # use argtree_builder::{CommandLineParser, Nargs, Parameter, Value};
/// let parser = CommandLineParser::new("program")
///     .add(Parameter::option(["-x", "--xx"], Nargs::Precisely(1)).parse::<i64>())
///     .add(Parameter::argument("item", Nargs::Any))
///     .build_parser()
///     .unwrap();
///
/// let parsed = parser.parse_tokens(&["a", "-x", "3", "b"]).parsed().unwrap();
/// assert_eq!(parsed.root().value("xx"), Some(&Value::Int(3)));
/// assert_eq!(parsed.root().value("item"), Some(&Value::from(vec!["a", "b"])));
/// ```
pub struct CommandLineParser {
    program: String,
    about: Option<String>,
    parameters: Vec<Parameter>,
    commands: Vec<(String, CommandLineParser)>,
    aliases: Vec<(String, Vec<String>)>,
    settings: MatcherSettings,
    invoke_without_subcommand: bool,
    print_help_on_empty_args: bool,
    help_names: Option<Vec<String>>,
    version: Option<String>,
    handler: Option<Handler>,
}

impl CommandLineParser {
    /// Create a command line parser.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            parameters: Vec::default(),
            commands: Vec::default(),
            aliases: Vec::default(),
            settings: MatcherSettings::default(),
            invoke_without_subcommand: false,
            print_help_on_empty_args: false,
            help_names: Some(HELP_NAMES.iter().map(|name| name.to_string()).collect()),
            version: None,
            handler: None,
        }
    }

    /// Document the about message for this command.
    /// If repeated, only the final message will apply.
    ///
    /// The about message of a sub-command also describes it in the help of its parent.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Add an argument/option to the command.
    ///
    /// The order of argument parameters corresponds to their positional order during parsing.
    /// The order of option parameters does not affect the parse, except among eager options (the first declared wins).
    pub fn add(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Add a sub-command, configured by `setup`.
    ///
    /// ### Example
    /// ```
    /// # use argtree_builder::{CommandLineParser, Nargs, Parameter, Value};
    /// let parser = CommandLineParser::new("program")
    ///     .command("sub", |sub| sub.add(Parameter::argument("a", Nargs::Precisely(1))))
    ///     .build_parser()
    ///     .unwrap();
    ///
    /// let parsed = parser.parse_tokens(&["sub", "1"]).parsed().unwrap();
    /// assert_eq!(parsed.invoked().path(), "program sub");
    /// assert_eq!(parsed.command("sub").unwrap().value("a"), Some(&Value::from("1")));
    /// ```
    pub fn command(
        mut self,
        name: impl Into<String>,
        setup: impl FnOnce(CommandLineParser) -> CommandLineParser,
    ) -> Self {
        let name = name.into();
        let command = setup(CommandLineParser::new(name.clone()));
        self.commands.push((name, command));
        self
    }

    /// Expand the token `name` into `tokens`, before matching.
    ///
    /// Expansions are not themselves expanded again.
    pub fn alias<I, S>(mut self, name: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases
            .push((name.into(), tokens.into_iter().map(Into::into).collect()));
        self
    }

    /// Whether options may follow arguments (default `true`).
    ///
    /// When `false`, every token from the first argument onwards is taken as an argument.
    pub fn allow_interspersed_args(mut self, allow: bool) -> Self {
        self.settings.allow_interspersed_args = allow;
        self
    }

    /// Whether unknown options are taken as arguments instead of failing (default `false`).
    pub fn treat_unknown_options_as_args(mut self, treat: bool) -> Self {
        self.settings.treat_unknown_options_as_args = treat;
        self
    }

    /// Whether short flags may be grouped into one token, as in `-abc` (default `true`).
    pub fn allow_grouped_short_options(mut self, allow: bool) -> Self {
        self.settings.allow_grouped_short_options = allow;
        self
    }

    /// Whether the command succeeds when none of its sub-commands are given (default `false`).
    pub fn invoke_without_subcommand(mut self, invoke: bool) -> Self {
        self.invoke_without_subcommand = invoke;
        self
    }

    /// Whether to display the help message (with exit code `1`) when the command line is empty (default `false`).
    pub fn print_help_on_empty_args(mut self, print: bool) -> Self {
        self.print_help_on_empty_args = print;
        self
    }

    /// Normalize tokens before looking up options, aliases and sub-commands (ex: to ignore case).
    pub fn token_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.settings.token_transform.replace(Arc::new(transform));
        self
    }

    /// The names of the help option (default `-h`, `--help`).
    ///
    /// Names already used by another option of the command are skipped.
    pub fn help_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.help_names
            .replace(names.into_iter().map(Into::into).collect());
        self
    }

    /// Do not add a help option.
    pub fn disable_help(mut self) -> Self {
        self.help_names = None;
        self
    }

    /// Add a `--version` option, which displays `<program> version <version>`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version.replace(version.into());
        self
    }

    /// The handler to run when this command is part of a successful parse.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Context<'_>) -> Result<(), CommandError> + Send + Sync + 'static,
    {
        self.handler.replace(Arc::new(handler));
        self
    }

    fn build_unit(self, path: String) -> Result<ParseUnit, ConfigError> {
        let CommandLineParser {
            program,
            about,
            parameters,
            commands,
            aliases,
            settings,
            invoke_without_subcommand,
            print_help_on_empty_args,
            help_names,
            version,
            handler,
        } = self;
        let normalize = |token: &str| match &settings.token_transform {
            Some(transform) => transform(token),
            None => token.to_string(),
        };

        let mut subcommand_index = HashMap::default();
        let mut subcommands = Vec::default();
        let mut listing = Vec::default();

        for (name, command) in commands {
            if subcommand_index
                .insert(normalize(&name), subcommands.len())
                .is_some()
            {
                return Err(ConfigError::DuplicateSubcommand(name));
            }

            listing.push((name.clone(), command.about.clone()));
            subcommands.push(command.build_unit(format!("{path} {name}"))?);
        }

        let mut alias_table = HashMap::default();

        for (name, expansion) in aliases {
            let key = normalize(&name);

            if subcommand_index.contains_key(&key) {
                return Err(ConfigError::InvalidAlias(name));
            }

            alias_table.insert(key, expansion);
        }

        let mut options = Vec::default();
        let mut arguments = Vec::default();

        for parameter in parameters {
            match parameter.class() {
                ParameterClass::Opt => options.push(parameter.into_option()),
                ParameterClass::Arg => arguments.push(parameter.into_argument()),
            }
        }

        let used_names: HashSet<String> = options
            .iter()
            .flat_map(|(capture, _)| capture.config.all_names().cloned())
            .collect();
        let used_keys: HashSet<String> = options
            .iter()
            .map(|(capture, _)| capture.config.key().to_string())
            .chain(
                arguments
                    .iter()
                    .map(|(capture, _)| capture.config.name().to_string()),
            )
            .collect();
        let mut eager = Vec::default();

        if let Some(names) = help_names {
            let names: Vec<String> = names
                .into_iter()
                .filter(|name| !used_names.contains(name))
                .collect();

            if !names.is_empty() {
                eager.push(
                    Parameter::flag(names)
                        .eager(Eager::Help)
                        .help(HELP_MESSAGE)
                        .into_option(),
                );
            }
        }

        if let Some(version) = version {
            if !used_names.contains(VERSION_NAME) {
                eager.push(
                    Parameter::flag([VERSION_NAME])
                        .eager(Eager::Message(format!("{path} version {version}")))
                        .help(VERSION_MESSAGE)
                        .into_option(),
                );
            }
        }

        eager.retain(|(capture, _)| !used_keys.contains(capture.config.key()));
        eager.extend(options);
        let (option_captures, option_parameters): (Vec<_>, Vec<_>) = eager.into_iter().unzip();
        let (argument_captures, argument_parameters): (Vec<_>, Vec<_>) =
            arguments.into_iter().unzip();

        let parser = Parser::new(option_captures, argument_captures, alias_table, settings)?;
        let printer = Printer::terminal(
            path.clone(),
            about,
            option_parameters,
            argument_parameters,
            listing,
        );

        Ok(ParseUnit {
            name: program,
            path,
            parser,
            printer,
            subcommands,
            subcommand_index,
            invoke_without_subcommand,
            print_help_on_empty_args,
            handler,
        })
    }

    pub(crate) fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser, ConfigError> {
        let path = self.program.clone();
        let root = self.build_unit(path)?;
        Ok(GeneralParser::new(root, user_interface))
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated parameter name).
    pub fn build_parser(self) -> Result<GeneralParser, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated parameter name).
    ///
    /// On a configuration error, prints the error and exits the process with code `1`.
    pub fn build(self) -> GeneralParser {
        match self.build_parser() {
            Ok(general_parser) => general_parser,
            Err(error) => {
                ConsoleInterface::default().print_error(&error);
                std::process::exit(1);
            }
        }
    }
}
