use std::str::FromStr;
use std::sync::Arc;

use crate::api::{from_str_converter, Pipeline, Reduce, Stage};
use crate::matcher::{ArgumentConfig, Bound, OptionConfig};
use crate::model::{Nargs, Value};
use crate::parser::{
    ArgumentCapture, ArgumentParameter, OptionCapture, OptionParameter, ParameterClass,
};

/// The short-circuit an eager option triggers when invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eager {
    /// Display the help message of the command level, and exit successfully.
    Help,
    /// Display the message, and exit successfully.
    Message(String),
}

/// A parameter of a command: either an option or a positional argument.
///
/// ### Example
/// ```
/// # use argtree_builder::{Nargs, Parameter, Reduce};
/// let verbose = Parameter::flag(["-v", "--verbose"])
///     .reduce(Reduce::Count)
///     .help("Increase the verbosity.");
/// let items = Parameter::argument("item", Nargs::AtLeastOne)
///     .parse::<i64>();
/// ```
pub struct Parameter {
    class: ParameterClass,
    names: Vec<String>,
    secondary_names: Vec<String>,
    nargs: Nargs,
    required: Option<bool>,
    unattached_value: bool,
    number_value: bool,
    eager: Option<Eager>,
    help: Option<String>,
    meta: Option<String>,
    pipeline: Pipeline,
}

impl std::fmt::Debug for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let class = match self.class {
            ParameterClass::Opt => "Opt",
            ParameterClass::Arg => "Arg",
        };
        let help = match &self.help {
            Some(help) => format!(", {help}"),
            None => String::default(),
        };

        write!(
            f,
            "{class}[{names}, {nargs}{help}]",
            names = self.names.join(" "),
            nargs = self.nargs,
        )
    }
}

impl Parameter {
    fn new(class: ParameterClass, names: Vec<String>, nargs: Nargs) -> Self {
        Self {
            class,
            names,
            secondary_names: Vec::default(),
            nargs,
            required: None,
            unattached_value: true,
            number_value: false,
            eager: None,
            help: None,
            meta: None,
            pipeline: Pipeline::default(),
        }
    }

    /// Create an option parameter, invoked by any of `names` (ex: `["-x", "--xx"]`).
    ///
    /// An option is optional unless marked [`required`](Parameter::required).
    pub fn option<I, S>(names: I, nargs: Nargs) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            ParameterClass::Opt,
            names.into_iter().map(Into::into).collect(),
            nargs,
        )
    }

    /// Create a flag: an option that takes no values.
    pub fn flag<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::option(names, Nargs::Precisely(0))
    }

    /// Create a positional argument.
    ///
    /// `Nargs::Precisely(n)` and `Nargs::AtLeastOne` arguments are required, and `Nargs::Any` arguments are not.
    pub fn argument(name: impl Into<String>, nargs: Nargs) -> Self {
        Self::new(ParameterClass::Arg, vec![name.into()], nargs)
    }

    /// Whether this is an option or an argument.
    pub fn class(&self) -> ParameterClass {
        self.class
    }

    /// The value pipeline of this parameter.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Names which turn the flag off (ex: `--no-color`).
    pub fn secondary<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secondary_names
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Require this parameter.
    pub fn required(mut self) -> Self {
        self.required.replace(true);
        self
    }

    /// Make this argument optional.
    pub fn optional(mut self) -> Self {
        self.required.replace(false);
        self
    }

    /// Whether the option takes values from the tokens that follow it (default `true`).
    ///
    /// When `false`, values may only be attached (ex: `--color=always` or `-calways`).
    pub fn unattached_value(mut self, accepts: bool) -> Self {
        self.unattached_value = accepts;
        self
    }

    /// Let a bare number token stand for an invocation of this option (ex: `-5` for `-n 5`).
    pub fn number_value(mut self) -> Self {
        self.number_value = true;
        self
    }

    /// Short-circuit the parse when this flag is invoked.
    pub fn eager(mut self, eager: Eager) -> Self {
        self.eager.replace(eager);
        self
    }

    /// Document the parameter in the help message.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// Name the values of the option in the help message (defaults to the key in upper case).
    pub fn meta(mut self, meta: impl Into<String>) -> Self {
        self.meta.replace(meta.into());
        self
    }

    /// Convert each value of the parameter.
    pub fn convert<F>(mut self, converter: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.pipeline.push(Stage::Convert(Arc::new(converter)));
        self
    }

    /// Convert each value of the parameter via `T::from_str`.
    pub fn parse<T>(mut self) -> Self
    where
        T: FromStr + Into<Value> + 'static,
    {
        self.pipeline.push(Stage::Convert(from_str_converter::<T>()));
        self
    }

    /// Combine the invocations of the option.
    pub fn reduce(mut self, reduce: Reduce) -> Self {
        self.pipeline.push(Stage::Reduce(reduce));
        self
    }

    /// Check the final value of the parameter.
    pub fn validate<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.pipeline.push(Stage::Validate(Arc::new(validator)));
        self
    }

    /// The value when the parameter is not provided.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.pipeline.push(Stage::Default(value.into()));
        self
    }

    pub(crate) fn into_option(self) -> (OptionCapture, OptionParameter) {
        let config = OptionConfig::new(self.names.clone(), Bound::from(self.nargs))
            .with_secondary_names(self.secondary_names.clone())
            .with_unattached_value(self.unattached_value)
            .with_number_value(self.number_value);
        let meta = self
            .meta
            .unwrap_or_else(|| config.key().to_ascii_uppercase().replace('-', "_"));
        let required = self.required.unwrap_or(false);
        let parameter = OptionParameter::new(
            config.all_names().cloned().collect(),
            self.nargs,
            required,
            meta,
            self.help,
        );
        let capture = OptionCapture {
            config,
            pipeline: self.pipeline,
            required,
            eager: self.eager,
        };

        (capture, parameter)
    }

    pub(crate) fn into_argument(self) -> (ArgumentCapture, ArgumentParameter) {
        let name = self.names.into_iter().next().unwrap_or_default();
        let required = self
            .required
            .unwrap_or(!matches!(self.nargs, Nargs::Any));
        let parameter = ArgumentParameter::new(name.clone(), self.nargs, required, self.help);
        let capture = ArgumentCapture {
            config: ArgumentConfig::new(name, Bound::from(self.nargs), required),
            pipeline: self.pipeline,
        };

        (capture, parameter)
    }
}
