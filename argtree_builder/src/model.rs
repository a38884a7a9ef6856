use std::collections::HashMap;

use crate::matcher::OffsetValue;
use crate::prelude::FromValue;

/// The cardinality of values to match for an argument/option.
///
/// Inspired by argparse: <https://docs.python.org/3/library/argparse.html#nargs>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nargs {
    /// `N`: Precisely `N` values.
    Precisely(u8),
    /// `*`: May be any number of values, including `0`.
    Any,
    /// `+`: At least one value must be specified.
    AtLeastOne,
    /// `[min, max]`: Between `min` and `max` values, inclusive.
    /// Only applicable to options.
    Between(u8, u8),
}

impl std::fmt::Display for Nargs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Nargs::Precisely(n) => write!(f, "{n}"),
            Nargs::Any => write!(f, "any number of"),
            Nargs::AtLeastOne => write!(f, "at least 1"),
            Nargs::Between(min, max) => write!(f, "{min} to {max}"),
        }
    }
}

/// A finalized parameter value.
///
/// Every raw token starts out as [`Value::Text`]; conversion stages may turn it into any other variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value was provided, and there was no default.
    Absent,
    /// A flag value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A floating point value.
    Float(f64),
    /// A textual value.
    Text(String),
    /// Multiple values.
    List(Vec<Value>),
}

impl Value {
    /// Whether this is [`Value::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// The text of a [`Value::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The boolean of a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// The integer of a [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(number) => Some(*number),
            _ => None,
        }
    }

    /// The items of a [`Value::List`].
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Absent => Ok(()),
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Int(number) => write!(f, "{number}"),
            Value::Float(number) => write!(f, "{number}"),
            Value::Text(text) => write!(f, "{text}"),
            Value::List(items) => {
                let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

/// One occurrence of an option on the command line: the name it was matched by, and its raw values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    name: String,
    index: usize,
    values: Vec<OffsetValue>,
}

impl Invocation {
    pub(crate) fn new(name: impl Into<String>, index: usize, values: Vec<OffsetValue>) -> Self {
        Self {
            name: name.into(),
            index,
            values,
        }
    }

    /// The name this invocation was matched by (ex: `-x` or `--no-color`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The token index at which the invocation was matched.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The raw values consumed by this invocation.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(_, value)| value.as_str())
    }

    pub(crate) fn offset_values(&self) -> &[OffsetValue] {
        &self.values
    }
}

/// The finalized values of a single command level, keyed by parameter.
///
/// The key of an argument is its name.
/// The key of an option is its longest name, without the prefix (ex: `--dry-run` is keyed by `dry-run`).
#[derive(Debug, Clone, PartialEq)]
pub struct CommandValues {
    name: String,
    path: String,
    values: HashMap<String, Value>,
}

impl CommandValues {
    pub(crate) fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        values: HashMap<String, Value>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            values,
        }
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Build a [`CommandValues`] for use in testing command handlers.
    #[cfg(feature = "unit_test")]
    pub fn test_dummy(
        path: impl Into<String>,
        pairs: impl IntoIterator<Item = (&'static str, Value)>,
    ) -> Self {
        let path = path.into();
        let name = path.rsplit(' ').next().unwrap_or_default().to_string();
        Self::new(
            name,
            path,
            pairs
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    /// The command name of this level.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full command path of this level (ex: `program sub`).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The value of a parameter, or `None` if the command does not declare `key`.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The value of a parameter, extracted as `T`.
    ///
    /// Returns `None` if the command does not declare `key`, or the value does not fit `T`.
    pub fn get<T: FromValue>(&self, key: &str) -> Option<T> {
        self.values.get(key).and_then(T::from_value)
    }

    /// Whether the flag `key` is on.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(Value::Bool(true)))
    }

    /// The textual value of a parameter.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// The parameter keys of this level.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// A successful parse: the values for every command level that was invoked, from the root downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    levels: Vec<CommandValues>,
    route: Vec<usize>,
    tokens: Vec<String>,
}

impl Parsed {
    pub(crate) fn new(levels: Vec<CommandValues>, route: Vec<usize>, tokens: Vec<String>) -> Self {
        assert!(!levels.is_empty(), "internal error - a parse covers at least the root");
        Self {
            levels,
            route,
            tokens,
        }
    }

    /// Every invoked level, root first.
    pub fn levels(&self) -> &[CommandValues] {
        &self.levels
    }

    /// The values of the root command.
    pub fn root(&self) -> &CommandValues {
        &self.levels[0]
    }

    /// The values of the deepest invoked command.
    pub fn invoked(&self) -> &CommandValues {
        &self.levels[self.levels.len() - 1]
    }

    /// The values of the invoked sub-command named `name`; the root is never matched.
    pub fn command(&self, name: &str) -> Option<&CommandValues> {
        self.levels.iter().skip(1).find(|level| level.name() == name)
    }

    /// The tokens parsed, after alias expansion.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub(crate) fn route(&self) -> &[usize] {
        &self.route
    }
}
