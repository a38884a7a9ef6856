use std::sync::Arc;

use crate::model::Value;

/// A conversion applied to every raw value of a parameter.
pub type Converter = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;
/// A check applied to the final value of a parameter.
pub type Validator = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;
/// A custom reduction over the per-invocation values of an option.
pub type Reducer = Arc<dyn Fn(Vec<Value>) -> Result<Value, String> + Send + Sync>;

/// How the per-invocation values of an option are combined into one.
#[derive(Clone)]
pub enum Reduce {
    /// The last invocation wins.
    Last,
    /// Every invocation, as a list.
    All,
    /// Every invocation, with list values spliced into a single list.
    Flatten,
    /// The number of invocations (a flag matched by a secondary name does not count).
    Count,
    /// A custom reduction.
    Custom(Reducer),
}

impl std::fmt::Debug for Reduce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reduce::Last => write!(f, "Last"),
            Reduce::All => write!(f, "All"),
            Reduce::Flatten => write!(f, "Flatten"),
            Reduce::Count => write!(f, "Count"),
            Reduce::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl Reduce {
    pub(crate) fn apply(&self, values: Vec<Value>) -> Result<Value, String> {
        match self {
            Reduce::Last => Ok(values.into_iter().last().unwrap_or(Value::Absent)),
            Reduce::All => Ok(Value::List(values)),
            Reduce::Flatten => Ok(Value::List(
                values
                    .into_iter()
                    .flat_map(|value| match value {
                        Value::List(items) => items,
                        other => vec![other],
                    })
                    .collect(),
            )),
            Reduce::Count => Ok(Value::Int(
                values
                    .iter()
                    .filter(|value| **value != Value::Bool(false))
                    .count() as i64,
            )),
            Reduce::Custom(reducer) => reducer(values),
        }
    }

    /// The value when an option is never invoked, and declares no default.
    pub(crate) fn empty(&self, is_flag: bool) -> Value {
        match self {
            Reduce::Count => Value::Int(0),
            Reduce::All | Reduce::Flatten => Value::List(Vec::default()),
            _ if is_flag => Value::Bool(false),
            _ => Value::Absent,
        }
    }
}

/// A step of the value pipeline of a parameter.
#[derive(Clone)]
pub enum Stage {
    /// Convert each raw value, in declaration order relative to other conversions.
    Convert(Converter),
    /// Combine the invocations of an option (the last declared reduction applies).
    Reduce(Reduce),
    /// Check the final value (skipped for [`Value::Absent`]).
    Validate(Validator),
    /// The value used when the parameter is not provided (the last declared default applies).
    Default(Value),
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Convert(_) => write!(f, "Convert(..)"),
            Stage::Reduce(reduce) => write!(f, "Reduce({reduce:?})"),
            Stage::Validate(_) => write!(f, "Validate(..)"),
            Stage::Default(value) => write!(f, "Default({value:?})"),
        }
    }
}

/// The ordered value stages of a parameter.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// The declared stages, in order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub(crate) fn push(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    pub(crate) fn convert(&self, raw: &str) -> Result<Value, String> {
        self.stages
            .iter()
            .try_fold(Value::Text(raw.to_string()), |value, stage| match stage {
                Stage::Convert(converter) => converter(value),
                _ => Ok(value),
            })
    }

    pub(crate) fn reduce(&self) -> Reduce {
        self.stages
            .iter()
            .rev()
            .find_map(|stage| match stage {
                Stage::Reduce(reduce) => Some(reduce.clone()),
                _ => None,
            })
            .unwrap_or(Reduce::Last)
    }

    pub(crate) fn default_value(&self) -> Option<&Value> {
        self.stages.iter().rev().find_map(|stage| match stage {
            Stage::Default(value) => Some(value),
            _ => None,
        })
    }

    pub(crate) fn validate(&self, value: &Value) -> Result<(), String> {
        if value.is_absent() {
            return Ok(());
        }

        self.stages.iter().try_for_each(|stage| match stage {
            Stage::Validate(validator) => validator(value),
            _ => Ok(()),
        })
    }
}
