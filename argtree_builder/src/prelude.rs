//! The common imports for `argtree` command lines.
pub use crate::api::{CommandLineParser, Context, Eager, Parameter, Reduce};
pub use crate::model::{CommandValues, Nargs, Value};
pub use crate::parser::{GeneralParser, ParseOutcome};

/// Behaviour for extracting a typed value out of a finalized [`Value`].
pub trait FromValue: Sized {
    /// Extract `Self`, or `None` when the value does not fit.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_int()
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(number) => Some(*number),
            Value::Int(number) => Some(*number as f64),
            _ => None,
        }
    }
}

macro_rules! integer_from_value {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> Option<Self> {
                    value.as_int().and_then(|number| <$t>::try_from(number).ok())
                }
            }
        )*
    };
}

integer_from_value!(i32, u8, u32, u64, usize);

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_list()?.iter().map(T::from_value).collect()
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Absent => Some(None),
            _ => T::from_value(value).map(Some),
        }
    }
}
