use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::api::Converter;
use crate::model::Value;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InvalidCapture {
    #[error("cannot convert '{token}' to {type_name}.")]
    InvalidConversion {
        token: String,
        type_name: &'static str,
    },
}

/// Convert a textual value via `T::from_str`, keeping the result as a [`Value`].
pub(crate) fn from_str_converter<T>() -> Converter
where
    T: FromStr + Into<Value> + 'static,
{
    Arc::new(|value: Value| {
        let token = value.to_string();
        T::from_str(&token).map(Into::into).map_err(|_| {
            InvalidCapture::InvalidConversion {
                token,
                type_name: std::any::type_name::<T>(),
            }
            .to_string()
        })
    })
}
