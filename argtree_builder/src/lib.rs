//! Builder module for `argtree`.
//! See the `argtree` crate documentation for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{
    ConfigError, EarlyExit, ErrorContext, GeneralParser, ParameterClass, ParseError, ParseOutcome,
    UsageError, UsageFailure,
};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
