mod api;
mod core;
mod model;
mod option;
mod positional;
mod registry;
mod suggest;

pub(crate) use self::api::*;
pub(crate) use self::core::*;
pub(crate) use self::model::*;
pub(crate) use self::positional::*;
pub(crate) use self::registry::*;
