mod capture;
mod context;
mod core;
mod parameter;
mod pipeline;

pub(crate) use self::capture::*;
pub use self::context::*;
pub use self::core::*;
pub use self::parameter::*;
pub use self::pipeline::*;
