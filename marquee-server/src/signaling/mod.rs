mod dispatch;
mod registry;
mod role;
mod room;

pub use dispatch::*;
pub use registry::*;
pub use role::*;
pub(crate) use room::*;
