mod fanout;
mod handle;
mod manager;

pub use fanout::*;
pub use handle::*;
pub use manager::*;
