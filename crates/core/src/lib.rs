mod fs;
mod kind;
mod source;
mod store;

pub use fs::*;
pub use kind::*;
pub use source::*;
pub use store::*;

pub type Status = status::Status;
pub type Result<T, E = Status> = std::result::Result<T, E>;
