//! Pure data: the status registry and the order lookup types.

pub mod order;
pub mod status;

pub use order::*;
pub use status::*;
