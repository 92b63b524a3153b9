//! Entry points into the tracking panel from outside: deep-link parameters.

pub mod deep_link;

pub use deep_link::*;
