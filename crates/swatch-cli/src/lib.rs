//! Library components of the swatch build step.

pub mod logging;
pub mod pipeline;
