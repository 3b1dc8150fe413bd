/// Output units and their size ceilings.
pub mod granularity;

/// Request bounds and sentence/paragraph shape.
pub mod generation_input;

mod engine;

pub use engine::{check_bounds, generate, generate_default, Generator};
