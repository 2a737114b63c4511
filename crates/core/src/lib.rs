pub mod constraint_system;
pub mod error;
pub mod field;
pub mod shape;

pub use constraint_system::*;
pub use error::{ConstraintSystemError, ShapeError};
pub use field::Fr;
pub use shape::CircuitShape;
