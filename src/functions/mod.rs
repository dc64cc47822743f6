// Functions are organized by concern
pub mod builtins;
pub mod linear;
pub mod sampling;

pub use builtins::*;
pub use linear::*;
pub use sampling::*;
