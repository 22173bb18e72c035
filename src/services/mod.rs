//! Core services: validation, compilation, and event routing.

pub mod compiler;
pub mod keycodes;
pub mod router;
pub mod validator;

pub use compiler::compile;
pub use keycodes::physical_key_code;
pub use router::KeyEventRouter;
pub use validator::validate;
