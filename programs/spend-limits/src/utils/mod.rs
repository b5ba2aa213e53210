#[macro_use]
mod macros;

mod helpers;
pub use helpers::*;

mod pdas;
pub use pdas::*;
