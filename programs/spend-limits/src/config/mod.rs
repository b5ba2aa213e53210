mod constants;
pub use constants::*;

mod errors;
pub use errors::*;

mod settings;
pub use settings::*;
