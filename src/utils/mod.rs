mod display;
mod helpers;
mod logging;

pub use display::*;
pub use helpers::*;
pub use logging::*;
