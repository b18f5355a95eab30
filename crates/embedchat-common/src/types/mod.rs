mod color;
mod core;
mod locale;

pub use self::core::*;
pub use color::*;
pub use locale::*;
