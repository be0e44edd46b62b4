mod navbar;
mod title;

pub use navbar::*;
pub use title::*;
