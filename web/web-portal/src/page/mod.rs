mod config;
mod portal;

pub use config::*;
pub use portal::*;
