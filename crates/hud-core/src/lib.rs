pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod palette;
pub mod paths;
pub mod primitive;
pub mod scene;

pub use error::{HudError, Result};
