pub mod env;
mod loader;

pub use env::{AppConfig, DirectoryConfig, ModelConfig, WebContentConfig};
pub use loader::load_config;
