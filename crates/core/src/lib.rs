pub mod config;
pub mod error;
pub mod tags;
pub mod types;

pub use config::{Config, TmdbSettings};
pub use error::CoreError;
