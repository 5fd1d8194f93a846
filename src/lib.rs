pub mod args;
pub mod chart;
pub mod commands;
mod config;
mod error;
pub mod export;
pub mod model;
pub mod store;
mod utils;
pub mod view;


pub use config::Config;
pub use error::{Error, Field, Result, ValidationError};
