//! Configuration and dispatch settings

mod config;

pub use config::{Config, Settings, CONFIG_DIR_ENV};
