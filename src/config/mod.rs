//! Configuration loading and management for the Attendance Classification Engine.
//!
//! This module provides the [`ClassificationPolicy`] every classification runs
//! against and the [`ConfigLoader`] that reads it from YAML.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Overtime after {} minutes", loader.policy().overtime_threshold_minutes);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::ClassificationPolicy;
