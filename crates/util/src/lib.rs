//! Formwright utility functions and helpers.

pub mod config;
pub mod interpolation;
pub mod text_processing;

pub use config::{ConfigError, FormConfig, default_config_path, expand_tilde};
pub use interpolation::{Interpolations, interpolate, placeholder_names};
pub use text_processing::{capitalize_first, humanize, pluralize};
