//! Configuration for wavefx
//!
//! - Generic YAML config loading/saving
//! - Default config path
//! - Editing configuration (`EditConfig`)
//!
//! # Usage
//!
//! ```ignore
//! use wavefx_core::config::{default_config_path, load_config, save_config, EditConfig};
//!
//! let config: EditConfig = load_config(&default_config_path());
//! save_config(&config, &default_config_path())?;
//! ```

mod edit;
mod io;
mod paths;

pub use edit::{EditConfig, OutputFormat};
pub use io::{load_config, read_config, save_config};
pub use paths::{default_config_dir, default_config_path};
