//! # Kgraph Configuration
//!
//! Typed configuration for a knowledge graph: its identity, its vector
//! collection and its projection overrides.
//!
//! ## Features
//!
//! - Multi-format support (TOML, YAML, JSON)
//! - Defaults for every field, so partial files are valid
//! - Validation on load
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kgraph_config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::load_from_file("kgraph.toml").await?;
//!     println!("graph {}", config.graph.uri);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod loader;

pub use config::*;
pub use error::ConfigError;
pub use loader::*;
