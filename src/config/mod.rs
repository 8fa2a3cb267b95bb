//! Cluster connection configuration.
//!
//! Settings come from a YAML file, then environment variables, then flags.

pub mod loader;
pub mod schema;

pub use loader::{load_cluster_config, load_config_file, parse_config, user_config_path};
pub use schema::{ClusterConfig, DEFAULT_NAMESPACE};
