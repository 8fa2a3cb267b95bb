//! Cluster API access.
//!
//! - [`ClusterClient`] - JSON over HTTP to the API server
//! - [`mapper`] - collection paths for resource kinds

pub mod client;
pub mod mapper;

pub use client::ClusterClient;
pub use mapper::{collection_path, plural};
