//! Platform-agnostic simulation core - shared between the browser and the CLI

pub mod config;
pub mod links;
pub mod node;
pub mod physics;
pub mod rng;

pub use config::FieldConfig;
pub use links::{link_opacity, links, Link};
pub use node::{node_count_for, Node, NodeSet, Viewport};
pub use rng::field_rng;
