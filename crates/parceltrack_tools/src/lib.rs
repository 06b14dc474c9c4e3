//! Operation surface for tool-hosting layers.
//!
//! A host (an agent tool server, the CLI) calls these entry points and
//! relays the returned text. Storage path resolution and the tool catalog
//! live here so every host exposes the same operations.

pub mod api;
pub mod catalog;
pub mod config;

pub use api::{InvokeError, PackageTools};
pub use catalog::{catalog, ToolArgument, ToolDescriptor, ToolKind, DELIVERED_RESOURCE_URI};
pub use config::{resolve_store_path, DEFAULT_STORE_FILE_NAME, STORE_PATH_ENV};
