//! Filesystem walking engine for arbor.
//!
//! This crate builds an in-memory [`FileTree`] mirroring a directory
//! subtree:
//!
//! - **Construction pass** — [`Walker::init`] recursively indexes a root
//!   directory, firing enumeration hooks in depth-first order and
//!   dispatching per-extension [`Loader`]s that attach payloads to files.
//! - **Traversal pass** — [`Walker::traverse`] revisits the built tree with
//!   a fresh hook set, without touching the filesystem.
//! - **Queries** — bidirectional path⇄node conversion and ancestry tests.
//!
//! ```rust,ignore
//! use arbor_walk::{JsonLoader, TextLoader, WalkConfig, Walker};
//!
//! let mut walker = Walker::with_config(WalkConfig::builder().sort(true).build()?);
//! walker.loaders_mut()
//!     .register(".json", JsonLoader)
//!     .register(".txt", TextLoader);
//! walker.init("path/to/project").await?;
//!
//! let config = walker.path_string_to_node("config.json")?;
//! ```

mod config;
mod filter;
mod loader;
pub mod matcher;
mod walker;

pub use config::{WalkConfig, WalkConfigBuilder};
pub use filter::{Filter, FilterPredicate};
pub use loader::{JsonLoader, Loader, LoaderEntry, LoaderOptions, LoaderRegistry, TextLoader};
pub use walker::Walker;

// Re-export core types
pub use arbor_core::{
    DirectoryNode, FileNode, FileTree, JsonPayload, Node, NodeId, NodeKind, NoopVisitor, Payload,
    PayloadData, TextPayload, VisitContext, WalkError, WalkVisitor,
};
