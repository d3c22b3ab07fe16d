//! Core types and traversal for arbor.
//!
//! This crate provides the in-memory tree model shared by the arbor
//! ecosystem: arena-backed file and directory nodes, loader payloads, the
//! visitor protocol, path/node conversion and ancestry queries, and the
//! repeatable in-memory traversal pass. The filesystem-driven construction
//! engine lives in `arbor-walk`.

mod error;
mod node;
mod payload;
mod tree;
mod visitor;

pub use error::WalkError;
pub use node::{DirectoryNode, FileNode, Node, NodeId, NodeKind};
pub use payload::{JsonPayload, Payload, PayloadData, TextPayload};
pub use tree::FileTree;
pub use visitor::{NoopVisitor, VisitContext, WalkVisitor};
