//! Enumeration hooks invoked while walking a tree.

use std::path::Path;

use async_trait::async_trait;

use crate::error::WalkError;
use crate::node::{DirectoryNode, FileNode};

/// Location of the node currently being visited.
#[derive(Debug, Clone, Copy)]
pub struct VisitContext<'a> {
    /// Path relative to the tree root; empty for the root itself.
    pub path: &'a Path,

    /// Absolute path on disk.
    pub absolute: &'a Path,
}

/// Hooks invoked while a tree is built or re-traversed.
///
/// All methods default to no-ops, so implementors only override the events
/// they care about. Hooks are awaited one at a time in a fixed depth-first
/// order: a directory's enter fires before any of its children are visited,
/// each subtree completes before the next sibling starts, and a directory's
/// leave fires only after its whole subtree. A file's leave follows its enter
/// directly (after the loader ran, during construction).
///
/// Nodes are passed mutably so hooks may adjust payloads in place; renaming a
/// node here would desynchronize it from its parent's child map.
///
/// Returning an error aborts the pass.
#[async_trait]
pub trait WalkVisitor: Send {
    /// A directory node was reached, before its children.
    async fn on_directory_enter(
        &mut self,
        _dir: &mut DirectoryNode,
        _ctx: &VisitContext<'_>,
    ) -> Result<(), WalkError> {
        Ok(())
    }

    /// A directory node is done, after all of its children.
    async fn on_directory_leave(
        &mut self,
        _dir: &mut DirectoryNode,
        _ctx: &VisitContext<'_>,
    ) -> Result<(), WalkError> {
        Ok(())
    }

    /// A file node was reached, before its loader ran.
    async fn on_file_enter(
        &mut self,
        _file: &mut FileNode,
        _ctx: &VisitContext<'_>,
    ) -> Result<(), WalkError> {
        Ok(())
    }

    /// A file node is done.
    async fn on_file_leave(
        &mut self,
        _file: &mut FileNode,
        _ctx: &VisitContext<'_>,
    ) -> Result<(), WalkError> {
        Ok(())
    }
}

/// A visitor that does nothing, for walks that only build the tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopVisitor;

#[async_trait]
impl WalkVisitor for NoopVisitor {}
