//! Recursive directory indexing engine.

use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use tracing::{debug, trace};

use arbor_core::{FileTree, NodeId, NodeKind, NoopVisitor, VisitContext, WalkError, WalkVisitor};

use crate::config::WalkConfig;
use crate::filter::CompiledFilter;
use crate::loader::LoaderRegistry;
use crate::matcher;

/// Builds and owns an in-memory mirror of a directory subtree.
///
/// A walker is configured once (config and loader registry), then
/// [`init`](Walker::init) performs the construction pass: a strictly
/// sequential depth-first descent that builds the tree, fires hooks in
/// pre-order-enter / post-order-leave order, and dispatches loaders by file
/// extension. Afterwards the built [`FileTree`] can be re-traversed and
/// queried any number of times without touching the filesystem.
///
/// `init` is all-or-nothing: any filesystem error, unsupported entry kind, or
/// loader rejection aborts the walk and leaves the walker uninitialized.
pub struct Walker {
    config: WalkConfig,
    loaders: LoaderRegistry,
    tree: Option<FileTree>,
}

impl Walker {
    /// Create a walker with the default configuration and no loaders.
    pub fn new() -> Self {
        Self::with_config(WalkConfig::default())
    }

    /// Create a walker with the given configuration.
    pub fn with_config(config: WalkConfig) -> Self {
        Self {
            config,
            loaders: LoaderRegistry::new(),
            tree: None,
        }
    }

    /// The walk configuration.
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Mutable access to the walk configuration, effective on the next
    /// `init`.
    pub fn config_mut(&mut self) -> &mut WalkConfig {
        &mut self.config
    }

    /// The loader registry.
    pub fn loaders(&self) -> &LoaderRegistry {
        &self.loaders
    }

    /// Mutable access to the loader registry, effective on the next `init`.
    pub fn loaders_mut(&mut self) -> &mut LoaderRegistry {
        &mut self.loaders
    }

    /// The built tree, or [`WalkError::Uninitialized`] before a successful
    /// `init`.
    pub fn tree(&self) -> Result<&FileTree, WalkError> {
        self.tree.as_ref().ok_or(WalkError::Uninitialized)
    }

    /// Mutable access to the built tree, for surgical edits such as
    /// [`FileTree::detach`] or payload reassignment.
    pub fn tree_mut(&mut self) -> Result<&mut FileTree, WalkError> {
        self.tree.as_mut().ok_or(WalkError::Uninitialized)
    }

    /// Consume the walker, returning the built tree.
    pub fn into_tree(self) -> Result<FileTree, WalkError> {
        self.tree.ok_or(WalkError::Uninitialized)
    }

    // ==================== Construction ====================

    /// Build the tree for `root` without construction hooks.
    pub async fn init(&mut self, root: impl AsRef<Path>) -> Result<(), WalkError> {
        self.init_with(root, &mut NoopVisitor).await
    }

    /// Build the tree for `root`, firing `visitor` hooks as nodes are
    /// discovered.
    ///
    /// Calling this on an already-initialized walker discards the prior tree
    /// up front, so a failed re-init leaves the walker uninitialized rather
    /// than holding a stale or partial tree.
    pub async fn init_with(
        &mut self,
        root: impl AsRef<Path>,
        visitor: &mut dyn WalkVisitor,
    ) -> Result<(), WalkError> {
        self.tree = None;

        let root = root.as_ref();
        let root_path = tokio::fs::canonicalize(root)
            .await
            .map_err(|err| WalkError::io(root, err))?;
        let metadata = tokio::fs::metadata(&root_path)
            .await
            .map_err(|err| WalkError::io(&root_path, err))?;
        if !metadata.is_dir() {
            return Err(WalkError::NotADirectory { path: root_path });
        }

        let filter = match &self.config.filter {
            Some(filter) => Some(CompiledFilter::compile(filter)?),
            None => None,
        };

        debug!(root = %root_path.display(), "building directory index");

        let mut tree = FileTree::new(root_path.clone());
        let root_id = tree.root();
        self.walk_directory(
            &mut tree,
            root_id,
            root_path,
            PathBuf::new(),
            filter.as_ref(),
            visitor,
        )
        .await?;

        debug!(nodes = tree.len(), "directory index complete");
        self.tree = Some(tree);
        Ok(())
    }

    fn walk_directory<'a>(
        &'a self,
        tree: &'a mut FileTree,
        id: NodeId,
        abs: PathBuf,
        rel: PathBuf,
        filter: Option<&'a CompiledFilter>,
        visitor: &'a mut dyn WalkVisitor,
    ) -> BoxFuture<'a, Result<(), WalkError>> {
        Box::pin(async move {
            trace!(path = %abs.display(), "entering directory");
            {
                let ctx = VisitContext {
                    path: &rel,
                    absolute: &abs,
                };
                if let Some(dir) = tree.directory_mut(id) {
                    visitor.on_directory_enter(dir, &ctx).await?;
                }
            }

            let mut entries = Vec::new();
            let mut listing = tokio::fs::read_dir(&abs)
                .await
                .map_err(|err| WalkError::io(&abs, err))?;
            while let Some(entry) = listing
                .next_entry()
                .await
                .map_err(|err| WalkError::io(&abs, err))?
            {
                let name = entry.file_name().to_string_lossy().into_owned();
                if self.config.should_ignore(&name) {
                    continue;
                }
                entries.push(name);
            }

            if self.config.sort {
                entries.sort();
            }

            for name in entries {
                let entry_abs = abs.join(&name);
                let metadata = tokio::fs::metadata(&entry_abs)
                    .await
                    .map_err(|err| WalkError::io(&entry_abs, err))?;
                let kind = if metadata.is_dir() {
                    NodeKind::Directory
                } else if metadata.is_file() {
                    NodeKind::File
                } else {
                    return Err(WalkError::UnsupportedEntry { path: entry_abs });
                };

                if let Some(filter) = filter {
                    if !filter.includes(&name, &entry_abs, kind) {
                        trace!(name = %name, "entry excluded by filter");
                        continue;
                    }
                }

                match kind {
                    NodeKind::Directory => {
                        let child = tree.push_directory(name.as_str(), id);
                        let child_rel = rel.join(&name);
                        self.walk_directory(tree, child, entry_abs, child_rel, filter, visitor)
                            .await?;
                        tree.attach_directory(id, child);
                    }
                    NodeKind::File => {
                        self.read_file(tree, id, &name, &entry_abs, &rel, visitor)
                            .await?;
                    }
                }
            }

            {
                let ctx = VisitContext {
                    path: &rel,
                    absolute: &abs,
                };
                if let Some(dir) = tree.directory_mut(id) {
                    visitor.on_directory_leave(dir, &ctx).await?;
                }
            }
            Ok(())
        })
    }

    async fn read_file(
        &self,
        tree: &mut FileTree,
        parent: NodeId,
        name: &str,
        abs: &Path,
        parent_rel: &Path,
        visitor: &mut dyn WalkVisitor,
    ) -> Result<(), WalkError> {
        let id = tree.push_file(name, parent);
        let rel = parent_rel.join(name);
        let ctx = VisitContext {
            path: &rel,
            absolute: abs,
        };

        if let Some(file) = tree.file_mut(id) {
            visitor.on_file_enter(file, &ctx).await?;
        }

        let extension = matcher::file_extension(name);
        if let Some(entry) = self.loaders.get(&extension) {
            trace!(path = %abs.display(), extension = %extension, "dispatching loader");
            let payload = entry.load(abs).await?;
            if let Some(file) = tree.file_mut(id) {
                file.payload = Some(payload);
            }
        }

        if let Some(file) = tree.file_mut(id) {
            visitor.on_file_leave(file, &ctx).await?;
        }

        tree.attach_file(parent, id);
        Ok(())
    }

    // ==================== Re-traversal ====================

    /// Revisit the built tree with a fresh set of hooks, in the same order
    /// as the construction pass. Purely in-memory and repeatable.
    pub async fn traverse(&mut self, visitor: &mut dyn WalkVisitor) -> Result<(), WalkError> {
        self.tree_mut()?.traverse(visitor).await
    }

    // ==================== Queries ====================

    /// See [`FileTree::path_to_node`].
    pub fn path_to_node<S: AsRef<str>>(&self, path: &[S]) -> Result<Option<NodeId>, WalkError> {
        Ok(self.tree()?.path_to_node(path))
    }

    /// See [`FileTree::path_string_to_node`].
    pub fn path_string_to_node(&self, path: &str) -> Result<Option<NodeId>, WalkError> {
        Ok(self.tree()?.path_string_to_node(path))
    }

    /// See [`FileTree::path_string_to_node_with`].
    pub fn path_string_to_node_with(
        &self,
        path: &str,
        separator: char,
    ) -> Result<Option<NodeId>, WalkError> {
        Ok(self.tree()?.path_string_to_node_with(path, separator))
    }

    /// See [`FileTree::node_to_path`].
    pub fn node_to_path(
        &self,
        id: NodeId,
        absolute: bool,
    ) -> Result<Option<Vec<String>>, WalkError> {
        Ok(self.tree()?.node_to_path(id, absolute))
    }

    /// See [`FileTree::node_to_path_string`].
    pub fn node_to_path_string(
        &self,
        id: NodeId,
        absolute: bool,
    ) -> Result<Option<String>, WalkError> {
        Ok(self.tree()?.node_to_path_string(id, absolute))
    }

    /// See [`FileTree::is_inside_directory`].
    pub fn is_inside_directory<S: AsRef<str>>(
        &self,
        id: NodeId,
        fragments: &[S],
    ) -> Result<bool, WalkError> {
        Ok(self.tree()?.is_inside_directory(id, fragments))
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new()
    }
}
