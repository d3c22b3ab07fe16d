//! Arena-backed directory tree with path resolution and traversal.

use std::path::{Component, Path, PathBuf};

use compact_str::CompactString;
use futures::future::BoxFuture;

use crate::error::WalkError;
use crate::node::{DirectoryNode, FileNode, Node, NodeId};
use crate::visitor::{VisitContext, WalkVisitor};

/// An in-memory mirror of a directory subtree.
///
/// Nodes live in a flat arena indexed by [`NodeId`]; parent and child links
/// are ids, never owning references, so the tree has no ownership cycles. The
/// id of a node doubles as its arena index and is assigned in discovery
/// order, starting at 0 for the root.
///
/// The tree is built once by an engine (or by hand via [`push_directory`] /
/// [`attach_directory`] and the file equivalents) and is structurally
/// immutable afterwards except for [`detach`] and payload reassignment.
///
/// [`push_directory`]: FileTree::push_directory
/// [`attach_directory`]: FileTree::attach_directory
/// [`detach`]: FileTree::detach
#[derive(Debug)]
pub struct FileTree {
    nodes: Vec<Node>,
    root: NodeId,
    root_path: PathBuf,
    root_segments: Vec<String>,
}

impl FileTree {
    /// Create a tree holding only a root directory node.
    ///
    /// `root_path` is expected to be absolute and normalized; the root node's
    /// name is its base name.
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        let root_path = root_path.into();
        let name = root_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root_path.to_string_lossy().into_owned());
        let root_segments = root_path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let root = NodeId::new(0);
        let nodes = vec![Node::Directory(DirectoryNode::new(root, name, None))];

        Self {
            nodes,
            root,
            root_path,
            root_segments,
        }
    }

    /// Id of the root directory node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Absolute path of the walked root directory.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// The root path split into segments, used for absolute conversions.
    pub fn root_segments(&self) -> &[String] {
        &self.root_segments
    }

    /// Total number of nodes in the arena, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the arena holds no nodes; never the case for a built tree.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ==================== Node access ====================

    /// Borrow a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Borrow a node mutably by id.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Borrow a directory node by id.
    pub fn directory(&self, id: NodeId) -> Option<&DirectoryNode> {
        self.node(id).and_then(Node::as_directory)
    }

    /// Borrow a directory node mutably by id.
    pub fn directory_mut(&mut self, id: NodeId) -> Option<&mut DirectoryNode> {
        self.node_mut(id).and_then(Node::as_directory_mut)
    }

    /// Borrow a file node by id.
    pub fn file(&self, id: NodeId) -> Option<&FileNode> {
        self.node(id).and_then(Node::as_file)
    }

    /// Borrow a file node mutably by id.
    pub fn file_mut(&mut self, id: NodeId) -> Option<&mut FileNode> {
        self.node_mut(id).and_then(Node::as_file_mut)
    }

    // ==================== Construction ====================

    /// Allocate a directory node under `parent`, assigning the next id.
    ///
    /// The node is not yet listed in its parent's child map; call
    /// [`attach_directory`](FileTree::attach_directory) once its subtree is
    /// complete.
    pub fn push_directory(&mut self, name: impl Into<CompactString>, parent: NodeId) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u64);
        self.nodes
            .push(Node::Directory(DirectoryNode::new(id, name, Some(parent))));
        id
    }

    /// Allocate a file node under `parent`, assigning the next id.
    ///
    /// The node is not yet listed in its parent's child map; call
    /// [`attach_file`](FileTree::attach_file) when it is ready.
    pub fn push_file(&mut self, name: impl Into<CompactString>, parent: NodeId) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u64);
        self.nodes
            .push(Node::File(FileNode::new(id, name, Some(parent))));
        id
    }

    /// Link a directory node into `parent`'s child map and bump the count.
    ///
    /// Returns false when either id does not resolve to the required kind.
    pub fn attach_directory(&mut self, parent: NodeId, child: NodeId) -> bool {
        let name = match self.directory(child) {
            Some(dir) => dir.name.clone(),
            None => return false,
        };
        let Some(dir) = self.directory_mut(parent) else {
            return false;
        };
        if dir.directories.insert(name, child).is_none() {
            dir.directory_count += 1;
        }
        if let Some(dir) = self.directory_mut(child) {
            dir.parent = Some(parent);
        }
        true
    }

    /// Link a file node into `parent`'s child map and bump the count.
    ///
    /// Returns false when either id does not resolve to the required kind.
    pub fn attach_file(&mut self, parent: NodeId, child: NodeId) -> bool {
        let name = match self.file(child) {
            Some(file) => file.name.clone(),
            None => return false,
        };
        let Some(dir) = self.directory_mut(parent) else {
            return false;
        };
        if dir.files.insert(name, child).is_none() {
            dir.file_count += 1;
        }
        if let Some(file) = self.file_mut(child) {
            file.parent = Some(parent);
        }
        true
    }

    /// Remove a node from its parent's child map, keeping counts in sync.
    ///
    /// The node and its subtree stay in the arena (ids remain valid) but are
    /// no longer reachable from the root; the node's parent link is cleared.
    /// Returns false for the root or for a node that is not attached.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let (name, parent, is_dir) = match self.node(id) {
            Some(node) => match node.parent() {
                Some(parent) => (
                    CompactString::from(node.name()),
                    parent,
                    node.is_dir(),
                ),
                None => return false,
            },
            None => return false,
        };

        let Some(dir) = self.directory_mut(parent) else {
            return false;
        };
        let removed = if is_dir {
            if dir.directories.shift_remove(name.as_str()).is_some() {
                dir.directory_count -= 1;
                true
            } else {
                false
            }
        } else if dir.files.shift_remove(name.as_str()).is_some() {
            dir.file_count -= 1;
            true
        } else {
            false
        };

        if removed {
            match self.node_mut(id) {
                Some(Node::Directory(d)) => d.parent = None,
                Some(Node::File(f)) => f.parent = None,
                None => {}
            }
        }
        removed
    }

    // ==================== Path/node conversion ====================

    /// Resolve a path, given as segments, to a node id.
    ///
    /// Every segment but the last must name a directory; the last is looked
    /// up among the current directory's files first, then its directories. A
    /// leading prefix equal to the root's own segments is stripped, so
    /// absolute segment lists are accepted. An empty path resolves to the
    /// root. Any miss yields None rather than an error.
    pub fn path_to_node<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeId> {
        let path = self.strip_root_segments(path);

        let Some((last, ancestors)) = path.split_last() else {
            return Some(self.root);
        };

        let mut current = self.root;
        for segment in ancestors {
            let dir = self.directory(current)?;
            current = dir.directories.get(segment.as_ref()).copied()?;
        }

        let dir = self.directory(current)?;
        dir.files
            .get(last.as_ref())
            .or_else(|| dir.directories.get(last.as_ref()))
            .copied()
    }

    /// Resolve a path string to a node id, splitting on the platform
    /// separator.
    pub fn path_string_to_node(&self, path: &str) -> Option<NodeId> {
        self.path_string_to_node_with(path, std::path::MAIN_SEPARATOR)
    }

    /// Resolve a path string to a node id, splitting on `separator`.
    ///
    /// A leading root-path prefix is stripped when the input is absolute;
    /// empty and `.` segments are ignored.
    pub fn path_string_to_node_with(&self, path: &str, separator: char) -> Option<NodeId> {
        let root = self.root_path.to_string_lossy();
        let path = match path.strip_prefix(root.as_ref()) {
            Some(rest) if rest.is_empty() || rest.starts_with(separator) => rest,
            _ => path,
        };
        let segments: Vec<&str> = path
            .split(separator)
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        self.path_to_node(&segments)
    }

    /// Path of a node as segments, walking the parent chain back to the root.
    ///
    /// The root's own name is not included; with `absolute` the root path's
    /// segments are prepended. None when the id does not resolve.
    pub fn node_to_path(&self, id: NodeId, absolute: bool) -> Option<Vec<String>> {
        let mut node = self.node(id)?;
        let mut buffer = Vec::new();
        while let Some(parent) = node.parent() {
            buffer.push(node.name().to_string());
            node = self.node(parent)?;
        }
        buffer.reverse();

        if absolute {
            let mut segments = self.root_segments.clone();
            segments.append(&mut buffer);
            Some(segments)
        } else {
            Some(buffer)
        }
    }

    /// Path of a node as a string joined with the platform separator.
    ///
    /// Relative form is empty for the root; absolute form joins onto the
    /// root path.
    pub fn node_to_path_string(&self, id: NodeId, absolute: bool) -> Option<String> {
        let relative = self.node_to_path(id, false)?.join(std::path::MAIN_SEPARATOR_STR);
        if !absolute {
            return Some(relative);
        }
        if relative.is_empty() {
            Some(self.root_path.to_string_lossy().into_owned())
        } else {
            Some(
                self.root_path
                    .join(&relative)
                    .to_string_lossy()
                    .into_owned(),
            )
        }
    }

    // ==================== Ancestry ====================

    /// Check whether a node sits below a contiguous run of ancestor names.
    ///
    /// Walks upward from the node's parent, matching `fragments` back to
    /// front. Once matching has begun every ancestor must equal the next
    /// expected fragment; a gap fails the test. True when all fragments are
    /// consumed, false when the root is reached first or the fragment list is
    /// empty.
    pub fn is_inside_directory<S: AsRef<str>>(&self, id: NodeId, fragments: &[S]) -> bool {
        if fragments.is_empty() {
            return false;
        }

        let mut current = match self.node(id) {
            Some(node) => node.parent(),
            None => return false,
        };
        let mut remaining = fragments.len();
        let mut matching = false;

        while let Some(id) = current {
            let Some(node) = self.node(id) else {
                return false;
            };
            if node.name() == fragments[remaining - 1].as_ref() {
                matching = true;
                remaining -= 1;
                if remaining == 0 {
                    return true;
                }
            } else if matching {
                return false;
            }
            current = node.parent();
        }

        false
    }

    // ==================== Traversal ====================

    /// Revisit the already-built tree with a fresh set of hooks.
    ///
    /// Purely in-memory; the filesystem is not consulted. The visit order is
    /// the construction order: children in discovery (id) order, pre-order
    /// enter, post-order leave, each subtree completing before the next
    /// sibling. May be called any number of times.
    pub async fn traverse(&mut self, visitor: &mut dyn WalkVisitor) -> Result<(), WalkError> {
        let root = self.root;
        self.visit_directory(root, PathBuf::new(), visitor).await
    }

    fn visit_directory<'a>(
        &'a mut self,
        id: NodeId,
        rel: PathBuf,
        visitor: &'a mut dyn WalkVisitor,
    ) -> BoxFuture<'a, Result<(), WalkError>> {
        Box::pin(async move {
            let abs = if rel.as_os_str().is_empty() {
                self.root_path.clone()
            } else {
                self.root_path.join(&rel)
            };

            {
                let ctx = VisitContext {
                    path: &rel,
                    absolute: &abs,
                };
                if let Some(dir) = self.directory_mut(id) {
                    visitor.on_directory_enter(dir, &ctx).await?;
                }
            }

            let children = {
                let Some(dir) = self.directory(id) else {
                    return Ok(());
                };
                let mut ids: Vec<NodeId> = dir
                    .directories
                    .values()
                    .chain(dir.files.values())
                    .copied()
                    .collect();
                // Id order is discovery order, interleaving files and
                // directories exactly as construction saw them.
                ids.sort_unstable();
                ids
            };

            for child in children {
                let (is_dir, name) = match self.node(child) {
                    Some(node) => (node.is_dir(), node.name().to_string()),
                    None => continue,
                };
                let child_rel = rel.join(&name);

                if is_dir {
                    self.visit_directory(child, child_rel, visitor).await?;
                } else {
                    let child_abs = self.root_path.join(&child_rel);
                    let ctx = VisitContext {
                        path: &child_rel,
                        absolute: &child_abs,
                    };
                    if let Some(file) = self.file_mut(child) {
                        visitor.on_file_enter(file, &ctx).await?;
                    }
                    if let Some(file) = self.file_mut(child) {
                        visitor.on_file_leave(file, &ctx).await?;
                    }
                }
            }

            {
                let ctx = VisitContext {
                    path: &rel,
                    absolute: &abs,
                };
                if let Some(dir) = self.directory_mut(id) {
                    visitor.on_directory_leave(dir, &ctx).await?;
                }
            }

            Ok(())
        })
    }

    fn strip_root_segments<'a, S: AsRef<str>>(&self, path: &'a [S]) -> &'a [S] {
        if !self.root_segments.is_empty()
            && path.len() >= self.root_segments.len()
            && self
                .root_segments
                .iter()
                .zip(path)
                .all(|(root, given)| root.as_str() == given.as_ref())
        {
            &path[self.root_segments.len()..]
        } else {
            path
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ModuleA holds file1/file2, ModuleB holds file3/file4, mirroring a
    /// two-module source layout.
    fn sample_tree() -> FileTree {
        let mut tree = FileTree::new("/base/project");
        let root = tree.root();

        let module_a = tree.push_directory("ModuleA", root);
        let file1 = tree.push_file("file1.js", module_a);
        tree.attach_file(module_a, file1);
        let file2 = tree.push_file("file2.js", module_a);
        tree.attach_file(module_a, file2);
        tree.attach_directory(root, module_a);

        let module_b = tree.push_directory("ModuleB", root);
        let file3 = tree.push_file("file3.js", module_b);
        tree.attach_file(module_b, file3);
        let file4 = tree.push_file("file4.js", module_b);
        tree.attach_file(module_b, file4);
        tree.attach_directory(root, module_b);

        tree
    }

    #[test]
    fn test_root_metadata() {
        let tree = sample_tree();
        assert_eq!(tree.root(), NodeId::new(0));
        assert_eq!(tree.root_path(), Path::new("/base/project"));
        assert_eq!(tree.root_segments(), ["base", "project"]);
        assert_eq!(tree.directory(tree.root()).unwrap().name.as_str(), "project");
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn test_counts_match_maps() {
        let tree = sample_tree();
        let root = tree.directory(tree.root()).unwrap();
        assert_eq!(root.directory_count, root.directories.len());
        assert_eq!(root.file_count, root.files.len());
        assert_eq!(root.directory_count, 2);
        assert_eq!(root.file_count, 0);

        for id in root.directories.values() {
            let dir = tree.directory(*id).unwrap();
            assert_eq!(dir.directory_count, dir.directories.len());
            assert_eq!(dir.file_count, dir.files.len());
            assert_eq!(dir.file_count, 2);
        }
    }

    #[test]
    fn test_path_to_node() {
        let tree = sample_tree();

        let dir = tree.path_to_node(&["ModuleA"]).unwrap();
        assert_eq!(tree.node(dir).unwrap().name(), "ModuleA");
        assert!(tree.node(dir).unwrap().is_dir());

        let file = tree.path_to_node(&["ModuleA", "file1.js"]).unwrap();
        assert_eq!(tree.node(file).unwrap().name(), "file1.js");
        assert!(tree.node(file).unwrap().is_file());

        assert_eq!(tree.path_to_node::<&str>(&[]), Some(tree.root()));
        assert_eq!(tree.path_to_node(&["ModuleC"]), None);
        assert_eq!(tree.path_to_node(&["ModuleC", "file7.js"]), None);
        assert_eq!(tree.path_to_node(&["ModuleA", "missing.js"]), None);
    }

    #[test]
    fn test_path_to_node_absolute_segments() {
        let tree = sample_tree();
        let relative = tree.path_to_node(&["ModuleA", "file1.js"]).unwrap();
        let absolute = tree
            .path_to_node(&["base", "project", "ModuleA", "file1.js"])
            .unwrap();
        assert_eq!(relative, absolute);
    }

    #[test]
    fn test_path_string_to_node() {
        let tree = sample_tree();

        let by_parts = tree.path_to_node(&["ModuleA", "file1.js"]).unwrap();
        assert_eq!(tree.path_string_to_node("ModuleA/file1.js"), Some(by_parts));
        assert_eq!(
            tree.path_string_to_node("/base/project/ModuleA/file1.js"),
            Some(by_parts)
        );
        assert_eq!(tree.path_string_to_node("./ModuleA/file1.js"), Some(by_parts));
        assert_eq!(tree.path_string_to_node("ModuleC/file7.js"), None);
    }

    #[test]
    fn test_node_to_path() {
        let tree = sample_tree();
        let file = tree.path_to_node(&["ModuleA", "file1.js"]).unwrap();

        assert_eq!(
            tree.node_to_path(file, false).unwrap(),
            ["ModuleA", "file1.js"]
        );
        assert_eq!(
            tree.node_to_path(file, true).unwrap(),
            ["base", "project", "ModuleA", "file1.js"]
        );
        assert_eq!(
            tree.node_to_path_string(file, false).unwrap(),
            "ModuleA/file1.js"
        );
        assert_eq!(
            tree.node_to_path_string(file, true).unwrap(),
            "/base/project/ModuleA/file1.js"
        );

        assert_eq!(tree.node_to_path_string(tree.root(), false).unwrap(), "");
        assert_eq!(
            tree.node_to_path_string(tree.root(), true).unwrap(),
            "/base/project"
        );
    }

    #[test]
    fn test_round_trip_all_nodes() {
        let tree = sample_tree();
        for index in 0..tree.len() {
            let id = NodeId::new(index as u64);
            let path = tree.node_to_path(id, false).unwrap();
            assert_eq!(tree.path_to_node(&path), Some(id), "round trip for {path:?}");

            let as_string = tree.node_to_path_string(id, true).unwrap();
            assert_eq!(tree.path_string_to_node(&as_string), Some(id));
        }
    }

    #[test]
    fn test_is_inside_directory() {
        let tree = sample_tree();
        let file1 = tree.path_to_node(&["ModuleA", "file1.js"]).unwrap();
        let file3 = tree.path_to_node(&["ModuleB", "file3.js"]).unwrap();

        assert!(tree.is_inside_directory(file1, &["ModuleA"]));
        assert!(!tree.is_inside_directory(file3, &["ModuleA"]));
        assert!(tree.is_inside_directory(file1, &["project", "ModuleA"]));
        assert!(!tree.is_inside_directory(file1, &["ModuleA", "ModuleB"]));
        assert!(!tree.is_inside_directory::<&str>(file1, &[]));
    }

    #[test]
    fn test_is_inside_directory_requires_contiguity() {
        let mut tree = FileTree::new("/base/project");
        let root = tree.root();
        let outer = tree.push_directory("outer", root);
        let middle = tree.push_directory("middle", outer);
        let inner = tree.push_directory("inner", middle);
        let file = tree.push_file("deep.txt", inner);
        tree.attach_file(inner, file);
        tree.attach_directory(middle, inner);
        tree.attach_directory(outer, middle);
        tree.attach_directory(root, outer);

        assert!(tree.is_inside_directory(file, &["middle", "inner"]));
        assert!(tree.is_inside_directory(file, &["outer", "middle", "inner"]));
        // "outer" and "inner" are both ancestors but not adjacent.
        assert!(!tree.is_inside_directory(file, &["outer", "inner"]));
    }

    #[test]
    fn test_detach_file() {
        let mut tree = sample_tree();
        let file = tree.path_to_node(&["ModuleA", "file1.js"]).unwrap();
        let module_a = tree.path_to_node(&["ModuleA"]).unwrap();

        assert!(tree.detach(file));
        let dir = tree.directory(module_a).unwrap();
        assert_eq!(dir.file_count, 1);
        assert_eq!(dir.files.len(), 1);
        assert_eq!(tree.path_to_node(&["ModuleA", "file1.js"]), None);
        assert!(tree.file(file).unwrap().parent.is_none());

        // A second detach of the same node is a no-op.
        assert!(!tree.detach(file));
    }

    #[test]
    fn test_detach_directory_and_root() {
        let mut tree = sample_tree();
        let module_b = tree.path_to_node(&["ModuleB"]).unwrap();

        assert!(tree.detach(module_b));
        let root = tree.directory(tree.root()).unwrap();
        assert_eq!(root.directory_count, 1);
        assert_eq!(tree.path_to_node(&["ModuleB", "file3.js"]), None);

        assert!(!tree.detach(tree.root()));
    }

    #[test]
    fn test_reattach_after_detach() {
        let mut tree = sample_tree();
        let module_b = tree.path_to_node(&["ModuleB"]).unwrap();
        let root = tree.root();

        assert!(tree.detach(module_b));
        assert!(tree.attach_directory(root, module_b));

        let dir = tree.directory(root).unwrap();
        assert_eq!(dir.directory_count, 2);
        assert_eq!(tree.path_to_node(&["ModuleB"]), Some(module_b));
    }

    mod traversal {
        use super::*;
        use crate::node::{DirectoryNode, FileNode};
        use async_trait::async_trait;

        #[derive(Default)]
        struct Recorder {
            enters: Vec<String>,
            leaves: Vec<String>,
        }

        #[async_trait]
        impl WalkVisitor for Recorder {
            async fn on_directory_enter(
                &mut self,
                _dir: &mut DirectoryNode,
                ctx: &VisitContext<'_>,
            ) -> Result<(), WalkError> {
                self.enters.push(ctx.path.to_string_lossy().into_owned());
                Ok(())
            }

            async fn on_directory_leave(
                &mut self,
                _dir: &mut DirectoryNode,
                ctx: &VisitContext<'_>,
            ) -> Result<(), WalkError> {
                self.leaves.push(ctx.path.to_string_lossy().into_owned());
                Ok(())
            }

            async fn on_file_enter(
                &mut self,
                _file: &mut FileNode,
                ctx: &VisitContext<'_>,
            ) -> Result<(), WalkError> {
                self.enters.push(ctx.path.to_string_lossy().into_owned());
                Ok(())
            }

            async fn on_file_leave(
                &mut self,
                _file: &mut FileNode,
                ctx: &VisitContext<'_>,
            ) -> Result<(), WalkError> {
                self.leaves.push(ctx.path.to_string_lossy().into_owned());
                Ok(())
            }
        }

        #[tokio::test]
        async fn test_traverse_orders() {
            let mut tree = sample_tree();
            let mut recorder = Recorder::default();
            tree.traverse(&mut recorder).await.unwrap();

            assert_eq!(
                recorder.enters,
                [
                    "",
                    "ModuleA",
                    "ModuleA/file1.js",
                    "ModuleA/file2.js",
                    "ModuleB",
                    "ModuleB/file3.js",
                    "ModuleB/file4.js",
                ]
            );
            assert_eq!(
                recorder.leaves,
                [
                    "ModuleA/file1.js",
                    "ModuleA/file2.js",
                    "ModuleA",
                    "ModuleB/file3.js",
                    "ModuleB/file4.js",
                    "ModuleB",
                    "",
                ]
            );
        }

        #[tokio::test]
        async fn test_traverse_is_repeatable() {
            let mut tree = sample_tree();

            let mut first = Recorder::default();
            tree.traverse(&mut first).await.unwrap();
            let mut second = Recorder::default();
            tree.traverse(&mut second).await.unwrap();

            assert_eq!(first.enters, second.enters);
            assert_eq!(first.leaves, second.leaves);
        }

        #[tokio::test]
        async fn test_traverse_skips_detached_subtree() {
            let mut tree = sample_tree();
            let module_b = tree.path_to_node(&["ModuleB"]).unwrap();
            tree.detach(module_b);

            let mut recorder = Recorder::default();
            tree.traverse(&mut recorder).await.unwrap();

            assert_eq!(
                recorder.enters,
                ["", "ModuleA", "ModuleA/file1.js", "ModuleA/file2.js"]
            );
        }

        #[tokio::test]
        async fn test_traverse_absolute_paths() {
            struct AbsoluteRecorder {
                paths: Vec<String>,
            }

            #[async_trait]
            impl WalkVisitor for AbsoluteRecorder {
                async fn on_file_enter(
                    &mut self,
                    _file: &mut FileNode,
                    ctx: &VisitContext<'_>,
                ) -> Result<(), WalkError> {
                    self.paths.push(ctx.absolute.to_string_lossy().into_owned());
                    Ok(())
                }
            }

            let mut tree = sample_tree();
            let mut recorder = AbsoluteRecorder { paths: Vec::new() };
            tree.traverse(&mut recorder).await.unwrap();

            assert_eq!(recorder.paths[0], "/base/project/ModuleA/file1.js");
        }

        #[tokio::test]
        async fn test_traverse_hook_error_aborts() {
            struct Failing;

            #[async_trait]
            impl WalkVisitor for Failing {
                async fn on_file_enter(
                    &mut self,
                    file: &mut FileNode,
                    _ctx: &VisitContext<'_>,
                ) -> Result<(), WalkError> {
                    if file.name.as_str() == "file2.js" {
                        return Err(WalkError::other("stop here"));
                    }
                    Ok(())
                }
            }

            let mut tree = sample_tree();
            let err = tree.traverse(&mut Failing).await.unwrap_err();
            assert!(matches!(err, WalkError::Other { .. }));
        }
    }
}
