//! File and directory node types.

use compact_str::CompactString;
use indexmap::IndexMap;

use crate::payload::Payload;

/// Unique identifier for a node within a tree.
///
/// Ids are assigned from a per-tree counter starting at 0 and double as the
/// node's index in the tree's arena. They are unique and deterministic within
/// one construction run, but not stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new NodeId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The arena index this id refers to.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Type of file system node, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Directory.
    Directory,
    /// Regular file.
    File,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }
}

/// A directory in the tree.
///
/// Children are linked by [`NodeId`], never by owning references; the arena in
/// [`FileTree`](crate::tree::FileTree) owns every node. Both child maps iterate
/// in insertion order, which is discovery order during construction.
#[derive(Debug)]
pub struct DirectoryNode {
    /// Unique identifier for this node.
    pub id: NodeId,

    /// Directory name (not full path).
    pub name: CompactString,

    /// Enclosing directory, None only for the root.
    pub parent: Option<NodeId>,

    /// Child directories by name.
    pub directories: IndexMap<CompactString, NodeId>,

    /// Child files by name.
    pub files: IndexMap<CompactString, NodeId>,

    /// Number of live entries in `directories`.
    pub directory_count: usize,

    /// Number of live entries in `files`.
    pub file_count: usize,
}

impl DirectoryNode {
    /// Create an empty directory node.
    pub fn new(id: NodeId, name: impl Into<CompactString>, parent: Option<NodeId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
            directories: IndexMap::new(),
            files: IndexMap::new(),
            directory_count: 0,
            file_count: 0,
        }
    }

    /// Total number of direct children.
    pub fn child_count(&self) -> usize {
        self.directory_count + self.file_count
    }
}

/// A file in the tree.
#[derive(Debug)]
pub struct FileNode {
    /// Unique identifier for this node.
    pub id: NodeId,

    /// File name, including its extension.
    pub name: CompactString,

    /// Enclosing directory.
    pub parent: Option<NodeId>,

    /// Loader-produced data, None when no loader claimed the file.
    pub payload: Option<Payload>,
}

impl FileNode {
    /// Create a new file node with no payload.
    pub fn new(id: NodeId, name: impl Into<CompactString>, parent: Option<NodeId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
            payload: None,
        }
    }
}

/// A single node in the tree, either a directory or a file.
#[derive(Debug)]
pub enum Node {
    /// Directory node.
    Directory(DirectoryNode),
    /// File node.
    File(FileNode),
}

impl Node {
    /// The node's kind.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Directory(_) => NodeKind::Directory,
            Node::File(_) => NodeKind::File,
        }
    }

    /// The node's id.
    pub fn id(&self) -> NodeId {
        match self {
            Node::Directory(dir) => dir.id,
            Node::File(file) => file.id,
        }
    }

    /// The node's base name.
    pub fn name(&self) -> &str {
        match self {
            Node::Directory(dir) => &dir.name,
            Node::File(file) => &file.name,
        }
    }

    /// The enclosing directory, None only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Directory(dir) => dir.parent,
            Node::File(file) => file.parent,
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind().is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind().is_file()
    }

    /// Borrow as a directory node.
    pub fn as_directory(&self) -> Option<&DirectoryNode> {
        match self {
            Node::Directory(dir) => Some(dir),
            Node::File(_) => None,
        }
    }

    /// Borrow as a mutable directory node.
    pub fn as_directory_mut(&mut self) -> Option<&mut DirectoryNode> {
        match self {
            Node::Directory(dir) => Some(dir),
            Node::File(_) => None,
        }
    }

    /// Borrow as a file node.
    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Node::File(file) => Some(file),
            Node::Directory(_) => None,
        }
    }

    /// Borrow as a mutable file node.
    pub fn as_file_mut(&mut self) -> Option<&mut FileNode> {
        match self {
            Node::File(file) => Some(file),
            Node::Directory(_) => None,
        }
    }
}
