use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

pub const PATH_SEPARATOR: char = '/';

/// Immutable hierarchical address of a node in the contribution tree.
///
/// The synthetic root is the empty path and resolves to `""`; every other
/// path resolves with a leading separator, e.g. `/ribbon/Home/Clipboard`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TreePath {
    segments: Vec<String>,
}

impl TreePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `name` appended; the receiver is unchanged.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// Splits a resolved key back into a path. Empty segments (leading,
    /// trailing or doubled separators) are dropped.
    pub fn parse(key: &str) -> Self {
        Self {
            segments: key
                .split(PATH_SEPARATOR)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Full resolved key: segments joined by the separator, with the root
    /// contributing an empty leading segment.
    pub fn resolve(&self) -> String {
        if self.segments.is_empty() {
            return String::new();
        }
        let mut key = String::new();
        for segment in &self.segments {
            key.push(PATH_SEPARATOR);
            key.push_str(segment);
        }
        key
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolve())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Where a definition came from. A broken built-in definition means the
/// product itself is broken; a broken user-supplied one is recoverable at
/// the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    BuiltIn,
    UserSupplied,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::BuiltIn => f.write_str("built-in"),
            SourceKind::UserSupplied => f.write_str("user-supplied"),
        }
    }
}

/// An already-resolved declarative definition: the registry never fetches
/// anything itself. `origin` is a display path used in error reporting.
#[derive(Debug, Clone)]
pub struct DefinitionSource {
    pub kind: SourceKind,
    pub origin: String,
    pub text: String,
}

impl DefinitionSource {
    pub fn built_in(origin: &str, text: &str) -> Self {
        Self {
            kind: SourceKind::BuiltIn,
            origin: origin.to_string(),
            text: text.to_string(),
        }
    }

    pub fn user_supplied(origin: &str, text: &str) -> Self {
        Self {
            kind: SourceKind::UserSupplied,
            origin: origin.to_string(),
            text: text.to_string(),
        }
    }

    /// Boundary convenience for callers that keep definitions on disk.
    pub fn from_file<P: AsRef<Path>>(kind: SourceKind, path: P) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(&path)?;
        Ok(Self {
            kind,
            origin: path.as_ref().display().to_string(),
            text,
        })
    }
}

/// A node of the materialized widget composition: toolkit-neutral output of
/// the build pass. Concrete renderers translate this tree into their own
/// widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composite {
    pub kind: String,
    pub key: String,
    pub props: BTreeMap<String, String>,
    pub children: Vec<Composite>,
}

impl Composite {
    pub fn new(kind: &str, key: &str) -> Self {
        Self {
            kind: kind.to_string(),
            key: key.to_string(),
            props: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_prop(mut self, name: &str, value: &str) -> Self {
        self.props.insert(name.to_string(), value.to_string());
        self
    }

    pub fn add_child(&mut self, child: Composite) {
        self.children.push(child);
    }

    /// Depth-first lookup by key.
    pub fn find(&self, key: &str) -> Option<&Composite> {
        if self.key == key {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(key))
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let label = self
            .props
            .get("label")
            .map(|l| format!(" \"{}\"", l))
            .unwrap_or_default();
        writeln!(f, "{}{} {}{}", "  ".repeat(depth), self.kind, self.key, label)?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
