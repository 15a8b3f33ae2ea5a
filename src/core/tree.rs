use crate::domain::model::PATH_SEPARATOR;
use crate::domain::ports::Contribution;
use crate::utils::error::{ComposeError, Result};
use std::collections::HashMap;

/// A sibling slot: the child's full key plus the (clamped) position it was
/// inserted with, kept so later same-position arrivals sort after earlier
/// ones instead of displacing them.
struct ChildSlot {
    key: String,
    position: usize,
}

fn insert_slot(slots: &mut Vec<ChildSlot>, key: String, position: Option<usize>) {
    let position = position.unwrap_or(slots.len()).min(slots.len());
    let index = slots.iter().take_while(|s| s.position <= position).count();
    slots.insert(index, ChildSlot { key, position });
}

/// A single node of the contribution tree: its key (last path segment), an
/// optional payload, and its children in position order. Structural nodes
/// carry no payload and exist only to host children.
pub struct ContributionNode {
    key: String,
    payload: Option<Box<dyn Contribution>>,
    children: Vec<ChildSlot>,
}

impl ContributionNode {
    fn new(key: &str, payload: Option<Box<dyn Contribution>>) -> Self {
        Self {
            key: key.to_string(),
            payload,
            children: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn payload(&self) -> Option<&dyn Contribution> {
        self.payload.as_deref()
    }

    pub fn is_structural(&self) -> bool {
        self.payload.is_none()
    }

    /// Full keys of the children, in position order.
    pub fn child_keys(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|slot| slot.key.as_str())
    }
}

/// Ordered, keyed tree of contribution nodes; the single source of truth for
/// structure. Nodes are addressed by full resolved key and never deleted
/// individually: rebuilds replace payloads in place.
///
/// All mutation must happen under the owning builder's exclusive lock.
pub struct ContributionTree {
    root_marker: String,
    nodes: HashMap<String, ContributionNode>,
    root_children: Vec<ChildSlot>,
}

impl ContributionTree {
    /// `root_marker` is the symbolic parent key (e.g. `/ribbon`) that stands
    /// for the synthetic root in `insert` calls. No node exists at the
    /// marker itself; top-level children live directly under the root.
    pub fn new(root_marker: &str) -> Self {
        Self {
            root_marker: root_marker.to_string(),
            nodes: HashMap::new(),
            root_children: Vec::new(),
        }
    }

    pub fn root_marker(&self) -> &str {
        &self.root_marker
    }

    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Result<&ContributionNode> {
        self.nodes.get(key).ok_or_else(|| ComposeError::NotFound {
            key: key.to_string(),
        })
    }

    /// Full keys of the synthetic root's direct children, in position order.
    pub fn root_children(&self) -> impl Iterator<Item = &str> {
        self.root_children.iter().map(|slot| slot.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts `contribution` as a child of the node at `parent_key`.
    ///
    /// `position` is a zero-based index among existing siblings; `None` or
    /// an out-of-range index appends. Sibling order is insertion sequence
    /// sorted by clamped position, ties broken by arrival order. Fails with
    /// `Structure` when the parent is neither the root marker nor an
    /// existing node. Inserting at an already-occupied key replaces that
    /// node's payload in place, keeping its sibling position and children
    /// (this is what makes repeated definition loads idempotent).
    ///
    /// Returns the full key of the inserted node.
    pub fn insert(
        &mut self,
        parent_key: &str,
        contribution: Box<dyn Contribution>,
        position: Option<usize>,
    ) -> Result<String> {
        let child_key = self.child_key(parent_key, contribution.key());

        if let Some(existing) = self.nodes.get_mut(&child_key) {
            existing.payload = Some(contribution);
            return Ok(child_key);
        }

        let node_key = contribution.key().to_string();
        let node = ContributionNode::new(&node_key, Some(contribution));
        self.attach(parent_key, child_key.clone(), node, position)?;
        Ok(child_key)
    }

    /// Get-or-create of a payload-less node: the implicit-ancestor creation
    /// primitive. Existing nodes (structural or not) are left untouched.
    pub fn insert_structural(&mut self, parent_key: &str, segment: &str) -> Result<String> {
        let child_key = self.child_key(parent_key, segment);
        if self.nodes.contains_key(&child_key) {
            return Ok(child_key);
        }
        let node = ContributionNode::new(segment, None);
        self.attach(parent_key, child_key.clone(), node, None)?;
        Ok(child_key)
    }

    /// Creates structural nodes for every segment of `path_key` below the
    /// root marker that does not exist yet.
    pub fn ensure_path(&mut self, path_key: &str) -> Result<()> {
        if path_key == self.root_marker {
            return Ok(());
        }
        let relative = path_key
            .strip_prefix(self.root_marker.as_str())
            .ok_or_else(|| ComposeError::Structure {
                parent: path_key.to_string(),
            })?;

        let mut parent = self.root_marker.clone();
        for segment in relative.split(PATH_SEPARATOR).filter(|s| !s.is_empty()) {
            parent = self.insert_structural(&parent, segment)?;
        }
        Ok(())
    }

    fn child_key(&self, parent_key: &str, segment: &str) -> String {
        format!("{}{}{}", parent_key, PATH_SEPARATOR, segment)
    }

    fn attach(
        &mut self,
        parent_key: &str,
        child_key: String,
        node: ContributionNode,
        position: Option<usize>,
    ) -> Result<()> {
        let siblings = if parent_key == self.root_marker {
            &mut self.root_children
        } else {
            match self.nodes.get_mut(parent_key) {
                Some(parent) => &mut parent.children,
                None => {
                    return Err(ComposeError::Structure {
                        parent: parent_key.to_string(),
                    })
                }
            }
        };

        insert_slot(siblings, child_key.clone(), position);
        self.nodes.insert(child_key, node);
        Ok(())
    }
}
