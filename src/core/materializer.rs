use crate::core::tree::ContributionTree;
use crate::domain::model::{Composite, Size, TextDirection};
use crate::domain::ports::HostSurface;
use crate::utils::error::Result;

/// Minimum footprint the host surface must keep even on tiny displays.
pub const MIN_HOST_SIZE: Size = Size {
    width: 640,
    height: 240,
};

/// Walks a finished contribution tree depth-first in child order and
/// produces the concrete composition, then runs the one-shot layout pass
/// against the host surface.
pub struct TreeMaterializer {
    direction: TextDirection,
}

impl TreeMaterializer {
    pub fn new(direction: TextDirection) -> Self {
        Self { direction }
    }

    /// Produces the composition for the current tree state. Nodes with a
    /// payload contribute into the in-progress parent container; structural
    /// nodes emit nothing and only recurse.
    pub fn materialize(&self, tree: &ContributionTree) -> Result<Composite> {
        let root_key = tree.root_marker().trim_start_matches('/');
        let mut root = Composite::new("ribbon", root_key);
        for key in tree.root_children() {
            self.walk(tree, key, &mut root)?;
        }
        tracing::debug!(
            top_level = root.children.len(),
            nodes = tree.len(),
            "composition materialized"
        );
        Ok(root)
    }

    fn walk(&self, tree: &ContributionTree, key: &str, parent: &mut Composite) -> Result<()> {
        let node = tree.get(key)?;
        match node.payload() {
            Some(payload) => {
                let before = parent.children.len();
                payload.materialize(parent);
                if parent.children.len() > before {
                    // The contribution appended a container; it hosts the
                    // node's children.
                    if let Some(container) = parent.children.last_mut() {
                        for child in node.child_keys() {
                            self.walk(tree, child, container)?;
                        }
                    }
                } else {
                    for child in node.child_keys() {
                        self.walk(tree, child, parent)?;
                    }
                }
            }
            None => {
                for child in node.child_keys() {
                    self.walk(tree, child, parent)?;
                }
            }
        }
        Ok(())
    }

    /// Final layout pass, run exactly once per build after every
    /// contribution is materialized: half the display height (floored at
    /// `MIN_HOST_SIZE`), text direction, then pack.
    pub fn layout(&self, host: &mut dyn HostSurface) {
        let bounds = host.display_bounds();
        let preferred = Size::new(
            bounds.width.max(MIN_HOST_SIZE.width),
            (bounds.height / 2).max(MIN_HOST_SIZE.height),
        );

        host.apply_text_direction(self.direction);
        host.set_preferred_size(preferred);
        host.set_minimum_size(MIN_HOST_SIZE);
        host.pack();

        let packed = host.size();
        tracing::debug!(
            width = packed.width,
            height = packed.height,
            "host surface packed"
        );
    }
}

impl Default for TreeMaterializer {
    fn default() -> Self {
        Self::new(TextDirection::default())
    }
}
