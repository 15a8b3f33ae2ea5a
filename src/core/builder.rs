use crate::config::loader::{DefinitionLoader, LoadReport};
use crate::core::factories::FactoryRegistry;
use crate::core::materializer::TreeMaterializer;
use crate::core::tree::ContributionTree;
use crate::domain::model::{Composite, DefinitionSource, SourceKind, TextDirection, TreePath};
use crate::domain::ports::{Contribution, ContributionFactory, HostSurface};
use crate::utils::error::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const DEFAULT_ROOT_MARKER: &str = "/ribbon";

struct RegistryState {
    tree: ContributionTree,
    factories: FactoryRegistry,
}

/// Public entry point of the composition registry.
///
/// Structure mutation (`add`, `register_factory`, `update_from_definition`)
/// may come from arbitrary threads and is serialized by one coarse exclusive
/// lock over the whole tree and factory table; contention is configuration
/// time only. `build` must stay on the single UI-owning thread, which the
/// exclusive `&mut dyn HostSurface` borrow already encodes.
pub struct CompositionBuilder {
    state: Mutex<RegistryState>,
    materializer: TreeMaterializer,
}

impl CompositionBuilder {
    pub fn new() -> Self {
        Self::with_root(DEFAULT_ROOT_MARKER)
    }

    /// `root_marker` is the symbolic parent path standing for the synthetic
    /// root (default `/ribbon`).
    pub fn with_root(root_marker: &str) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                tree: ContributionTree::new(root_marker),
                factories: FactoryRegistry::with_builtins(),
            }),
            materializer: TreeMaterializer::default(),
        }
    }

    pub fn with_text_direction(mut self, direction: TextDirection) -> Self {
        self.materializer = TreeMaterializer::new(direction);
        self
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        // Configuration-time state; a panicked writer leaves nothing half
        // applied that a later full re-load cannot overwrite.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts `contribution` as a child of `parent`, at `position` among
    /// its siblings. The element's own path is `parent` plus the
    /// contribution's key; the root path (or the root marker itself)
    /// addresses the synthetic root.
    pub fn add(
        &self,
        contribution: Box<dyn Contribution>,
        parent: &TreePath,
        position: usize,
    ) -> Result<String> {
        let mut state = self.lock();
        let parent_key = if parent.is_root() {
            state.tree.root_marker().to_string()
        } else {
            parent.resolve()
        };
        state.tree.insert(&parent_key, contribution, Some(position))
    }

    /// Binds `tag` to `factory` for subsequent definition loads; the last
    /// registration wins.
    pub fn register_factory(&self, tag: &str, factory: Arc<dyn ContributionFactory>) {
        self.lock().factories.register(tag, factory);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().tree.contains(key)
    }

    /// Re-derives structure from `source`. Safe to call repeatedly (live
    /// reload); each call fully re-applies the definition without a prior
    /// reset. A broken built-in definition is a fatal configuration defect
    /// and propagates for the top-level caller to terminate on; a broken
    /// user-supplied one is returned for the caller's fallback-or-exit
    /// policy, with the live tree untouched.
    pub fn update_from_definition(&self, source: &DefinitionSource) -> Result<LoadReport> {
        let mut state = self.lock();
        let state = &mut *state;
        let result = DefinitionLoader.load(source, &state.factories, &mut state.tree);

        if let Err(e) = &result {
            match source.kind {
                SourceKind::BuiltIn => {
                    tracing::error!(origin = %source.origin, "broken built-in definition: {e}")
                }
                SourceKind::UserSupplied => {
                    tracing::warn!(origin = %source.origin, "broken user-supplied definition: {e}")
                }
            }
        }
        result
    }

    /// Materializes the current tree snapshot into a composition and runs
    /// the final layout pass against `host`.
    pub fn build(&self, host: &mut dyn HostSurface) -> Result<Composite> {
        let composition = {
            let state = self.lock();
            self.materializer.materialize(&state.tree)?
        };
        self.materializer.layout(host);
        Ok(composition)
    }
}

impl Default for CompositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
