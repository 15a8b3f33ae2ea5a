use crate::domain::model::{Composite, Size, TextDirection};
use crate::utils::error::Result;

/// A unit of structural or leaf content a producer inserts into the tree.
///
/// `materialize` is the whole contract: mutate the supplied parent container,
/// return nothing. A contribution that appends a container composite hosts
/// its tree children; one that only decorates the parent shares it.
pub trait Contribution: Send + Sync {
    /// Path segment of this contribution among its siblings.
    fn key(&self) -> &str;

    fn materialize(&self, parent: &mut Composite);
}

/// Turns a declared node's attributes into a concrete contribution.
/// Factories are stateless and reusable across builds.
pub trait ContributionFactory: Send + Sync {
    fn create(&self, key: &str, attrs: &toml::Table) -> Result<Box<dyn Contribution>>;
}

/// The host widget the finished composition is mounted on. Implemented by
/// the rendering toolkit; the registry only drives the final layout pass
/// through it.
pub trait HostSurface {
    /// Usable display area, the input to the preferred-size computation.
    fn display_bounds(&self) -> Size;

    fn preferred_size(&self) -> Size;
    fn set_preferred_size(&mut self, size: Size);
    fn set_minimum_size(&mut self, size: Size);
    fn apply_text_direction(&mut self, direction: TextDirection);
    fn pack(&mut self);
    fn size(&self) -> Size;
}
