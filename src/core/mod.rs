pub mod builder;
pub mod factories;
pub mod materializer;
pub mod tree;

pub use crate::domain::model::{Composite, DefinitionSource, SourceKind, TreePath};
pub use crate::domain::ports::{Contribution, ContributionFactory, HostSurface};
pub use crate::utils::error::Result;
