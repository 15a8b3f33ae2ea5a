pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::loader::{DefinitionLoader, LoadReport};
pub use crate::core::builder::{CompositionBuilder, DEFAULT_ROOT_MARKER};
pub use crate::core::factories::FactoryRegistry;
pub use crate::core::materializer::TreeMaterializer;
pub use crate::core::tree::ContributionTree;
pub use crate::domain::model::{Composite, DefinitionSource, Size, SourceKind, TextDirection, TreePath};
pub use crate::domain::ports::{Contribution, ContributionFactory, HostSurface};
pub use crate::utils::error::{ComposeError, Result};
