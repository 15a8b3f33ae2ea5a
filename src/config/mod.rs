#[cfg(feature = "cli")]
pub mod cli;
pub mod definition;
pub mod loader;

pub use definition::{CompositionDefinition, DeclaredNode};
pub use loader::{DefinitionLoader, LoadReport};

#[cfg(feature = "cli")]
pub use cli::CliConfig;
