use crate::domain::model::{SourceKind, TextDirection};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "ribbon-composer")]
#[command(about = "Builds a widget composition from a declarative ribbon definition")]
pub struct CliConfig {
    /// Path to the TOML composition definition.
    #[arg(long)]
    pub definition: String,

    #[arg(long, help = "Treat the definition as a user-supplied override")]
    pub user_supplied: bool,

    #[arg(long, default_value = "1920")]
    pub display_width: u32,

    #[arg(long, default_value = "1080")]
    pub display_height: u32,

    #[arg(long, help = "Apply right-to-left text direction")]
    pub rtl: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn source_kind(&self) -> SourceKind {
        if self.user_supplied {
            SourceKind::UserSupplied
        } else {
            SourceKind::BuiltIn
        }
    }

    pub fn text_direction(&self) -> TextDirection {
        if self.rtl {
            TextDirection::RightToLeft
        } else {
            TextDirection::LeftToRight
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("definition", &self.definition)?;
        Ok(())
    }
}
