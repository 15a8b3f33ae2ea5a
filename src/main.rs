use clap::Parser;
use ribbon_composer::adapters::HeadlessSurface;
use ribbon_composer::utils::error::ErrorSeverity;
use ribbon_composer::utils::{logger, validation::Validate};
use ribbon_composer::{CliConfig, CompositionBuilder, DefinitionSource, HostSurface, Size};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting ribbon-composer CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_message());
        std::process::exit(1);
    }

    let source = match DefinitionSource::from_file(config.source_kind(), &config.definition) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!("❌ Cannot read definition '{}': {}", config.definition, e);
            eprintln!("❌ Cannot read definition '{}': {}", config.definition, e);
            std::process::exit(1);
        }
    };

    let builder = CompositionBuilder::new().with_text_direction(config.text_direction());

    match builder.update_from_definition(&source) {
        Ok(report) => {
            tracing::info!(
                "📦 Loaded {} contributions ({} skipped)",
                report.inserted,
                report.skipped.len()
            );
        }
        Err(e) => {
            eprintln!("❌ {}", e.user_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    let mut surface = HeadlessSurface::new(Size::new(config.display_width, config.display_height));
    let composition = builder.build(&mut surface)?;

    print!("{}", composition);
    tracing::info!(
        "✅ Composition built: {} top-level entries, preferred size {}x{}",
        composition.children.len(),
        surface.preferred_size().width,
        surface.preferred_size().height
    );

    Ok(())
}
