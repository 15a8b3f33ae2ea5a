//! Lints a composition definition: parses, validates, and reports which
//! declared type tags the stock factory set can resolve.

use ribbon_composer::config::definition::DeclaredNode;
use ribbon_composer::config::CompositionDefinition;
use ribbon_composer::{DefinitionSource, FactoryRegistry, SourceKind};
use std::process::ExitCode;

fn count_tags(
    nodes: &[DeclaredNode],
    registry: &FactoryRegistry,
    resolved: &mut usize,
    unknown: &mut Vec<String>,
) {
    for node in nodes {
        if registry.lookup(&node.r#type).is_some() {
            *resolved += 1;
        } else if !unknown.contains(&node.r#type) {
            unknown.push(node.r#type.clone());
        }
        count_tags(&node.children, registry, resolved, unknown);
    }
}

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: check_definition <definition.toml>");
        return ExitCode::FAILURE;
    };

    let source = match DefinitionSource::from_file(SourceKind::UserSupplied, &path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("cannot read '{}': {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let definition = match CompositionDefinition::parse(&source) {
        Ok(definition) => definition,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    let registry = FactoryRegistry::with_builtins();
    let mut resolved = 0;
    let mut unknown = Vec::new();
    count_tags(&definition.nodes, &registry, &mut resolved, &mut unknown);

    println!("{}: {} resolvable nodes", path, resolved);
    if !unknown.is_empty() {
        println!(
            "unknown type tags (skipped at load time): {}",
            unknown.join(", ")
        );
    }
    ExitCode::SUCCESS
}
