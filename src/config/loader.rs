use crate::config::definition::{CompositionDefinition, DeclaredNode};
use crate::core::factories::FactoryRegistry;
use crate::core::tree::ContributionTree;
use crate::domain::model::DefinitionSource;
use crate::utils::error::Result;

/// Populates a contribution tree from a declarative definition source,
/// dispatching each declared node's `type` tag through the factory registry.
///
/// Nothing is written to the tree until the whole source has parsed and
/// validated, so a broken definition never leaves the live structure half
/// mutated.
pub struct DefinitionLoader;

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub inserted: usize,
    pub skipped: Vec<SkippedNode>,
}

/// A declared node whose `type` tag had no registered factory. Skipped
/// together with its subtree, for forward compatibility with definition
/// versions this build does not know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedNode {
    pub tag: String,
    pub key: String,
}

impl DefinitionLoader {
    pub fn load(
        &self,
        source: &DefinitionSource,
        factories: &FactoryRegistry,
        tree: &mut ContributionTree,
    ) -> Result<LoadReport> {
        let definition = CompositionDefinition::parse(source)?;

        let mut report = LoadReport::default();
        let root = tree.root_marker().to_string();
        for declared in &definition.nodes {
            self.load_node(declared, &root, factories, tree, &mut report)?;
        }

        tracing::info!(
            origin = %source.origin,
            kind = %source.kind,
            inserted = report.inserted,
            skipped = report.skipped.len(),
            "definition loaded"
        );
        Ok(report)
    }

    fn load_node(
        &self,
        declared: &DeclaredNode,
        parent_key: &str,
        factories: &FactoryRegistry,
        tree: &mut ContributionTree,
        report: &mut LoadReport,
    ) -> Result<()> {
        let Some(factory) = factories.lookup(&declared.r#type) else {
            tracing::warn!(
                tag = %declared.r#type,
                key = %declared.key,
                "unknown contribution type, skipping node and subtree"
            );
            report.skipped.push(SkippedNode {
                tag: declared.r#type.clone(),
                key: declared.key.clone(),
            });
            return Ok(());
        };

        let payload = factory.create(&declared.key, &declared.attrs)?;

        // Pre-order traversal guarantees the parent was visited first, but
        // ancestors may still be missing on partial re-loads; get-or-create
        // keeps the insert idempotent.
        tree.ensure_path(parent_key)?;
        let key = tree.insert(parent_key, payload, declared.position)?;
        report.inserted += 1;

        for child in &declared.children {
            self.load_node(child, &key, factories, tree, report)?;
        }
        Ok(())
    }
}
