use crate::domain::model::Composite;
use crate::domain::ports::{Contribution, ContributionFactory};
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps a declarative `type` tag to the factory that turns a declared node
/// into a contribution. Dispatch is a plain table lookup; a tag registered
/// twice overwrites the prior binding so the definition vocabulary can be
/// extended late.
pub struct FactoryRegistry {
    factories: HashMap<String, Arc<dyn ContributionFactory>>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry pre-loaded with the stock vocabulary: `task`, `band`,
    /// `action`, `separator`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("task", Arc::new(TaskContributorFactory));
        registry.register("band", Arc::new(BandContributorFactory));
        registry.register("action", Arc::new(ActionContributorFactory));
        registry.register("separator", Arc::new(SeparatorContributorFactory));
        registry
    }

    pub fn register(&mut self, tag: &str, factory: Arc<dyn ContributionFactory>) {
        if self.factories.insert(tag.to_string(), factory).is_some() {
            tracing::debug!(tag, "replacing contribution factory binding");
        }
    }

    /// `None` is not an error: unrecognized tags in a definition are
    /// skippable for forward compatibility.
    pub fn lookup(&self, tag: &str) -> Option<Arc<dyn ContributionFactory>> {
        self.factories.get(tag).cloned()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn attr_str<'a>(attrs: &'a toml::Table, name: &str) -> Option<&'a str> {
    attrs.get(name).and_then(toml::Value::as_str)
}

/// Top-level task group (a ribbon tab).
pub struct TaskContribution {
    key: String,
    label: String,
}

impl TaskContribution {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

impl Contribution for TaskContribution {
    fn key(&self) -> &str {
        &self.key
    }

    fn materialize(&self, parent: &mut Composite) {
        parent.add_child(Composite::new("task", &self.key).with_prop("label", &self.label));
    }
}

pub struct TaskContributorFactory;

impl ContributionFactory for TaskContributorFactory {
    fn create(&self, key: &str, attrs: &toml::Table) -> Result<Box<dyn Contribution>> {
        Ok(Box::new(TaskContribution {
            key: key.to_string(),
            label: attr_str(attrs, "label").unwrap_or(key).to_string(),
        }))
    }
}

/// A band groups related actions inside a task.
pub struct BandContribution {
    key: String,
    label: String,
}

impl BandContribution {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

impl Contribution for BandContribution {
    fn key(&self) -> &str {
        &self.key
    }

    fn materialize(&self, parent: &mut Composite) {
        parent.add_child(Composite::new("band", &self.key).with_prop("label", &self.label));
    }
}

pub struct BandContributorFactory;

impl ContributionFactory for BandContributorFactory {
    fn create(&self, key: &str, attrs: &toml::Table) -> Result<Box<dyn Contribution>> {
        Ok(Box::new(BandContribution {
            key: key.to_string(),
            label: attr_str(attrs, "label").unwrap_or(key).to_string(),
        }))
    }
}

/// Leaf action button wired to a host command id.
pub struct ActionContribution {
    key: String,
    label: String,
    command: Option<String>,
}

impl ActionContribution {
    pub fn new(key: &str, label: &str, command: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            command: command.map(str::to_string),
        }
    }
}

impl Contribution for ActionContribution {
    fn key(&self) -> &str {
        &self.key
    }

    fn materialize(&self, parent: &mut Composite) {
        let mut widget = Composite::new("action", &self.key).with_prop("label", &self.label);
        if let Some(command) = &self.command {
            widget = widget.with_prop("command", command);
        }
        parent.add_child(widget);
    }
}

pub struct ActionContributorFactory;

impl ContributionFactory for ActionContributorFactory {
    fn create(&self, key: &str, attrs: &toml::Table) -> Result<Box<dyn Contribution>> {
        Ok(Box::new(ActionContribution {
            key: key.to_string(),
            label: attr_str(attrs, "label").unwrap_or(key).to_string(),
            command: attr_str(attrs, "command").map(str::to_string),
        }))
    }
}

/// Visual divider; decorates the parent without hosting children.
pub struct SeparatorContribution {
    key: String,
}

impl SeparatorContribution {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }
}

impl Contribution for SeparatorContribution {
    fn key(&self) -> &str {
        &self.key
    }

    fn materialize(&self, parent: &mut Composite) {
        parent.add_child(Composite::new("separator", &self.key));
    }
}

pub struct SeparatorContributorFactory;

impl ContributionFactory for SeparatorContributorFactory {
    fn create(&self, key: &str, _attrs: &toml::Table) -> Result<Box<dyn Contribution>> {
        Ok(Box::new(SeparatorContribution {
            key: key.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_registered() {
        let registry = FactoryRegistry::with_builtins();
        for tag in ["task", "band", "action", "separator"] {
            assert!(registry.lookup(tag).is_some(), "missing builtin '{}'", tag);
        }
        assert!(registry.lookup("font_style").is_none());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = FactoryRegistry::new();
        registry.register("widget", Arc::new(TaskContributorFactory));
        registry.register("widget", Arc::new(SeparatorContributorFactory));

        let factory = registry.lookup("widget").unwrap();
        let contribution = factory.create("x", &toml::Table::new()).unwrap();

        let mut parent = Composite::new("root", "root");
        contribution.materialize(&mut parent);
        assert_eq!(parent.children[0].kind, "separator");
    }

    #[test]
    fn test_action_factory_reads_attrs() {
        let registry = FactoryRegistry::with_builtins();
        let factory = registry.lookup("action").unwrap();

        let mut attrs = toml::Table::new();
        attrs.insert("label".into(), toml::Value::String("Copy".into()));
        attrs.insert("command".into(), toml::Value::String("edit.copy".into()));

        let contribution = factory.create("Copy", &attrs).unwrap();
        let mut parent = Composite::new("band", "Clipboard");
        contribution.materialize(&mut parent);

        let widget = &parent.children[0];
        assert_eq!(widget.kind, "action");
        assert_eq!(widget.props.get("label").map(String::as_str), Some("Copy"));
        assert_eq!(
            widget.props.get("command").map(String::as_str),
            Some("edit.copy")
        );
    }

    #[test]
    fn test_label_defaults_to_key() {
        let registry = FactoryRegistry::with_builtins();
        let factory = registry.lookup("task").unwrap();
        let contribution = factory.create("Home", &toml::Table::new()).unwrap();

        let mut parent = Composite::new("ribbon", "ribbon");
        contribution.materialize(&mut parent);
        assert_eq!(
            parent.children[0].props.get("label").map(String::as_str),
            Some("Home")
        );
    }
}
