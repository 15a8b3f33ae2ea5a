use crate::domain::model::DefinitionSource;
use crate::utils::error::{ComposeError, Result};
use crate::utils::validation::{validate_node_key, validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};

/// Parsed declarative composition definition.
///
/// The on-disk format is TOML: an ordered list of `[[node]]` tables, each
/// carrying a `type` tag (factory dispatch key), a `key` (path segment), an
/// optional zero-based `position`, nested `children`, and any further
/// type-specific attributes consumed only by the matching factory.
///
/// ```toml
/// [definition]
/// name = "default ribbon"
///
/// [[node]]
/// type = "task"
/// key = "Home"
///
///   [[node.children]]
///   type = "band"
///   key = "Clipboard"
///
///     [[node.children.children]]
///     type = "action"
///     key = "Copy"
///     position = 0
///     command = "edit.copy"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionDefinition {
    pub definition: Option<DefinitionInfo>,
    #[serde(default, rename = "node")]
    pub nodes: Vec<DeclaredNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclaredNode {
    pub r#type: String,
    pub key: String,
    pub position: Option<usize>,
    #[serde(default)]
    pub children: Vec<DeclaredNode>,
    /// Type-specific attributes, passed through to the factory untouched.
    #[serde(flatten)]
    pub attrs: toml::Table,
}

impl CompositionDefinition {
    /// Parses an already-resolved definition source. Both TOML errors and
    /// schema violations surface as `DefinitionParse` carrying the source
    /// kind and origin, so the built-in/user-supplied policy split applies
    /// uniformly.
    pub fn parse(source: &DefinitionSource) -> Result<Self> {
        let text = substitute_env_vars(&source.text);

        let parsed: CompositionDefinition =
            toml::from_str(&text).map_err(|e| ComposeError::DefinitionParse {
                kind: source.kind,
                origin: source.origin.clone(),
                message: e.to_string(),
            })?;

        parsed
            .validate()
            .map_err(|e| ComposeError::DefinitionParse {
                kind: source.kind,
                origin: source.origin.clone(),
                message: e.to_string(),
            })?;

        Ok(parsed)
    }
}

impl Validate for CompositionDefinition {
    fn validate(&self) -> Result<()> {
        fn validate_node(node: &DeclaredNode) -> Result<()> {
            validate_non_empty_string("node.type", &node.r#type)?;
            validate_node_key("node.key", &node.key)?;
            for child in &node.children {
                validate_node(child)?;
            }
            Ok(())
        }

        for node in &self.nodes {
            validate_node(node)?;
        }
        Ok(())
    }
}

/// Replaces `${VAR_NAME}` references with environment values; unset
/// variables are left verbatim.
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SourceKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_definition() {
        let toml_content = r#"
[definition]
name = "default ribbon"
version = "1.0"

[[node]]
type = "task"
key = "Home"

  [[node.children]]
  type = "band"
  key = "Clipboard"

    [[node.children.children]]
    type = "action"
    key = "Copy"
    position = 0
    command = "edit.copy"
"#;

        let source = DefinitionSource::built_in("builtin/ribbon.toml", toml_content);
        let definition = CompositionDefinition::parse(&source).unwrap();

        assert_eq!(definition.nodes.len(), 1);
        let home = &definition.nodes[0];
        assert_eq!(home.r#type, "task");
        assert_eq!(home.key, "Home");

        let copy = &home.children[0].children[0];
        assert_eq!(copy.position, Some(0));
        assert_eq!(
            copy.attrs.get("command").and_then(toml::Value::as_str),
            Some("edit.copy")
        );
    }

    #[test]
    fn test_document_order_is_preserved() {
        let toml_content = r#"
[[node]]
type = "task"
key = "Home"

[[node]]
type = "task"
key = "View"

[[node]]
type = "task"
key = "Tools"
"#;

        let source = DefinitionSource::built_in("builtin/ribbon.toml", toml_content);
        let definition = CompositionDefinition::parse(&source).unwrap();

        let keys: Vec<&str> = definition.nodes.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, ["Home", "View", "Tools"]);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_RIBBON_LABEL", "Start");

        let toml_content = r#"
[[node]]
type = "task"
key = "Home"
label = "${TEST_RIBBON_LABEL}"
"#;

        let source = DefinitionSource::user_supplied("ribbon.toml", toml_content);
        let definition = CompositionDefinition::parse(&source).unwrap();
        assert_eq!(
            definition.nodes[0].attrs.get("label").and_then(toml::Value::as_str),
            Some("Start")
        );

        std::env::remove_var("TEST_RIBBON_LABEL");
    }

    #[test]
    fn test_parse_error_carries_kind_and_origin() {
        let source = DefinitionSource::user_supplied("/home/user/ribbon.toml", "not [ valid toml");
        let err = CompositionDefinition::parse(&source).unwrap_err();

        match err {
            ComposeError::DefinitionParse { kind, origin, .. } => {
                assert_eq!(kind, SourceKind::UserSupplied);
                assert_eq!(origin, "/home/user/ribbon.toml");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_key_with_separator_is_rejected() {
        let toml_content = r#"
[[node]]
type = "task"
key = "Home/Sub"
"#;

        let source = DefinitionSource::built_in("builtin/ribbon.toml", toml_content);
        let err = CompositionDefinition::parse(&source).unwrap_err();
        assert!(matches!(err, ComposeError::DefinitionParse { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_definition_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[[node]]
type = "task"
key = "Home"
"#;
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let source =
            DefinitionSource::from_file(SourceKind::UserSupplied, temp_file.path()).unwrap();
        let definition = CompositionDefinition::parse(&source).unwrap();
        assert_eq!(definition.nodes[0].key, "Home");
    }
}
