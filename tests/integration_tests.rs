use ribbon_composer::adapters::HeadlessSurface;
use ribbon_composer::core::factories::ActionContribution;
use ribbon_composer::{
    CompositionBuilder, DefinitionSource, HostSurface, Size, TextDirection, TreePath,
};

const RIBBON_DEFINITION: &str = r#"
[definition]
name = "default ribbon"
version = "1.0"

[[node]]
type = "task"
key = "Home"
label = "Home"

  [[node.children]]
  type = "band"
  key = "Clipboard"
  label = "Clipboard"

    [[node.children.children]]
    type = "action"
    key = "Copy"
    position = 0
    command = "edit.copy"

    [[node.children.children]]
    type = "action"
    key = "Paste"
    position = 1
    command = "edit.paste"
"#;

#[test]
fn test_end_to_end_definition_to_composition() {
    let builder = CompositionBuilder::new();

    let source = DefinitionSource::built_in("builtin/ribbon.toml", RIBBON_DEFINITION);
    let report = builder.update_from_definition(&source).unwrap();
    assert_eq!(report.inserted, 4);
    assert!(report.skipped.is_empty());

    assert!(builder.contains_key("/ribbon/Home"));
    assert!(builder.contains_key("/ribbon/Home/Clipboard"));
    assert!(builder.contains_key("/ribbon/Home/Clipboard/Copy"));
    assert!(builder.contains_key("/ribbon/Home/Clipboard/Paste"));

    let mut surface = HeadlessSurface::new(Size::new(1920, 1080));
    let composition = builder.build(&mut surface).unwrap();

    // task "Home" > band "Clipboard" > [Copy, Paste]
    let home = &composition.children[0];
    assert_eq!(home.kind, "task");
    assert_eq!(home.key, "Home");

    let clipboard = &home.children[0];
    assert_eq!(clipboard.kind, "band");
    assert_eq!(clipboard.key, "Clipboard");

    let actions: Vec<&str> = clipboard.children.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(actions, ["Copy", "Paste"]);
    assert_eq!(
        clipboard.children[0].props.get("command").map(String::as_str),
        Some("edit.copy")
    );
}

#[test]
fn test_layout_pass_uses_half_display_height() {
    let builder = CompositionBuilder::new();
    let source = DefinitionSource::built_in("builtin/ribbon.toml", RIBBON_DEFINITION);
    builder.update_from_definition(&source).unwrap();

    let mut surface = HeadlessSurface::new(Size::new(1920, 1080));
    builder.build(&mut surface).unwrap();

    assert_eq!(surface.preferred_size(), Size::new(1920, 540));
    assert_eq!(surface.minimum_size(), Size::new(640, 240));
    assert_eq!(surface.pack_count(), 1);
    assert_eq!(surface.size(), Size::new(1920, 540));
}

#[test]
fn test_layout_pass_clamps_to_minimum_floor() {
    let builder = CompositionBuilder::new();
    let source = DefinitionSource::built_in("builtin/ribbon.toml", RIBBON_DEFINITION);
    builder.update_from_definition(&source).unwrap();

    let mut surface = HeadlessSurface::new(Size::new(320, 200));
    builder.build(&mut surface).unwrap();

    assert_eq!(surface.preferred_size(), Size::new(640, 240));
}

#[test]
fn test_text_direction_is_applied_once_per_build() {
    let builder =
        CompositionBuilder::new().with_text_direction(TextDirection::RightToLeft);
    let source = DefinitionSource::built_in("builtin/ribbon.toml", RIBBON_DEFINITION);
    builder.update_from_definition(&source).unwrap();

    let mut surface = HeadlessSurface::new(Size::new(1920, 1080));
    builder.build(&mut surface).unwrap();
    assert_eq!(surface.text_direction(), TextDirection::RightToLeft);
    assert_eq!(surface.pack_count(), 1);

    builder.build(&mut surface).unwrap();
    assert_eq!(surface.pack_count(), 2);
}

#[test]
fn test_programmatic_add_composes_with_definition() {
    let builder = CompositionBuilder::new();
    let source = DefinitionSource::built_in("builtin/ribbon.toml", RIBBON_DEFINITION);
    builder.update_from_definition(&source).unwrap();

    // A plugin contributes a third action into the declared band.
    builder
        .add(
            Box::new(ActionContribution::new("Cut", "Cut", Some("edit.cut"))),
            &TreePath::parse("/ribbon/Home/Clipboard"),
            0,
        )
        .unwrap();

    let mut surface = HeadlessSurface::new(Size::new(1920, 1080));
    let composition = builder.build(&mut surface).unwrap();

    let clipboard = composition.find("Clipboard").unwrap();
    let actions: Vec<&str> = clipboard.children.iter().map(|c| c.key.as_str()).collect();
    // Copy holds position 0 by earlier arrival; Cut's position-0 request
    // ties and lands after it, before Paste.
    assert_eq!(actions, ["Copy", "Cut", "Paste"]);
}

#[test]
fn test_rebuild_after_reload_is_stable() {
    let builder = CompositionBuilder::new();
    let source = DefinitionSource::built_in("builtin/ribbon.toml", RIBBON_DEFINITION);

    builder.update_from_definition(&source).unwrap();
    let mut surface = HeadlessSurface::new(Size::new(1920, 1080));
    let first = builder.build(&mut surface).unwrap();

    builder.update_from_definition(&source).unwrap();
    let second = builder.build(&mut surface).unwrap();

    assert_eq!(first, second);
}
