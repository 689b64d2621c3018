//! Hook override and precedence tests for the render pipeline.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use blockparts::{Attributes, BlockHooks, DynamicBlock, HookRegistry};
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn block_fixture(name: &str) -> (TempDir, PathBuf) {
    let root = tempfile::tempdir().unwrap();
    let block_dir = root.path().join("blocks").join(name.replace('/', "-"));
    write_file(
        &block_dir.join("block.json"),
        &format!(r#"{{"name": "{name}"}}"#),
    );
    (root, block_dir)
}

fn shared_hooks() -> Rc<RefCell<HookRegistry>> {
    Rc::new(RefCell::new(HookRegistry::new()))
}

#[test]
fn template_dir_hook_redirects_primary_lookup() {
    let (root, block_dir) = block_fixture("acme/card");
    write_file(&root.path().join("custom/parts/acme/card.jinja"), "custom dir");
    // A template in the default location must not be picked up.
    write_file(
        &root.path().join("template-parts/blocks/acme/card.jinja"),
        "default dir",
    );

    let hooks = shared_hooks();
    hooks.borrow_mut().add(
        "acme/card",
        BlockHooks::new().template_dir(|_, _| "custom/parts".to_string()),
    );

    let mut block = DynamicBlock::builder(&block_dir)
        .search_root(root.path())
        .hooks(hooks)
        .build();

    assert_eq!(block.render(&Attributes::new(), None, None), "custom dir");
}

#[test]
fn template_dir_hook_value_is_trimmed_of_separators() {
    let (root, block_dir) = block_fixture("acme/card");
    write_file(&root.path().join("custom/parts/acme/card.jinja"), "custom dir");

    let hooks = shared_hooks();
    hooks.borrow_mut().add(
        "acme/card",
        BlockHooks::new().template_dir(|_, _| "/custom/parts/".to_string()),
    );

    let mut block = DynamicBlock::builder(&block_dir)
        .search_root(root.path())
        .hooks(hooks)
        .build();

    assert_eq!(block.render(&Attributes::new(), None, None), "custom dir");
}

#[test]
fn args_hook_contributes_template_arguments() {
    let (root, block_dir) = block_fixture("acme/card");
    write_file(
        &root.path().join("template-parts/blocks/acme/card.jinja"),
        "badge: {{ badge }}",
    );

    let hooks = shared_hooks();
    hooks.borrow_mut().add(
        "acme/card",
        BlockHooks::new().template_args(|mut args, _, _| {
            args.set("badge", "hot");
            args
        }),
    );

    let mut block = DynamicBlock::builder(&block_dir)
        .search_root(root.path())
        .hooks(hooks)
        .build();

    assert_eq!(block.render(&Attributes::new(), None, None), "badge: hot");
}

#[test]
fn args_hook_wins_over_computed_values() {
    let (root, block_dir) = block_fixture("acme/card");
    write_file(
        &root.path().join("template-parts/blocks/acme/card.jinja"),
        r#"<div class="{{ class_name }}">{{ content }}</div>"#,
    );

    let hooks = shared_hooks();
    hooks.borrow_mut().add(
        "acme/card",
        BlockHooks::new().template_args(|mut args, _, _| {
            args.set("class_name", "hook-class");
            args
        }),
    );

    let mut block = DynamicBlock::builder(&block_dir)
        .search_root(root.path())
        .hooks(hooks)
        .build();

    let mut attributes = Attributes::new();
    attributes.insert("className", "computed-class");

    let output = block.render(&attributes, Some("hi"), None);
    assert_eq!(output, r#"<div class="hook-class">hi</div>"#);
}

#[test]
fn args_hook_receives_request_attributes() {
    let (root, block_dir) = block_fixture("acme/card");
    write_file(
        &root.path().join("template-parts/blocks/acme/card.jinja"),
        "{{ alignment }}",
    );

    let hooks = shared_hooks();
    hooks.borrow_mut().add(
        "acme/card",
        BlockHooks::new().template_args(|mut args, attributes, _| {
            args.set("alignment", attributes.align().unwrap_or("none"));
            args
        }),
    );

    let mut block = DynamicBlock::builder(&block_dir)
        .search_root(root.path())
        .hooks(hooks)
        .build();

    let mut attributes = Attributes::new();
    attributes.insert("align", "wide");
    assert_eq!(block.render(&attributes, None, None), "wide");
}

#[test]
fn fallback_path_hook_redirects_secondary_lookup() {
    let (root, block_dir) = block_fixture("acme/card");
    write_file(&block_dir.join("template.jinja"), "default fallback");
    write_file(&block_dir.join("alternate.jinja"), "alternate fallback");

    let hooks = shared_hooks();
    hooks.borrow_mut().add(
        "acme/card",
        BlockHooks::new().fallback_path(|_, block| block.dir.join("alternate.jinja")),
    );

    let mut block = DynamicBlock::builder(&block_dir)
        .search_root(root.path())
        .hooks(hooks)
        .build();

    assert_eq!(
        block.render(&Attributes::new(), None, None),
        "alternate fallback"
    );
}

#[test]
fn hook_chains_apply_in_registration_order() {
    let (root, block_dir) = block_fixture("acme/card");
    write_file(
        &root.path().join("template-parts/blocks/acme/card.jinja"),
        "{{ badge }}",
    );

    let hooks = shared_hooks();
    hooks.borrow_mut().add(
        "acme/card",
        BlockHooks::new()
            .template_args(|mut args, _, _| {
                args.set("badge", "first");
                args
            })
            .template_args(|mut args, _, _| {
                args.set("badge", "second");
                args
            }),
    );

    let mut block = DynamicBlock::builder(&block_dir)
        .search_root(root.path())
        .hooks(hooks)
        .build();

    // The later registration sees (and overwrites) the earlier one's value.
    assert_eq!(block.render(&Attributes::new(), None, None), "second");
}

#[test]
fn hooks_for_other_identities_do_not_fire() {
    let (root, block_dir) = block_fixture("acme/card");
    write_file(
        &root.path().join("template-parts/blocks/acme/card.jinja"),
        "badge: {{ badge }}",
    );

    let hooks = shared_hooks();
    hooks.borrow_mut().add(
        "acme/hero",
        BlockHooks::new().template_args(|mut args, _, _| {
            args.set("badge", "hero only");
            args
        }),
    );

    let mut block = DynamicBlock::builder(&block_dir)
        .search_root(root.path())
        .hooks(hooks)
        .build();

    assert_eq!(block.render(&Attributes::new(), None, None), "badge: ");
}

#[test]
fn hooks_registered_after_build_still_apply() {
    let (root, block_dir) = block_fixture("acme/card");
    write_file(
        &root.path().join("template-parts/blocks/acme/card.jinja"),
        "{{ badge }}",
    );

    let hooks = shared_hooks();
    let mut block = DynamicBlock::builder(&block_dir)
        .search_root(root.path())
        .hooks(Rc::clone(&hooks))
        .build();

    // Late binding: the registry is shared, not snapshotted at build time.
    hooks.borrow_mut().add(
        "acme/card",
        BlockHooks::new().template_args(|mut args, _, _| {
            args.set("badge", "late");
            args
        }),
    );

    assert_eq!(block.render(&Attributes::new(), None, None), "late");
}
