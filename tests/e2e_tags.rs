//! End-to-end tag registry workflows, including the confirmation
//! prompts on destructive operations.

mod common;

use common::{IshuWorkspace, run_ishu, run_ishu_with_stdin};
use std::fs;

#[test]
fn e2e_tag_register_and_list() {
    let workspace = IshuWorkspace::initialized("alice");

    let add = run_ishu(&workspace, ["tag", "-a", "bug", "ui"], "tag_add");
    add.assert_success("tag_add");
    assert!(add.stdout.contains("Added tags: bug, ui"));

    // Re-adding reports, does not fail.
    let again = run_ishu(&workspace, ["tag", "-a", "bug", "docs"], "tag_add_again");
    again.assert_success("tag_add_again");
    assert!(again.stdout.contains("Existing tags that weren't added: bug"));
    assert!(again.stdout.contains("Added tags: docs"));

    run_ishu(&workspace, ["open", "Crash", "-t", "bug", "wild"], "open")
        .assert_success("open");

    let list = run_ishu(&workspace, ["tag"], "tag_list");
    list.assert_success("tag_list");
    assert!(list.stdout.contains("bug"));
    // Used but never registered.
    assert!(list.stdout.contains("wild (unregistered)"));
    assert!(list.stdout.contains("1 unregistered tags!"));

    // Usage sort puts the used tags first.
    let usage = run_ishu(&workspace, ["tag", "-u"], "tag_usage");
    usage.assert_success("tag_usage");
    let bug_pos = usage.stdout.find("bug").expect("bug row");
    let docs_pos = usage.stdout.find("docs").expect("docs row");
    assert!(bug_pos < docs_pos, "used tag sorts before unused");
}

#[test]
fn e2e_tag_remove_with_yes() {
    let workspace = IshuWorkspace::initialized("alice");
    run_ishu(&workspace, ["tag", "-a", "bug"], "tag_add").assert_success("tag_add");
    run_ishu(&workspace, ["open", "Crash", "-t", "bug", "ui"], "open")
        .assert_success("open");

    let remove = run_ishu(&workspace, ["tag", "-r", "bug", "-y"], "tag_remove");
    remove.assert_success("tag_remove");
    assert!(remove.stdout.contains("Tags removed, 1 issues were modified."));

    let doc = workspace.read_issue_json("alice", 1);
    assert_eq!(doc["tags"], serde_json::json!(["ui"]));
    let registry = fs::read_to_string(workspace.registered_tags_path()).expect("registry");
    assert!(!registry.contains("bug"));
}

#[test]
fn e2e_tag_remove_declined_changes_nothing() {
    let workspace = IshuWorkspace::initialized("alice");
    run_ishu(&workspace, ["tag", "-a", "bug"], "tag_add").assert_success("tag_add");
    run_ishu(&workspace, ["open", "Crash", "-t", "bug"], "open").assert_success("open");

    let registry_bytes = fs::read(workspace.registered_tags_path()).expect("registry");
    let issue_bytes = fs::read(workspace.issue_path("alice", 1)).expect("issue");

    let remove = run_ishu_with_stdin(&workspace, ["tag", "-r", "bug"], "n\n", "tag_decline");
    remove.assert_success("tag_decline");
    assert!(remove.stdout.contains("Aborted tag removal, nothing was changed."));

    assert_eq!(
        fs::read(workspace.registered_tags_path()).expect("registry"),
        registry_bytes
    );
    assert_eq!(
        fs::read(workspace.issue_path("alice", 1)).expect("issue"),
        issue_bytes
    );
}

#[test]
fn e2e_tag_rename() {
    let workspace = IshuWorkspace::initialized("alice");
    run_ishu(&workspace, ["tag", "-a", "bug"], "tag_add").assert_success("tag_add");
    run_ishu(&workspace, ["open", "Crash", "-t", "bug"], "open").assert_success("open");

    let rename = run_ishu(
        &workspace,
        ["tag", "-e", "bug", "defect", "-y"],
        "tag_rename",
    );
    rename.assert_success("tag_rename");
    assert!(rename.stdout.contains("Tag 'bug' renamed to 'defect'."));

    let doc = workspace.read_issue_json("alice", 1);
    assert_eq!(doc["tags"], serde_json::json!(["defect"]));

    // Renaming to an already registered name fails.
    run_ishu(&workspace, ["tag", "-a", "other"], "tag_add_other")
        .assert_success("tag_add_other");
    let clash = run_ishu(
        &workspace,
        ["tag", "-e", "defect", "other", "-y"],
        "tag_rename_clash",
    );
    clash.assert_failure("tag_rename_clash");
}
