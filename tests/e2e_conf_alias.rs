//! End-to-end config and alias handling.

mod common;

use common::{IshuWorkspace, run_ishu};
use std::fs;

#[test]
fn e2e_conf_set_get_list() {
    let workspace = IshuWorkspace::new();

    // get/list before any config exists.
    let get = run_ishu(&workspace, ["conf", "--get", "user"], "conf_get_early");
    get.assert_failure("conf_get_early");
    assert!(get.stderr.contains("No valid config found"));

    run_ishu(&workspace, ["conf", "--set", "user", "alice"], "conf_set")
        .assert_success("conf_set");

    let config_path = workspace.root.join(".config").join("ishu.conf");
    assert!(config_path.is_file());
    let raw = fs::read_to_string(&config_path).expect("config file");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("config json");
    assert_eq!(json["user"], "alice");

    let get = run_ishu(&workspace, ["conf", "--get", "user"], "conf_get");
    get.assert_success("conf_get");
    assert!(get.stdout.contains("user = alice"));

    let list = run_ishu(&workspace, ["conf", "--list"], "conf_list");
    list.assert_success("conf_list");
    assert!(list.stdout.contains("user = alice"));

    // Invalid usernames are rejected.
    let bad = run_ishu(&workspace, ["conf", "--set", "user", "al1ce"], "conf_bad");
    bad.assert_failure("conf_bad");
    assert!(bad.stderr.contains("a-z and A-Z"));

    let unknown = run_ishu(&workspace, ["conf", "--get", "ghost"], "conf_unknown");
    unknown.assert_failure("conf_unknown");
}

#[test]
fn e2e_alias_expansion() {
    let workspace = IshuWorkspace::initialized("alice");
    run_ishu(&workspace, ["open", "Tagged", "-t", "bug"], "open_tagged")
        .assert_success("open_tagged");
    run_ishu(&workspace, ["open", "Untagged"], "open_untagged").assert_success("open_untagged");

    run_ishu(
        &workspace,
        ["alias", "--set", "bugs", "list -t bug"],
        "alias_set",
    )
    .assert_success("alias_set");

    // The alias expands with trailing arguments preserved.
    let bugs = run_ishu(&workspace, ["bugs"], "run_alias");
    bugs.assert_success("run_alias");
    assert!(bugs.stdout.contains("Tagged"));
    assert!(!bugs.stdout.contains("Untagged"));

    let list = run_ishu(&workspace, ["alias"], "alias_list");
    list.assert_success("alias_list");
    assert!(list.stdout.contains("bugs = list -t bug"));

    run_ishu(&workspace, ["alias", "--unset", "bugs"], "alias_unset")
        .assert_success("alias_unset");
    let gone = run_ishu(&workspace, ["bugs"], "run_gone_alias");
    gone.assert_failure("run_gone_alias");

    let unset_missing = run_ishu(&workspace, ["alias", "--unset", "ghost"], "alias_missing");
    unset_missing.assert_failure("alias_missing");
}

#[test]
fn e2e_init_is_idempotent() {
    let workspace = IshuWorkspace::new();
    run_ishu(&workspace, ["conf", "--set", "user", "alice"], "conf")
        .assert_success("conf");

    run_ishu(&workspace, ["init"], "init").assert_success("init");
    assert!(workspace.ishu_dir().is_dir());

    // A second init reports and succeeds.
    let again = run_ishu(&workspace, ["init"], "init_again");
    again.assert_success("init_again");
    assert!(again.stdout.contains("already an ishu project"));
}
