//! Ignore and mute specs

use crate::prelude::*;

#[test]
fn ignore_set_is_listed_and_applied() {
    let sandbox = Sandbox::new();
    sandbox.add_project("Docs", "docs");
    sandbox.file("docs/node_modules/pkg/index.js", "");
    sandbox.file("docs/.git/HEAD", "");

    sandbox
        .tw()
        .args(["ignore", "candidates", "Docs"])
        .passes()
        .stdout_has("node_modules");

    sandbox.tw().args(["ignore", "set", "Docs", "node_modules"]).passes();
    let names = sandbox.tw().args(["--json", "ignore", "list", "Docs"]).passes().json();
    assert_eq!(names, serde_json::json!(["node_modules"]));

    sandbox.tw().args(["update", "Docs"]).passes();
    assert!(!sandbox.read("docs/README.md").contains("node_modules"));
}

#[test]
fn mutes_are_promoted_into_ignore_names() {
    let sandbox = Sandbox::new();
    let id = sandbox.add_project("Docs", "docs");
    let muted = serde_json::json!([sandbox.abs("docs/build/out.log"), sandbox.abs("docs/cache")]);
    sandbox.file(&format!("state/mutes/{id}.json"), &muted.to_string());

    sandbox.tw().args(["project", "list"]).passes().stdout_has("muting");
    sandbox.tw().args(["mute", "list", "Docs"]).passes().stdout_has("out.log");

    sandbox
        .tw()
        .args(["mute", "promote", "Docs"])
        .passes()
        .stdout_has("Ignoring build")
        .stdout_has("Ignoring cache");

    sandbox.tw().args(["mute", "list", "Docs"]).passes().stdout_has("No muted paths");
    sandbox.tw().args(["project", "list"]).passes().stdout_has("stopped");
}
