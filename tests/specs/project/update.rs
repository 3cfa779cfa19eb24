//! Update specs
//!
//! Verify artifact generation through `tw update`.

use crate::prelude::*;

#[test]
fn update_renders_listing_and_keeps_annotations() {
    let sandbox = Sandbox::new();
    sandbox.add_project("Docs", "docs");
    sandbox.file("docs/src/lib.rs", "");

    sandbox.tw().args(["update", "Docs"]).passes().stdout_has("Updated");
    let first = sandbox.read("docs/README.md");
    similar_asserts::assert_eq!(
        first,
        [
            "<!-- AUTO_TREE_START -->",
            "```",
            "docs/           # TODO: Add comment here",
            "├── src/        # TODO: Add comment here",
            "│   └── lib.rs  # TODO: Add comment here",
            "└── intro.md    # TODO: Add comment here",
            "```",
            "<!-- AUTO_TREE_END -->",
        ]
        .join("\n")
    );

    let annotated = first.replace("lib.rs  # TODO: Add comment here", "lib.rs  # crate root");
    sandbox.file("docs/README.md", &format!("# Docs\n\n{annotated}\n"));
    sandbox.tw().args(["update", "Docs"]).passes();

    let second = sandbox.read("docs/README.md");
    assert!(second.starts_with("# Docs\n\n<!-- AUTO_TREE_START -->"));
    assert!(second.contains("lib.rs  # crate root"));
}

#[test]
fn direct_update_needs_no_registration() {
    let sandbox = Sandbox::new();
    sandbox.file("loose/a.txt", "");
    sandbox.file("loose/target/debug.log", "");

    sandbox
        .tw()
        .args(["update", "--root", &sandbox.abs("loose"), "--output", &sandbox.abs("LOOSE.md")])
        .args(["--ignore", "target"])
        .passes();

    let text = sandbox.read("LOOSE.md");
    assert!(text.contains("a.txt"));
    assert!(!text.contains("target"));
    sandbox.tw().args(["project", "list"]).passes().stdout_has("No projects registered");
}

#[test]
fn update_without_target_fails() {
    let sandbox = Sandbox::new();
    sandbox.tw().args(["update"]).fails_with(1).stderr_has("--root and --output");
}
