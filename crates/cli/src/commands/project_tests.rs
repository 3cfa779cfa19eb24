// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::Parser;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: ProjectCommand,
}

fn edit_of(args: &[&str]) -> Edit {
    let cli = Cli::try_parse_from(std::iter::once("project").chain(args.iter().copied())).unwrap();
    match cli.command {
        ProjectCommand::Edit { field, .. } => field.into_edit(),
        _ => panic!("expected edit"),
    }
}

#[test]
fn edit_takes_exactly_one_field() {
    assert_eq!(edit_of(&["edit", "docs", "--name", "Handbook"]), Edit::Name("Handbook".into()));
    assert_eq!(edit_of(&["edit", "docs", "--root", "/w/new"]), Edit::Root("/w/new".into()));
    assert_eq!(
        edit_of(&["edit", "docs", "--output", "/w/A.md", "--output", "/w/B.md"]),
        Edit::Outputs(vec!["/w/A.md".into(), "/w/B.md".into()])
    );

    assert!(Cli::try_parse_from(["project", "edit", "docs"]).is_err());
    assert!(Cli::try_parse_from(["project", "edit", "docs", "--name", "a", "--root", "/b"]).is_err());
}
