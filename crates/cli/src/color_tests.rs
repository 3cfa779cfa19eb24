// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use yare::parameterized;

fn force_color() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");
}

fn disable_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");
}

#[test]
#[serial]
fn styles_follow_color_setting() {
    let plain = format!("{:?}", Styles::plain());

    force_color();
    assert_ne!(format!("{:?}", styles()), plain);

    disable_color();
    assert_eq!(format!("{:?}", styles()), plain);
}

#[test]
#[serial]
fn no_color_wins_over_forced_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::set_var("COLOR", "1");
    assert!(!should_colorize());
    std::env::remove_var("NO_COLOR");
    assert!(should_colorize());
}

#[test]
#[serial]
fn helpers_are_plain_without_color() {
    disable_color();
    assert_eq!(header("NAME"), "NAME");
    assert_eq!(muted("-"), "-");
    assert_eq!(status(ProjectStatus::Running, 9), "running  ");
}

#[parameterized(
    running = { ProjectStatus::Running, codes::RUNNING },
    muting = { ProjectStatus::Muting, codes::WARNING },
    invalid_path = { ProjectStatus::InvalidPath, codes::ERROR },
    stopped = { ProjectStatus::Stopped, codes::MUTED },
)]
#[serial]
fn status_colors(value: ProjectStatus, code: u8) {
    force_color();
    let painted = status(value, 0);
    assert!(painted.starts_with(&format!("\x1b[38;5;{code}m")));
    assert!(painted.contains(&value.to_string()));
    assert!(painted.ends_with("\x1b[0m"));
}
