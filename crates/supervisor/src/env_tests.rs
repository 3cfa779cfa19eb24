// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn clear() {
    for var in [
        "TW_STATE_DIR",
        "XDG_STATE_HOME",
        "TW_LOCK_TIMEOUT_MS",
        "TW_BACKUP_RETENTION",
        "TW_POLL_INTERVAL_MS",
        "TW_STOP_GRACE_MS",
        "TW_WORKER_BIN",
    ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn state_dir_prefers_explicit_override() {
    clear();
    std::env::set_var("XDG_STATE_HOME", "/xdg");
    std::env::set_var("TW_STATE_DIR", "/explicit");
    assert_eq!(state_dir().unwrap(), PathBuf::from("/explicit"));
    clear();
}

#[test]
#[serial]
fn state_dir_falls_back_to_xdg() {
    clear();
    std::env::set_var("XDG_STATE_HOME", "/xdg");
    assert_eq!(state_dir().unwrap(), PathBuf::from("/xdg/treewarden"));
    clear();
}

#[test]
#[serial]
fn durations_default_when_unset_or_garbage() {
    clear();
    assert_eq!(poll_interval(), Duration::from_secs(2));
    assert_eq!(stop_grace(), Duration::from_secs(3));
    std::env::set_var("TW_POLL_INTERVAL_MS", "not a number");
    assert_eq!(poll_interval(), Duration::from_secs(2));
    std::env::set_var("TW_POLL_INTERVAL_MS", "250");
    assert_eq!(poll_interval(), Duration::from_millis(250));
    clear();
}

#[test]
#[serial]
fn zero_retention_is_ignored() {
    clear();
    std::env::set_var("TW_BACKUP_RETENTION", "0");
    assert_eq!(backup_retention(), 5);
    std::env::set_var("TW_BACKUP_RETENTION", "9");
    assert_eq!(backup_retention(), 9);
    clear();
}

#[test]
#[serial]
fn empty_worker_bin_is_unset() {
    clear();
    std::env::set_var("TW_WORKER_BIN", "");
    assert_eq!(worker_bin(), None);
    clear();
}
