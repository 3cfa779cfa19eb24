// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod ignore;
pub mod lifecycle;
pub mod mute;
pub mod project;
pub mod update;
pub mod watch;
