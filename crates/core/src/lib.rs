// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tw-core: shared types for the treewarden tools

pub mod change;
pub mod clock;
pub mod id;
pub mod path;
pub mod project;

pub use change::{ChangeEvent, ChangeKind};
pub use clock::{Clock, FakeClock, SystemClock};
pub use id::ProjectId;
pub use path::{is_within, normalize};
pub use project::{Project, ProjectStatus, ProjectView};
