// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adaptive suppression of change-event floods.
//!
//! Rules are checked in order; the first one that fires decides:
//!
//! | Rule | Trigger | Mutes |
//! |---|---|---|
//! | already muted | path or an ancestor is muted | — |
//! | burst creation | `burst_threshold` creations in one dir within `burst_period` | the dir |
//! | hot file | `hot_file_threshold` modifications of one path within `hot_file_period` | the path |
//! | size growth | growth since the oldest sample within `size_growth_period` exceeds `size_growth_bytes` | the path |
//!
//! Mutes are permanent for the lifetime of the throttler.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tw_core::{ChangeEvent, ChangeKind, Clock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottleConfig {
    pub hot_file_threshold: usize,
    pub hot_file_period: Duration,
    pub burst_threshold: usize,
    pub burst_period: Duration,
    pub size_growth_bytes: u64,
    pub size_growth_period: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            hot_file_threshold: 5,
            hot_file_period: Duration::from_secs(5),
            burst_threshold: 20,
            burst_period: Duration::from_secs(10),
            size_growth_bytes: 100 * 1024 * 1024,
            size_growth_period: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuppressReason {
    AlreadyMuted,
    BurstCreation { dir: PathBuf },
    HotFile,
    SizeGrowth { grew_by: u64 },
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuppressReason::AlreadyMuted => f.write_str("already muted"),
            SuppressReason::BurstCreation { dir } => {
                write!(f, "burst creation in {}", dir.display())
            }
            SuppressReason::HotFile => f.write_str("hot file"),
            SuppressReason::SizeGrowth { grew_by } => write!(f, "grew by {grew_by} bytes"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Admit,
    Suppress(SuppressReason),
}

impl Decision {
    pub fn is_admit(&self) -> bool {
        matches!(self, Decision::Admit)
    }
}

pub struct Throttler<C: Clock> {
    config: ThrottleConfig,
    clock: C,
    muted: BTreeSet<PathBuf>,
    /// Creation timestamps per parent dir
    creations: HashMap<PathBuf, VecDeque<Instant>>,
    /// Modification timestamps per path
    modifications: HashMap<PathBuf, VecDeque<Instant>>,
    /// (timestamp, size) samples per path
    sizes: HashMap<PathBuf, VecDeque<(Instant, u64)>>,
}

impl<C: Clock> Throttler<C> {
    pub fn new(config: ThrottleConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            muted: BTreeSet::new(),
            creations: HashMap::new(),
            modifications: HashMap::new(),
            sizes: HashMap::new(),
        }
    }

    /// Current mute set. Only ever grows.
    pub fn muted(&self) -> &BTreeSet<PathBuf> {
        &self.muted
    }

    /// True if `path` or any of its ancestors is muted.
    pub fn is_muted(&self, path: &Path) -> bool {
        path.ancestors().any(|p| self.muted.contains(p))
    }

    pub fn observe(&mut self, event: &ChangeEvent) -> Decision {
        if self.is_muted(&event.path) {
            return Decision::Suppress(SuppressReason::AlreadyMuted);
        }
        let now = self.clock.now();

        match event.kind {
            ChangeKind::Created => self.observe_creation(&event.path, now),
            ChangeKind::Modified => self.observe_modification(&event.path, event.size, now),
            ChangeKind::Deleted => Decision::Admit,
        }
    }

    fn observe_creation(&mut self, path: &Path, now: Instant) -> Decision {
        let Some(dir) = path.parent() else {
            return Decision::Admit;
        };
        let window = self.creations.entry(dir.to_path_buf()).or_default();
        expire(window, now, self.config.burst_period, |t| *t);
        window.push_back(now);
        if window.len() >= self.config.burst_threshold {
            self.creations.remove(dir);
            self.muted.insert(dir.to_path_buf());
            return Decision::Suppress(SuppressReason::BurstCreation { dir: dir.to_path_buf() });
        }
        Decision::Admit
    }

    fn observe_modification(&mut self, path: &Path, size: Option<u64>, now: Instant) -> Decision {
        let window = self.modifications.entry(path.to_path_buf()).or_default();
        expire(window, now, self.config.hot_file_period, |t| *t);
        window.push_back(now);
        if window.len() >= self.config.hot_file_threshold {
            self.modifications.remove(path);
            self.muted.insert(path.to_path_buf());
            return Decision::Suppress(SuppressReason::HotFile);
        }

        let Some(size) = size else {
            return Decision::Admit;
        };
        let samples = self.sizes.entry(path.to_path_buf()).or_default();
        expire(samples, now, self.config.size_growth_period, |(t, _)| *t);
        if let Some(&(_, oldest)) = samples.front() {
            let grew_by = size.saturating_sub(oldest);
            if grew_by > self.config.size_growth_bytes {
                self.sizes.remove(path);
                self.muted.insert(path.to_path_buf());
                return Decision::Suppress(SuppressReason::SizeGrowth { grew_by });
            }
        }
        samples.push_back((now, size));
        Decision::Admit
    }
}

/// Drop entries at least `period` old from the front of `window`.
fn expire<T>(window: &mut VecDeque<T>, now: Instant, period: Duration, at: impl Fn(&T) -> Instant) {
    while window.front().is_some_and(|entry| now.duration_since(at(entry)) >= period) {
        window.pop_front();
    }
}

#[cfg(test)]
#[path = "throttle_tests.rs"]
mod tests;
