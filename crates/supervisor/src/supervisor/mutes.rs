// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mute records and the ignore set they feed.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::PathBuf;

use tw_core::ProjectId;
use tw_storage::Json;

use super::Supervisor;
use crate::registry;
use crate::SupervisorError;

impl Supervisor {
    /// Paths the project's worker currently suppresses.
    pub fn mutes(&self, key: &str) -> Result<Vec<PathBuf>, SupervisorError> {
        let project = self.project(key)?;
        Ok(self.mutes_of(&project.id))
    }

    /// Read a mute record. A missing or unreadable record means no mutes.
    pub(super) fn mutes_of(&self, id: &ProjectId) -> Vec<PathBuf> {
        let path = self.config.mute_record(id);
        if !path.exists() {
            return Vec::new();
        }
        match self.gateway.read::<Json<Vec<PathBuf>>>(&path) {
            Ok(committed) => committed.value,
            Err(e) => {
                tracing::warn!(project = %id, error = %e, "ignoring unreadable mute record");
                Vec::new()
            }
        }
    }

    /// Turn the current mutes into ignore names, clear the mute record, and
    /// restart the worker if it is running. Returns the names newly added.
    pub fn promote_mutes(&mut self, key: &str) -> Result<BTreeSet<String>, SupervisorError> {
        let id = self.project(key)?.id;
        let suggested: BTreeSet<String> =
            self.mutes_of(&id).iter().filter_map(|p| registry::ignore_name_for(p)).collect();

        let added = self.commit(|projects| {
            let i = registry::position(projects, id.as_str())?;
            let project = &mut projects[i];
            let added: BTreeSet<String> =
                suggested.difference(&project.ignore).cloned().collect();
            project.ignore.extend(added.iter().cloned());
            Ok(added)
        })?;

        match fs::remove_file(self.config.mute_record(&id)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }
        tracing::info!(project = %id, added = added.len(), "promoted mutes to ignore names");

        if !added.is_empty() {
            self.reload(&id)?;
        }
        Ok(added)
    }

    pub fn ignore_list(&self, key: &str) -> Result<BTreeSet<String>, SupervisorError> {
        Ok(self.project(key)?.ignore)
    }

    /// Replace the ignore set. Restarts a running worker when it changed.
    pub fn ignore_set(
        &mut self,
        key: &str,
        names: &[String],
    ) -> Result<BTreeSet<String>, SupervisorError> {
        let names = registry::check_ignore_names(names)?;
        let id = self.project(key)?.id;

        let changed = self.commit(|projects| {
            let i = registry::position(projects, id.as_str())?;
            let changed = projects[i].ignore != names;
            projects[i].ignore = names.clone();
            Ok(changed)
        })?;
        if changed {
            self.reload(&id)?;
        }
        Ok(names)
    }

    /// Names worth offering for the ignore set: the current ones plus the
    /// root's top-level directories, minus the built-in ignores.
    pub fn ignore_candidates(&self, key: &str) -> Result<BTreeSet<String>, SupervisorError> {
        let project = self.project(key)?;
        let mut names = project.ignore;
        for entry in fs::read_dir(&project.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.insert(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.retain(|name| !tw_render::SYSTEM_IGNORES.contains(&name.as_str()));
        Ok(names)
    }
}
