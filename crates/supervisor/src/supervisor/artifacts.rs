// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tw_core::Project;
use tw_storage::Text;

use super::Supervisor;
use crate::error::invalid;
use crate::registry;
use crate::SupervisorError;

impl Supervisor {
    /// Regenerate every output of a registered project.
    pub fn update(&self, key: &str) -> Result<Vec<PathBuf>, SupervisorError> {
        let project = self.project(key)?;
        if !project.root.is_dir() {
            return Err(invalid(format!(
                "root of '{}' does not exist: {}",
                project.name,
                project.root.display()
            )));
        }
        self.render_project(&project)
    }

    /// One-off regeneration for a root/output pair outside the registry.
    pub fn update_direct(
        &self,
        root: &str,
        output: &str,
        ignore: &[String],
    ) -> Result<PathBuf, SupervisorError> {
        let protected = self.config.protected_dirs();
        let root = registry::check_root(root, &protected)?;
        let output = registry::check_output(output, &protected)?;
        let ignore = registry::check_ignore_names(ignore)?;
        self.render_into(&root, &output, &ignore)?;
        Ok(output)
    }

    pub(super) fn render_project(&self, project: &Project) -> Result<Vec<PathBuf>, SupervisorError> {
        for output in &project.outputs {
            self.render_into(&project.root, output, &project.ignore)?;
        }
        tracing::info!(project = %project.id, outputs = project.outputs.len(), "artifacts updated");
        Ok(project.outputs.clone())
    }

    /// Render the listing of `root` into `output` inside one Gateway
    /// transaction, so the annotations merged are those of the file being
    /// replaced.
    fn render_into(
        &self,
        root: &Path,
        output: &Path,
        ignore: &BTreeSet<String>,
    ) -> Result<(), SupervisorError> {
        self.gateway.transact::<Text, SupervisorError, _>(output, |prior| {
            Ok(tw_render::render(root, &prior, ignore)?)
        })?;
        tracing::debug!(root = %root.display(), output = %output.display(), "rendered artifact");
        Ok(())
    }
}
