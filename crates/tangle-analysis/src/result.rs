use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use path_clean::PathClean;
use serde::Serialize;
use tangle_config::TangleConfig;
use tangle_graph::ModuleGraph;

use crate::error::Result;
use crate::manifest::{PackageJson, UnusedDependencyFinder};
use crate::runtime::Runtime;

/// The graph of one analysis run and the queries over it.
#[derive(Debug)]
pub struct AnalysisResult {
    pub graph: ModuleGraph,
    /// Node ids in the order their files were visited.
    pub files: Vec<String>,
    config: TangleConfig,
    runtime: Arc<dyn Runtime>,
    cwd: PathBuf,
}

/// Options for [`AnalysisResult::find_unused_dependencies`].
#[derive(Default, Clone, Copy)]
pub struct UnusedDependencyOptions<'a> {
    /// Additional source of unused packages, merged after the graph's.
    pub finder: Option<&'a dyn UnusedDependencyFinder>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusedDependencies {
    /// Declared packages never imported, in manifest declaration order.
    pub third_party: Vec<String>,
}

impl AnalysisResult {
    pub(crate) fn new(
        graph: ModuleGraph,
        files: Vec<String>,
        config: TangleConfig,
        runtime: Arc<dyn Runtime>,
        cwd: PathBuf,
    ) -> Self {
        Self {
            graph,
            files,
            config,
            runtime,
            cwd,
        }
    }

    pub fn config(&self) -> &TangleConfig {
        &self.config
    }

    /// Elementary cycles, bounded by `circular_max_depth`.
    pub fn find_circular_dependencies(&self) -> Vec<Vec<String>> {
        self.graph.find_cycles(self.config.circular_max_depth)
    }

    pub fn has_circular_dependencies(&self) -> bool {
        self.graph.has_cycles(self.config.circular_max_depth)
    }

    /// Files that import nothing local.
    pub fn find_leaves(&self) -> Vec<String> {
        self.graph.leaves()
    }

    /// Every file that depends on `id`, directly or transitively.
    pub fn find_parents_of(&self, id: &str) -> Vec<String> {
        self.graph.deep_ancestors(id)
    }

    /// Packages declared in the manifest that the graph never imports.
    ///
    /// The manifest is read from `manifest_path` under the working directory.
    /// Without third-party tracking the graph observes no packages, so every
    /// declared dependency is reported.
    pub async fn find_unused_dependencies(
        &self,
        options: UnusedDependencyOptions<'_>,
    ) -> Result<UnusedDependencies> {
        if !self.config.dependency_tracking.third_party {
            tracing::warn!(
                "third-party tracking is disabled; every declared dependency will be reported unused"
            );
        }

        let path = self.cwd.join(&self.config.manifest_path).clean();
        let manifest = PackageJson::from_path(self.runtime.as_ref(), &path).await?;

        let external = match options.finder {
            Some(finder) => finder.find_unused(&manifest).await,
            None => Vec::new(),
        };
        Ok(UnusedDependencies {
            third_party: self
                .graph
                .unused_third_party_dependencies(manifest.dependency_names(), external),
        })
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis Result")?;
        writeln!(f, "================")?;
        writeln!(f, "Files: {}", self.files.len())?;
        writeln!(f, "Leaves: {}", self.find_leaves().len())?;

        let cycles = self.find_circular_dependencies();
        writeln!(f, "Circular dependencies: {}", cycles.len())?;
        for cycle in &cycles {
            writeln!(f, "  - {}", cycle.join(" -> "))?;
        }

        let third_party = self.graph.third_party_dependencies();
        if !third_party.is_empty() {
            writeln!(f, "Third-party dependencies: {}", third_party.len())?;
        }
        let builtin = self.graph.builtin_dependencies();
        if !builtin.is_empty() {
            writeln!(f, "Builtin dependencies: {}", builtin.len())?;
        }

        Ok(())
    }
}
