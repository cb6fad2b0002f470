//! Standalone analysis API.
//!
//! The [`Analyzer`] builds the module graph of a project from an entrypoint
//! or, when none is configured, from every supported file under a root
//! directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use tangle_config::{TangleConfig, validate};

use crate::cache::{CACHE_DIR, CACHE_FILE, IncrementalCache};
use crate::error::{AnalyzeError, Result};
use crate::paths::NodeIds;
use crate::resolver::{DependencyResolver, EcmaScriptDependencyResolver, PathAliases, resolve_path};
use crate::result::AnalysisResult;
use crate::runtime::{NativeRuntime, Runtime};
use crate::walker::{EcmaScriptWalker, ModuleWalker, Traversal, discover_files};

/// Dependency graph analyzer for one project.
///
/// # Example
///
/// ```rust,no_run
/// use tangle_analysis::Analyzer;
/// use tangle_config::TangleConfig;
///
/// # async fn example() -> tangle_analysis::Result<()> {
/// let result = Analyzer::new(TangleConfig::with_entrypoint("src/index.ts"))
///     .analyze()
///     .await?;
///
/// for cycle in result.find_circular_dependencies() {
///     println!("cycle: {}", cycle.join(" -> "));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Analyzer {
    config: TangleConfig,
    runtime: Option<Arc<dyn Runtime>>,
    walker: Arc<dyn ModuleWalker>,
    resolvers: Vec<Arc<dyn DependencyResolver>>,
    root: Option<PathBuf>,
}

impl Analyzer {
    pub fn new(config: TangleConfig) -> Self {
        Self {
            config,
            runtime: None,
            walker: Arc::new(EcmaScriptWalker),
            resolvers: Vec::new(),
            root: None,
        }
    }

    /// Set the runtime for filesystem operations. Defaults to [`NativeRuntime`].
    pub fn runtime(mut self, runtime: Arc<dyn Runtime>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Replace the specifier extractor. Defaults to [`EcmaScriptWalker`].
    pub fn walker(mut self, walker: Arc<dyn ModuleWalker>) -> Self {
        self.walker = walker;
        self
    }

    /// Add a resolver that runs before the default one.
    ///
    /// Custom resolvers run in the order they were added. One that returns
    /// `exit` keeps the default resolver from seeing the specifier.
    pub fn resolver(mut self, resolver: Arc<dyn DependencyResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    /// Directory scanned when no entrypoint is configured, relative to the
    /// working directory. Defaults to the working directory itself.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn config(&self) -> &TangleConfig {
        &self.config
    }

    /// Build the module graph.
    ///
    /// Fails when the configuration is invalid, when the entrypoint does not
    /// resolve to a file, or when the scan root cannot be listed. Every other
    /// problem is logged and absorbed.
    pub async fn analyze(self) -> Result<AnalysisResult> {
        validate(&self.config)?;

        let runtime = self
            .runtime
            .unwrap_or_else(|| Arc::new(NativeRuntime::new()) as Arc<dyn Runtime>);
        let cwd = runtime.get_cwd()?;
        let config = self.config;

        let (roots, base_dir) = match &config.entrypoint {
            Some(entrypoint) => {
                let entry = resolve_entrypoint(runtime.as_ref(), &cwd, entrypoint, &config).await?;
                let base_dir = entry.parent().unwrap_or(&cwd).to_path_buf();
                (vec![entry], base_dir)
            }
            None => {
                let root = match &self.root {
                    Some(root) => cwd.join(root).clean(),
                    None => cwd.clone(),
                };
                let files = discover_files(runtime.as_ref(), &root, &config.file_extensions).await?;
                (files, root)
            }
        };
        tracing::info!(
            base_dir = %base_dir.display(),
            roots = roots.len(),
            incremental = config.incremental,
            "starting analysis"
        );

        let aliases =
            PathAliases::load(runtime.as_ref(), &cwd.join(&config.ts_config_path).clean()).await;
        let ids = NodeIds::new(&cwd, &base_dir, config.include_base_dir);

        let mut resolvers = self.resolvers;
        resolvers.push(Arc::new(EcmaScriptDependencyResolver));

        let mut traversal = Traversal::new(
            &config,
            runtime.as_ref(),
            self.walker.as_ref(),
            &resolvers,
            &aliases,
            ids,
        );
        if config.incremental {
            let cache_path = cwd.join(CACHE_DIR).join(CACHE_FILE);
            let cache = IncrementalCache::load(runtime.as_ref(), cache_path, &config).await;
            traversal = traversal.with_cache(cache);
        }
        let output = traversal.traverse(roots).await;

        tracing::info!(files = output.files.len(), "analysis complete");
        Ok(AnalysisResult::new(output.graph, output.files, config, runtime, cwd))
    }
}

async fn resolve_entrypoint(
    runtime: &dyn Runtime,
    cwd: &Path,
    entrypoint: &Path,
    config: &TangleConfig,
) -> Result<PathBuf> {
    let requested = cwd.join(entrypoint).clean();
    let resolved = resolve_path(&requested, &config.file_extensions, runtime).await;
    if runtime.is_file(&resolved).await {
        Ok(resolved)
    } else {
        Err(AnalyzeError::EntrypointNotFound(requested))
    }
}
