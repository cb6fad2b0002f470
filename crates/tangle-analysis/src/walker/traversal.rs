//! Depth-first traversal logic for graph walking.
//!
//! Files are explored with an explicit work stack. A file is marked visited
//! when it is popped, and its unvisited children are pushed in reverse, which
//! reproduces a recursive pre-order walk without recursion: the first
//! specifier of a file is fully explored before the second.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use rustc_hash::FxHashSet;
use tangle_config::TangleConfig;
use tangle_graph::ModuleGraph;

use super::{ModuleWalker, WalkOptions};
use crate::cache::{IncrementalCache, content_hash};
use crate::paths::NodeIds;
use crate::resolver::{DependencyResolver, PathAliases, ResolverContext, resolve_path};
use crate::runtime::Runtime;

/// Graph and visit order produced by one traversal.
#[derive(Debug, Default)]
pub struct TraversalOutput {
    pub graph: ModuleGraph,
    /// Node ids in the order their files were visited.
    pub files: Vec<String>,
}

/// Traversal state and logic for one run.
pub struct Traversal<'a> {
    config: &'a TangleConfig,
    runtime: &'a dyn Runtime,
    walker: &'a dyn ModuleWalker,
    resolvers: &'a [Arc<dyn DependencyResolver>],
    aliases: &'a PathAliases,
    ids: NodeIds,
    cache: Option<IncrementalCache>,
}

/// Mutable state shared by every root of a run.
#[derive(Default)]
struct WalkState {
    output: TraversalOutput,
    visited: FxHashSet<PathBuf>,
}

impl<'a> Traversal<'a> {
    pub fn new(
        config: &'a TangleConfig,
        runtime: &'a dyn Runtime,
        walker: &'a dyn ModuleWalker,
        resolvers: &'a [Arc<dyn DependencyResolver>],
        aliases: &'a PathAliases,
        ids: NodeIds,
    ) -> Self {
        Self {
            config,
            runtime,
            walker,
            resolvers,
            aliases,
            ids,
            cache: None,
        }
    }

    /// Consult and update `cache` while walking.
    pub fn with_cache(mut self, cache: IncrementalCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Walk every file reachable from `roots`, which must be absolute and clean.
    ///
    /// Roots share one graph and one visited set, so a root already reached
    /// from an earlier one is not walked again. The cache, if any, is saved
    /// once the walk completes.
    pub async fn traverse(mut self, roots: Vec<PathBuf>) -> TraversalOutput {
        let mut state = WalkState::default();
        let mut stack: Vec<PathBuf> = roots.into_iter().rev().collect();

        while let Some(path) = stack.pop() {
            if !state.visited.insert(path.clone()) {
                continue;
            }
            let children = self.visit(&path, &mut state).await;
            stack.extend(children.into_iter().rev());
        }

        if let Some(cache) = &self.cache {
            cache.save(self.runtime, &state.output.graph).await;
        }

        tracing::debug!(files = state.output.files.len(), "traversal complete");
        state.output
    }

    /// Register `path`, resolve its specifiers into edges and return the
    /// children still to be walked, in specifier order.
    async fn visit(&mut self, path: &Path, state: &mut WalkState) -> Vec<PathBuf> {
        let id = self.ids.to_id(path);
        state.output.graph.add_node(&id);
        state.output.files.push(id.clone());

        let size = self
            .runtime
            .metadata(path)
            .await
            .map(|metadata| metadata.size)
            .unwrap_or(0);
        state.output.graph.set_size(&id, size);

        let file_dir = path.parent().unwrap_or(path).to_path_buf();
        let specifiers = self.specifiers(path, &id, &file_dir).await;

        let mut children: Vec<PathBuf> = Vec::new();
        for specifier in &specifiers {
            for target in self.targets(specifier, path, &id, &file_dir, state).await {
                let resolved =
                    resolve_path(&target.clean(), &self.config.file_extensions, self.runtime).await;

                if !self.runtime.is_file(&resolved).await {
                    tracing::debug!(
                        from = %id,
                        specifier = %specifier,
                        "specifier does not resolve to a file"
                    );
                    continue;
                }

                let child_id = self.ids.to_id(&resolved);
                state.output.graph.add_edge(&id, &child_id);
                if !state.visited.contains(&resolved) && !children.contains(&resolved) {
                    children.push(resolved);
                }
            }
        }
        children
    }

    /// Specifiers of `path`, restored from the cache when its content is
    /// unchanged and extracted by the walker otherwise.
    async fn specifiers(&mut self, path: &Path, id: &str, file_dir: &Path) -> Vec<String> {
        let content = match self.runtime.read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read module");
                return Vec::new();
            }
        };

        if let Some(cache) = self.cache.as_mut() {
            let hash = content_hash(&content);
            cache.stage(id, &hash);
            if cache.is_unaffected(id, &hash) {
                if let Some(specifiers) = cache.restore(id, &self.ids, file_dir) {
                    tracing::trace!(id, "restored from cache");
                    return specifiers;
                }
            }
        }

        let options = WalkOptions {
            track_type_only: self.config.dependency_tracking.type_only,
        };
        match self.walker.walk(path, &content, &options) {
            Ok(specifiers) => specifiers,
            Err(e) => {
                tracing::warn!(error = %e, "failed to extract specifiers");
                Vec::new()
            }
        }
    }

    /// Run the resolver pipeline for one specifier and collect the paths to
    /// follow.
    async fn targets(
        &self,
        specifier: &str,
        path: &Path,
        id: &str,
        file_dir: &Path,
        state: &mut WalkState,
    ) -> Vec<PathBuf> {
        let alias_target = self.aliases.resolve(specifier);
        let mut follow_specifier = false;
        let mut additional = Vec::new();

        let mut ctx = ResolverContext {
            specifier,
            alias_target: alias_target.as_deref(),
            graph: &mut state.output.graph,
            config: self.config,
            raw_node_path: path,
            resolved_id: id,
            runtime: self.runtime,
            aliases: self.aliases,
        };
        for resolver in self.resolvers {
            let outcome = resolver.resolve(&mut ctx).await;
            follow_specifier |= outcome.follow_specifier;
            additional.extend(outcome.additional_specifiers_to_follow);
            if outcome.exit {
                break;
            }
        }

        let mut targets = Vec::with_capacity(additional.len() + 1);
        if follow_specifier {
            targets.push(file_dir.join(specifier));
        }
        for target in additional {
            if target.is_alias {
                targets.push(PathBuf::from(target.specifier));
            } else {
                targets.push(file_dir.join(target.specifier));
            }
        }
        targets
    }
}
