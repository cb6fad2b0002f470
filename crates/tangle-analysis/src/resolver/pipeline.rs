//! Dependency resolvers: what to do with each specifier of a file.
//!
//! The engine runs its resolvers in order for every specifier. Each one may
//! ask for the specifier itself to be followed, add more targets, record
//! builtin or third-party usage on the node, and stop the remaining resolvers
//! with `exit`.

use std::path::Path;

use async_trait::async_trait;
use tangle_config::TangleConfig;
use tangle_graph::ModuleGraph;

use super::aliases::PathAliases;
use super::extensions::resolve_path;
use crate::classify::{is_binary, is_builtin, is_json, is_third_party};
use crate::manifest::extract_package_name;
use crate::runtime::Runtime;

/// Everything a resolver may look at for one specifier.
pub struct ResolverContext<'a> {
    /// The specifier as written in the source file.
    pub specifier: &'a str,
    /// Real path the specifier maps to through a path alias, if any.
    pub alias_target: Option<&'a Path>,
    /// The graph under construction; resolvers record dependencies on it.
    pub graph: &'a mut ModuleGraph,
    pub config: &'a TangleConfig,
    /// Absolute path of the file containing the specifier.
    pub raw_node_path: &'a Path,
    /// Node id of that file.
    pub resolved_id: &'a str,
    pub runtime: &'a dyn Runtime,
    pub aliases: &'a PathAliases,
}

/// A path the engine should try to turn into an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowTarget {
    pub specifier: String,
    /// `specifier` is an absolute real path produced by alias or `baseUrl`
    /// resolution rather than a path relative to the importing file.
    pub is_alias: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverOutcome {
    /// Follow the specifier relative to the importing file.
    pub follow_specifier: bool,
    pub additional_specifiers_to_follow: Vec<FollowTarget>,
    /// Skip the resolvers after this one.
    pub exit: bool,
}

impl ResolverOutcome {
    /// Nothing to follow; later resolvers still run.
    pub fn pass() -> Self {
        Self::default()
    }

    /// Nothing to follow, and no later resolver runs.
    pub fn handled() -> Self {
        Self {
            exit: true,
            ..Self::default()
        }
    }

    fn follow_path(path: &Path) -> Self {
        Self {
            follow_specifier: false,
            additional_specifiers_to_follow: vec![FollowTarget {
                specifier: path.to_string_lossy().into_owned(),
                is_alias: true,
            }],
            exit: true,
        }
    }
}

/// One stage of the resolution pipeline.
#[async_trait]
pub trait DependencyResolver: Send + Sync + std::fmt::Debug {
    async fn resolve(&self, ctx: &mut ResolverContext<'_>) -> ResolverOutcome;
}

/// Default resolver for JavaScript and TypeScript projects.
///
/// Always exits, so resolvers placed after it never run.
#[derive(Debug, Clone, Copy, Default)]
pub struct EcmaScriptDependencyResolver;

#[async_trait]
impl DependencyResolver for EcmaScriptDependencyResolver {
    async fn resolve(&self, ctx: &mut ResolverContext<'_>) -> ResolverOutcome {
        if let Some(target) = ctx.alias_target {
            return ResolverOutcome::follow_path(target);
        }

        let specifier = ctx.specifier;
        let tracking = ctx.config.dependency_tracking;

        if is_json(specifier) || is_binary(specifier) {
            return ResolverOutcome::handled();
        }

        if is_builtin(specifier) {
            if tracking.builtin {
                ctx.graph
                    .add_builtin_dependency(ctx.resolved_id, specifier);
            }
            return ResolverOutcome::handled();
        }

        if is_third_party(specifier) {
            if let Some(base_url) = ctx.aliases.base_url() {
                let candidate =
                    resolve_path(&base_url.join(specifier), &ctx.config.file_extensions, ctx.runtime)
                        .await;
                if ctx.runtime.is_file(&candidate).await {
                    return ResolverOutcome::follow_path(&candidate);
                }
            }
            if tracking.third_party {
                ctx.graph
                    .add_third_party_dependency(ctx.resolved_id, extract_package_name(specifier));
            }
            return ResolverOutcome::handled();
        }

        ResolverOutcome {
            follow_specifier: true,
            exit: true,
            ..ResolverOutcome::default()
        }
    }
}
