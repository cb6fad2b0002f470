//! Specifier resolution.
//!
//! ```text
//! specifier ─► PathAliases ─► DependencyResolver pipeline ─► resolve_path ─► edge
//!                                      │
//!                                      └─► builtin / third-party recorded on the node
//! ```

pub mod aliases;
pub mod extensions;
pub mod pipeline;
pub mod tsconfig;

pub use aliases::{MAX_ALIAS_HOPS, PathAliases};
pub use extensions::resolve_path;
pub use pipeline::{
    DependencyResolver, EcmaScriptDependencyResolver, FollowTarget, ResolverContext,
    ResolverOutcome,
};
pub use tsconfig::TsConfigError;
