//! Path aliases from `compilerOptions.paths`.
//!
//! The table is built once per run from a TypeScript configuration and its
//! `extends` chain, then only read. Keys and targets are stored without their
//! trailing `/*`, so lookups work on directory prefixes:
//!
//! ```text
//! "@app/*": ["src/app/*"]   ──►   "@app" → <baseUrl>/src/app
//! "@app/ui/button"          ──►   <baseUrl>/src/app/ui/button
//! ```

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use path_clean::PathClean;
use rustc_hash::{FxHashMap, FxHashSet};

use super::tsconfig::{TsConfig, locate_extends};
use crate::runtime::Runtime;

/// Maximum number of ancestor segments tried beyond the immediate parent.
pub const MAX_ALIAS_HOPS: usize = 10;

/// Maximum number of configuration files read through `extends`.
const MAX_EXTENDS_CHAIN: usize = 32;

/// Immutable alias prefix → absolute path table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathAliases {
    entries: IndexMap<String, PathBuf>,
    base_url: Option<PathBuf>,
}

/// One configuration of an `extends` chain.
#[derive(Debug)]
struct ChainLink {
    config: TsConfig,
    dir: PathBuf,
    /// Configurations this one extends, highest precedence first.
    parents: Vec<usize>,
}

impl PathAliases {
    /// Build the table from the configuration at `tsconfig_path`.
    ///
    /// Configurations of the `extends` chain are merged after the one that
    /// extends them, and an alias already registered is never replaced: the
    /// most derived configuration wins a key collision. Targets resolve
    /// against the `baseUrl` in effect for the declaring configuration (its
    /// own, else the one it inherits through `extends`), or against its
    /// directory when there is none. Files that cannot be read or parsed
    /// contribute nothing.
    pub async fn load(runtime: &dyn Runtime, tsconfig_path: &Path) -> Self {
        let chain = read_chain(runtime, tsconfig_path).await;

        let mut aliases = Self {
            base_url: if chain.is_empty() { None } else { effective_base_url(&chain, 0) },
            ..Self::default()
        };
        for (i, link) in chain.iter().enumerate() {
            let base = effective_base_url(&chain, i).unwrap_or_else(|| link.dir.clone());
            aliases.merge(&link.config, &base);
        }

        tracing::debug!(count = aliases.len(), "path aliases loaded");
        aliases
    }

    /// Build a table from already resolved entries.
    pub fn from_entries<I, K>(entries: I, base_url: Option<PathBuf>) -> Self
    where
        I: IntoIterator<Item = (K, PathBuf)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            base_url,
        }
    }

    fn merge(&mut self, config: &TsConfig, base: &Path) {
        for (key, targets) in &config.compiler_options.paths {
            let alias = strip_glob(key);
            let Some(target) = targets.first() else {
                continue;
            };
            if alias.is_empty() {
                tracing::debug!(key, "skipping catch-all path alias");
                continue;
            }
            self.entries
                .entry(alias.to_string())
                .or_insert_with(|| base.join(strip_glob(target)).clean());
        }
    }

    /// Real path for `specifier`, if it starts with a registered alias.
    ///
    /// Tries an exact match, then the immediate parent segment, then up to
    /// [`MAX_ALIAS_HOPS`] further ancestors, nearest first. The remainder of
    /// the specifier is spliced onto the mapped path.
    pub fn resolve(&self, specifier: &str) -> Option<PathBuf> {
        if self.entries.is_empty() {
            return None;
        }
        if let Some(target) = self.entries.get(specifier) {
            return Some(target.clone());
        }

        let mut prefix = specifier;
        for _ in 0..=MAX_ALIAS_HOPS {
            let (parent, _) = prefix.rsplit_once('/')?;
            if let Some(target) = self.entries.get(parent) {
                let rest = &specifier[parent.len() + 1..];
                return Some(target.join(rest).clean());
            }
            prefix = parent;
        }
        None
    }

    /// Absolute `baseUrl` in effect for the entry configuration, if any.
    pub fn base_url(&self) -> Option<&Path> {
        self.base_url.as_deref()
    }

    pub fn get(&self, alias: &str) -> Option<&Path> {
        self.entries.get(alias).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read `tsconfig_path` and everything it extends, breadth-first. The entry
/// configuration, when readable, is the first link.
async fn read_chain(runtime: &dyn Runtime, tsconfig_path: &Path) -> Vec<ChainLink> {
    let mut links: Vec<ChainLink> = Vec::new();
    let mut read: FxHashMap<PathBuf, Option<usize>> = FxHashMap::default();
    let mut pending = VecDeque::from([(tsconfig_path.clean(), None::<usize>)]);

    while let Some((path, child)) = pending.pop_front() {
        if let Some(&known) = read.get(&path) {
            tracing::debug!(path = %path.display(), "tsconfig already merged, skipping");
            if let (Some(child), Some(known)) = (child, known) {
                links[child].parents.push(known);
            }
            continue;
        }
        if read.len() >= MAX_EXTENDS_CHAIN {
            tracing::warn!(path = %path.display(), "tsconfig extends chain too long, stopping");
            break;
        }

        let config = match TsConfig::read(runtime, &path).await {
            Ok(config) => config,
            Err(e) if e.is_not_found() && child.is_none() => {
                tracing::debug!(path = %path.display(), "no tsconfig, path aliases disabled");
                read.insert(path, None);
                continue;
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable tsconfig");
                read.insert(path, None);
                continue;
            }
        };

        let index = links.len();
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        if let Some(extends) = &config.extends {
            // For several parents TypeScript lets the last one win.
            for spec in extends.specifiers().into_iter().rev() {
                pending.push_back((locate_extends(runtime, &dir, spec).await, Some(index)));
            }
        }
        if let Some(child) = child {
            links[child].parents.push(index);
        }
        read.insert(path, Some(index));
        links.push(ChainLink {
            config,
            dir,
            parents: Vec::new(),
        });
    }

    links
}

/// Absolute `baseUrl` in effect for `links[index]`: its own, else the first
/// one found depth-first through its parents in precedence order.
fn effective_base_url(links: &[ChainLink], index: usize) -> Option<PathBuf> {
    let mut seen: FxHashSet<usize> = FxHashSet::default();
    let mut stack = vec![index];
    while let Some(i) = stack.pop() {
        if !seen.insert(i) {
            continue;
        }
        let link = &links[i];
        if let Some(base) = &link.config.compiler_options.base_url {
            return Some(link.dir.join(base).clean());
        }
        stack.extend(link.parents.iter().rev());
    }
    None
}

fn strip_glob(pattern: &str) -> &str {
    pattern
        .strip_suffix("/*")
        .or_else(|| pattern.strip_suffix('*'))
        .unwrap_or(pattern)
}
