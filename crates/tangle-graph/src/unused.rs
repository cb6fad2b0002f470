//! Declared-but-unused third-party dependencies.

use indexmap::IndexSet;

use crate::graph::ModuleGraph;

/// Names in `declared` that are missing from `observed`, in declaration order,
/// followed by the names reported by an external finder. Duplicates are dropped.
pub fn unused_third_party_dependencies<'a, D, E>(
    declared: D,
    observed: &IndexSet<String>,
    external: E,
) -> Vec<String>
where
    D: IntoIterator<Item = &'a str>,
    E: IntoIterator<Item = String>,
{
    let mut unused: IndexSet<String> = declared
        .into_iter()
        .filter(|name| !observed.contains(*name))
        .map(str::to_string)
        .collect();
    unused.extend(external);
    unused.into_iter().collect()
}

impl ModuleGraph {
    /// [`unused_third_party_dependencies`] against the packages this graph uses.
    pub fn unused_third_party_dependencies<'a, D, E>(&self, declared: D, external: E) -> Vec<String>
    where
        D: IntoIterator<Item = &'a str>,
        E: IntoIterator<Item = String>,
    {
        unused_third_party_dependencies(declared, &self.third_party_dependencies(), external)
    }
}
