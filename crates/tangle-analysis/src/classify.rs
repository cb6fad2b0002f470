//! Specifier classification.
//!
//! Pure predicates over raw specifiers. They are independent of each other:
//! `fs` is both builtin and third-party looking, so callers decide the order
//! in which the predicates are consulted.

use std::path::Path;

/// Modules shipped with Node.js (`require('module').builtinModules`).
pub const NODE_BUILTINS: &[&str] = &[
    "_http_agent",
    "_http_client",
    "_http_common",
    "_http_incoming",
    "_http_outgoing",
    "_http_server",
    "_stream_duplex",
    "_stream_passthrough",
    "_stream_readable",
    "_stream_transform",
    "_stream_wrap",
    "_stream_writable",
    "_tls_common",
    "_tls_wrap",
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Platform module: a Node builtin, any `node:` specifier, or a deep import
/// into a builtin such as `fs/promises`.
pub fn is_builtin(specifier: &str) -> bool {
    if specifier.starts_with("node:") {
        return true;
    }
    let first_segment = specifier.split('/').next().unwrap_or(specifier);
    NODE_BUILTINS.contains(&first_segment)
}

/// Anything that is neither relative (`./`, `../`) nor an absolute path.
pub fn is_third_party(specifier: &str) -> bool {
    !specifier.starts_with('.') && !Path::new(specifier).is_absolute()
}

/// Native addon (`.node`).
pub fn is_binary(specifier: &str) -> bool {
    has_extension(specifier, "node")
}

pub fn is_json(specifier: &str) -> bool {
    has_extension(specifier, "json")
}

/// Whether `path` carries one of `extensions` (given with leading dots).
pub fn is_supported(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|allowed| allowed.trim_start_matches('.') == ext)
        })
}

fn has_extension(specifier: &str, extension: &str) -> bool {
    Path::new(specifier)
        .extension()
        .is_some_and(|ext| ext == extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins() {
        assert!(is_builtin("fs"));
        assert!(is_builtin("node:fs"));
        assert!(is_builtin("node:test"));
        assert!(is_builtin("fs/promises"));
        assert!(!is_builtin("lodash"));
        assert!(!is_builtin("./fs"));
        assert!(!is_builtin("fsevents"));
    }

    #[test]
    fn third_party() {
        assert!(is_third_party("react"));
        assert!(is_third_party("@scope/pkg/deep"));
        assert!(!is_third_party("./lib"));
        assert!(!is_third_party("../lib"));
        assert!(!is_third_party("/abs/lib.js"));
    }

    #[test]
    fn assets() {
        assert!(is_binary("./addon.node"));
        assert!(!is_binary("./node"));
        assert!(is_json("./data.json"));
        assert!(!is_json("./json.js"));
    }

    #[test]
    fn supported_extensions() {
        let extensions = vec![".js".to_string(), ".ts".to_string()];
        assert!(is_supported(Path::new("a/b.ts"), &extensions));
        assert!(!is_supported(Path::new("a/b.tsx"), &extensions));
        assert!(!is_supported(Path::new("a/b"), &extensions));
    }
}
