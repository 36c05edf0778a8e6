//! Names and modules provided by the language or the runtime.

use rustc_hash::FxHashSet;
use std::sync::LazyLock;

/// Identifiers that never need an import: primitive type names, global
/// utility types, global objects and functions, and keywords that surface
/// as identifiers.
static GLOBAL_NAMES: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        // primitive types
        "string", "number", "boolean", "void", "any", "unknown", "never", "undefined", "null",
        "bigint", "symbol", "object",
        // utility types
        "Partial", "Required", "Readonly", "Record", "Pick", "Omit", "Exclude", "Extract",
        "NonNullable", "Parameters", "ConstructorParameters", "ReturnType", "InstanceType",
        "ThisType", "Awaited", "ReadonlyArray", "PromiseLike", "ArrayLike", "Iterable",
        "Iterator", "AsyncIterable", "IterableIterator", "PropertyKey",
        // global objects
        "Object", "Array", "Map", "Set", "WeakMap", "WeakSet", "Promise", "Error", "TypeError",
        "RangeError", "Date", "RegExp", "Function", "String", "Number", "Boolean", "Symbol",
        "BigInt", "Math", "JSON", "Reflect", "Proxy", "Intl", "globalThis",
        // global functions and values
        "console", "setTimeout", "setInterval", "clearTimeout", "clearInterval",
        "queueMicrotask", "structuredClone", "parseInt", "parseFloat", "isNaN", "isFinite",
        "encodeURIComponent", "decodeURIComponent", "NaN", "Infinity",
        // keywords
        "this", "arguments", "super", "new", "typeof", "instanceof",
    ]
    .into_iter()
    .collect()
});

/// Node core modules importable without the `node:` prefix.
const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
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
    "timers",
    "tls",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "worker_threads",
    "zlib",
];

/// Whether `name` is provided by the language or the global environment.
pub fn is_global_name(name: &str) -> bool {
    GLOBAL_NAMES.contains(name)
}

/// Whether `specifier` names a runtime-provided module (`node:fs`, `fs`,
/// `fs/promises`).
pub fn is_builtin_module(specifier: &str) -> bool {
    if specifier.starts_with("node:") {
        return true;
    }
    let root = specifier.split('/').next().unwrap_or(specifier);
    NODE_BUILTINS.contains(&root)
}
