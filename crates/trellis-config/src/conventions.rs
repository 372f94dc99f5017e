//! Fixed module names wired into every configuration.

/// Module that bootstraps the front-end framework (the `app` entry).
pub const FRAMEWORK_BOOTSTRAPPER: &str = "aurelia-bootstrapper";

/// Promise polyfill shipped in the `vendor` entry and exposed globally.
pub const PROMISE_POLYFILL: &str = "bluebird";

/// Global symbol bound to the polyfill's export.
pub const PROMISE_SYMBOL: &str = "Promise";

/// Testing-support module whose optional sub-modules are declared explicitly.
pub const TESTING_SUPPORT_MODULE: &str = "aurelia-testing";

/// Optional sub-modules of [`TESTING_SUPPORT_MODULE`].
pub const TESTING_SUPPORT_DEPENDENCIES: [&str; 2] = ["./compile-spy", "./view-spy"];

/// Script extensions the bundler resolves without an explicit suffix.
pub const RESOLVE_EXTENSIONS: [&str; 1] = [".js"];
