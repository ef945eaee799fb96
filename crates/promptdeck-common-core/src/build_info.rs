//! Version and build metadata captured by the build script.

/// Short git revision the binary was built from.
pub const GIT_HASH: &str = env!("GIT_HASH");

/// UTC timestamp of the build.
pub const BUILD_TIME: &str = env!("BUILD_TIME");

/// Target triple.
pub const BUILD_TARGET: &str = env!("BUILD_TARGET");

/// Long version string for `--version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIME"),
    " for ",
    env!("BUILD_TARGET"),
    ")"
);
