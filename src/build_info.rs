//! Compile-time build information, shown by `skyhop --version`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string: `skyhop <version> (<date> <commit>)`.
pub fn version_line() -> String {
    format!(
        "skyhop {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
