//! fastfield version information.
//!
//! The generator version is stamped into every artifact header, so the CLI, the build-script builder and the
//! source generator read it from this one constant.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.

/// The fastfield version string (for example, `0.1.0`).
pub const FASTFIELD_VERSION: &str = env!("CARGO_PKG_VERSION");
