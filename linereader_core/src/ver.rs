pub const VERSION_MAJOR: u16 = 0;
pub const VERSION_MINOR: u16 = 1;

/// Version Metadata
///
/// `Experimental` - backward compatibility is not guaranteed + unstable
///
/// `Beta` - unstable version
///
/// `Stable` - stable version
pub const VERSION_METADATA: &str = "Experimental";

/// Project version number. Fixed per build, derived from
/// [`VERSION_MAJOR`] and [`VERSION_MINOR`].
pub const VERSION_NUMBER: f64 = VERSION_MAJOR as f64 + VERSION_MINOR as f64 / 100.0;

/// Project version string. Fixed per build (taken from the package version).
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");
