//! Static registries: metadata variables and lifecycle functions.
//!
//! Both tables are process-wide read-only constants; rules index into them
//! but never mutate them.

/// Where a metadata variable must be assigned relative to the script's
/// function declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Must be assigned before the first function declaration.
    BeforeFunctions,
    /// Must be assigned after the last function declaration (checksums).
    AfterFunctions,
}

/// A variable with abuild-defined meaning.
#[derive(Debug, Clone, Copy)]
pub struct MetadataVar {
    /// Variable name.
    pub name: &'static str,
    /// Required placement relative to function declarations.
    pub placement: Placement,
    /// Whether every APKBUILD must assign it.
    pub required: bool,
}

const fn before(name: &'static str, required: bool) -> MetadataVar {
    MetadataVar {
        name,
        placement: Placement::BeforeFunctions,
        required,
    }
}

const fn after(name: &'static str) -> MetadataVar {
    MetadataVar {
        name,
        placement: Placement::AfterFunctions,
        required: false,
    }
}

/// All variables directly consumed by abuild(1). Anything else assigned
/// globally must carry a single-underscore prefix.
pub static METADATA_VARIABLES: &[MetadataVar] = &[
    before("pkgname", true),
    before("pkgver", true),
    before("pkgrel", true),
    before("pkgdesc", true),
    before("url", true),
    before("arch", true),
    before("license", true),
    before("depends", false),
    before("depends_dev", false),
    before("makedepends", false),
    before("checkdepends", false),
    before("install", false),
    before("install_if", false),
    before("subpackages", false),
    before("source", false),
    before("options", false),
    before("patch_args", false),
    before("builddir", false),
    before("replaces", false),
    after("md5sums"),
    after("sha256sums"),
    after("sha512sums"),
];

/// Functions abuild(1) invokes, in invocation order. Scripts declaring
/// several of them must declare them in this order.
pub static PACKAGE_FUNCTIONS: &[&str] = &[
    "snapshot",
    "sanitycheck",
    "fetch",
    "unpack",
    "prepare",
    "build",
    "check",
    "package",
];

/// Looks up a metadata variable by name.
#[must_use]
pub fn metadata_var(name: &str) -> Option<&'static MetadataVar> {
    METADATA_VARIABLES.iter().find(|v| v.name == name)
}

/// Reports whether the given name is a metadata variable.
#[must_use]
pub fn is_metadata_var(name: &str) -> bool {
    metadata_var(name).is_some()
}
