//! Naming, rendering and loading constants
//!
//! Values shared by the traversal engine when it names child nodes and by the
//! validation layer when it renders reasons.

/// Path and child naming
pub mod naming {
    /// Separator between path segments of nested nodes
    pub const PATH_SEPARATOR: char = '/';

    /// Separator between a node path and a property name in reasons
    pub const PROPERTY_SEPARATOR: char = '.';

    /// Map keys used as child names are truncated to this many characters
    pub const MAX_KEY_NAME_LENGTH: usize = 100;

    /// Suffix naming the key collection of a map member
    pub const MAP_KEYS_SUFFIX: &str = "Keys";

    /// Suffix naming the value collection of a map member
    pub const MAP_VALUES_SUFFIX: &str = "Values";
}

/// Reason rendering
pub mod reasons {
    /// Separator used when joining reasons without an explicit one
    pub const DEFAULT_REASON_SEPARATOR: &str = "; ";

    /// Message prefixes that read as a comparison and take no colon
    pub const COMPARISON_PREFIXES: [char; 3] = ['=', '>', '<'];
}

/// Settings loading
pub mod loading {
    /// Settings file read when no path is given
    pub const DEFAULT_SETTINGS_PATH: &str = "config/validation.toml";

    /// Directory, relative to the base file, holding profile overlays
    pub const PROFILE_DIR: &str = "profiles";

    /// Environment variable prefix for overrides
    pub const ENV_PREFIX: &str = "TRAVERSAL";

    /// Separator between nested keys in environment variable names
    pub const ENV_SEPARATOR: &str = "__";
}
