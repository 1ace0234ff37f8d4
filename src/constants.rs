//! Common constants used throughout the bolt-init application.

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] = ["bolt.json", "bolt.yml", "bolt.yaml"];

/// Prefix shared by every sentinel marker keyword.
pub const MARKER_PREFIX: &str = "BOLT_";

/// Directory holding locally installed template packages.
pub const LOCAL_PACKAGES_DIR: &str = "node_modules";

/// Notice shipped in HTML templates that is removed on materialization.
pub const HTML_DEBUG_NOTICE: &str = "<!-- Uncomment to debug the desired template -->";

/// Environment variable set by package managers when running scripts.
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

/// Package manager used when none can be detected.
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";
