/// Defaults used when neither the command line nor a config file says otherwise.

// Directory scanned by a zero-argument run
pub const DEFAULT_ROOT: &str = "src";

// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "fix-imports.toml";

pub const DEFAULT_LOG_FILE: &str = "fix-imports.log";

/// `@` followed by a dot-delimited numeric version, e.g. `@1.2.3`
pub const VERSION_SUFFIX: &str = "@[0-9.]+";

/// Tracked packages stripped by a plain name rule, in application order.
/// The `@radix-ui/react-*` family is handled separately because the
/// component name is captured.
pub const TRACKED_PACKAGES: &[&str] = &[
    "lucide-react",
    "cmdk",
    "vaul",
    "recharts",
    "embla-carousel-react",
    "class-variance-authority",
    "react-resizable-panels",
    "@hookform/resolvers",
    "zod",
];

/// Get the default set of file extensions to scan
pub fn default_extensions() -> Vec<String> {
    vec!["ts".to_string(), "tsx".to_string()]
}
