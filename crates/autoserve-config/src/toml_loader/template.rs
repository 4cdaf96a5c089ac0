//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# autoserve configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# Command-line flags take precedence over this file.

[server]
# host = "localhost"
# port = 8000            # 0 = pick a free port on first start
# root = "."             # directory to serve and watch

[watch]
# delay_ms = 1           # 1-60000, pause between polls
# hash_source = "mtime"  # mtime, content

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
    .to_string()
}
