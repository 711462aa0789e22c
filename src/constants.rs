/// Environment variable names and defaults shared by the dispatcher.
/// These mirror the contract of the container image the entrypoint ships in.

// Selector and its accepted values
pub const COMPONENT_VAR: &str = "APP_COMPONENT";
pub const API_COMPONENT: &str = "api";
pub const CONVERTER_COMPONENT: &str = "converter";

// Optional overrides for the dispatch targets
pub const CONFIG_PATH_VAR: &str = "APP_DISPATCH_CONFIG";
pub const API_CMD_VAR: &str = "APP_API_CMD";
pub const CONVERTER_CMD_VAR: &str = "APP_CONVERTER_CMD";

// Scripts shipped next to the entrypoint, resolved against the working directory
pub const DEFAULT_API_PROGRAM: &str = "./run_api.sh";
pub const DEFAULT_CONVERTER_PROGRAM: &str = "./run_converter.sh";

// Logging
pub const LOG_DIR_VAR: &str = "APP_LOG_DIR";
pub const LOG_FILE_PREFIX: &str = "entrypoint";
pub const DEFAULT_LOG_FILTER: &str = "warn";
