/// Error code registry for tfc-ops
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Plan file errors
/// - 3000-3999: Remote API errors
/// - 4000-4999: Execution errors
/// - 5000-5999: Migration control errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_MISSING_TOKEN: u16 = 1003;
    pub const CONFIG_INVALID_VALUE: u16 = 1004;

    // Plan file errors (2000-2999)
    pub const PLAN_UNREADABLE: u16 = 2001;
    pub const PLAN_MALFORMED_ROW: u16 = 2003;

    // Remote API errors (3000-3999)
    pub const API_GENERIC: u16 = 3000;
    pub const API_SOURCE_FETCH: u16 = 3001;
    pub const API_PROVISION: u16 = 3002;
    pub const API_VARIABLE_PUSH: u16 = 3003;

    // Execution errors (4000-4999)
    pub const EXEC_GENERIC: u16 = 4000;
    pub const EXEC_COMMAND_NOT_FOUND: u16 = 4001;
    pub const EXEC_SPAWN_FAILED: u16 = 4005;
    pub const EXEC_STDIN_ERROR: u16 = 4006;
    pub const EXEC_LEGACY_INIT: u16 = 4007;
    pub const EXEC_NEW_INIT: u16 = 4008;
    pub const EXEC_STATE_CLEANUP: u16 = 4009;

    // Migration control errors (5000-5999)
    pub const MIGRATION_USER_ABORT: u16 = 5001;
    pub const MIGRATION_PROMPT_FAILED: u16 = 5002;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::CONFIG_GENERIC => "General configuration error",
        ErrorCode::CONFIG_NOT_FOUND => "Configuration file not found",
        ErrorCode::CONFIG_INVALID_TOML => "Configuration file is not valid TOML",
        ErrorCode::CONFIG_MISSING_TOKEN => "API token is missing",
        ErrorCode::CONFIG_INVALID_VALUE => "Invalid configuration value",

        ErrorCode::PLAN_UNREADABLE => "Plan file could not be read",
        ErrorCode::PLAN_MALFORMED_ROW => "Plan row is malformed",

        ErrorCode::API_GENERIC => "General API error",
        ErrorCode::API_SOURCE_FETCH => "Legacy environment could not be read",
        ErrorCode::API_PROVISION => "Workspace creation failed",
        ErrorCode::API_VARIABLE_PUSH => "Variable creation failed",

        ErrorCode::EXEC_GENERIC => "General execution error",
        ErrorCode::EXEC_COMMAND_NOT_FOUND => "Command not found",
        ErrorCode::EXEC_SPAWN_FAILED => "Subprocess could not be spawned",
        ErrorCode::EXEC_STDIN_ERROR => "Writing to subprocess stdin failed",
        ErrorCode::EXEC_LEGACY_INIT => "terraform init against the legacy backend failed",
        ErrorCode::EXEC_NEW_INIT => "terraform init against the new backend failed",
        ErrorCode::EXEC_STATE_CLEANUP => "Local state cache could not be removed",

        ErrorCode::MIGRATION_USER_ABORT => "Migration aborted by the operator",
        ErrorCode::MIGRATION_PROMPT_FAILED => "Operator prompt could not be read",

        _ => "Unknown error",
    }
}
