use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid TOML syntax in '{file}'")]
#[diagnostic(
    code(depscope::toml_parse_error),
    help("Check the TOML syntax near the highlighted position")
)]
pub struct TomlManifestError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum DepscopeError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(depscope::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    TomlManifestError(Box<TomlManifestError>),

    #[error("Malformed manifest '{path}': {message}")]
    #[diagnostic(
        code(depscope::manifest_error),
        help("The manifest exists but could not be decoded; the project is reported without dependencies")
    )]
    ManifestParse { path: String, message: String },

    #[error("JSON serialization error")]
    #[diagnostic(
        code(depscope::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("Command '{program}' is not available")]
    #[diagnostic(
        code(depscope::command_unavailable),
        help("The package manager executable was not found on PATH")
    )]
    CommandUnavailable { program: String },

    #[error("Command '{program}' exited with status {code:?}")]
    #[diagnostic(
        code(depscope::command_failed),
        help("The package manager ran but reported a failure; its packages are skipped")
    )]
    CommandFailed { program: String, code: Option<i32> },

    #[error("Command '{program}' timed out after {timeout_secs}s")]
    #[diagnostic(
        code(depscope::command_timeout),
        help("The package manager hung; its packages are skipped")
    )]
    CommandTimeout { program: String, timeout_secs: u64 },

    #[error("Undecodable output from {manager}: {message}")]
    #[diagnostic(
        code(depscope::decode_error),
        help("The package manager emitted output in an unexpected shape; its packages are skipped")
    )]
    DecodeFailed { manager: String, message: String },

    #[error("String formatting error")]
    #[diagnostic(
        code(depscope::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(depscope::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(depscope::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },
}
