//! Error types for ansible-build-meta with contextual messages and exit codes
//!
//! Every failure of the manifest generator is a configuration problem in its
//! inputs. The CLI layer adds I/O and validation failures on top of that.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for ansible-build-meta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// Validation failure (manifest does not reproduce)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for ansible-build-meta
#[derive(Debug)]
pub enum BuildError {
  /// Invalid or incomplete release metadata / inventory
  Config(ConfigurationError),

  /// Reproducibility and consistency checks
  Validation(ValidationError),

  /// I/O errors
  Io(io::Error),

  /// A typed error with the operation it happened in
  Context { error: Box<BuildError>, context: String },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl BuildError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    BuildError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    BuildError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      BuildError::Message { message, context, help } => BuildError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      BuildError::Io(err) => BuildError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      BuildError::Context { error, context } => BuildError::Context {
        error,
        context: format!("{}\n{}", ctx_str, context),
      },
      error => BuildError::Context {
        error: Box::new(error),
        context: ctx_str,
      },
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      BuildError::Config(_) => ExitCode::User,
      BuildError::Validation(_) => ExitCode::Validation,
      BuildError::Io(_) => ExitCode::System,
      BuildError::Message { .. } => ExitCode::User,
      BuildError::Context { error, .. } => error.exit_code(),
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      BuildError::Config(e) => e.help_message(),
      BuildError::Validation(e) => e.help_message(),
      BuildError::Message { help, .. } => help.clone(),
      BuildError::Io(_) => None,
      BuildError::Context { error, .. } => error.help_message(),
    }
  }

  /// Whether this error is a configuration error
  #[cfg(test)]
  pub fn is_configuration(&self) -> bool {
    match self {
      BuildError::Context { error, .. } => error.is_configuration(),
      _ => matches!(self, BuildError::Config(_)),
    }
  }
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildError::Config(e) => write!(f, "{}", e),
      BuildError::Validation(e) => write!(f, "{}", e),
      BuildError::Io(e) => write!(f, "I/O error: {}", e),
      BuildError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
      BuildError::Context { error, context } => write!(f, "{}\n{}", error, context),
    }
  }
}

impl std::error::Error for BuildError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      BuildError::Io(e) => Some(e),
      BuildError::Context { error, .. } => Some(error.as_ref()),
      _ => None,
    }
  }
}

impl From<ConfigurationError> for BuildError {
  fn from(err: ConfigurationError) -> Self {
    BuildError::Config(err)
  }
}

impl From<ValidationError> for BuildError {
  fn from(err: ValidationError) -> Self {
    BuildError::Validation(err)
  }
}

impl From<io::Error> for BuildError {
  fn from(err: io::Error) -> Self {
    BuildError::Io(err)
  }
}

impl From<String> for BuildError {
  fn from(msg: String) -> Self {
    BuildError::message(msg)
  }
}

impl From<&str> for BuildError {
  fn from(msg: &str) -> Self {
    BuildError::message(msg)
  }
}

impl From<toml_edit::de::Error> for BuildError {
  fn from(err: toml_edit::de::Error) -> Self {
    BuildError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for BuildError {
  fn from(err: serde_json::Error) -> Self {
    BuildError::message(format!("JSON error: {}", err))
  }
}

/// Configuration errors: invalid or incomplete input metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
  /// Release version is not `N[.N[.N]]` plus an optional PEP 440 suffix
  InvalidVersion { value: String },

  /// Missing required field
  MissingField { field: String },

  /// Collection name appears twice in the inventory
  DuplicateCollection { name: String },

  /// Collection name is not `namespace.name`
  InvalidCollectionName { name: String },

  /// Configuration refers to a collection that is not in the inventory
  UnknownCollection { name: String },

  /// Collection version in a dependency file is not valid semver
  InvalidDependency { collection: String, version: String },

  /// Explicitly requested file does not exist
  NotFound { path: PathBuf },
}

impl ConfigurationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigurationError::InvalidVersion { .. } => {
        Some("Use a PEP 440 release version such as '8.0.0', '9.0.0a1' or '7.2.0.post1'.".to_string())
      }
      ConfigurationError::MissingField { field } if field == "_python" => Some(
        "Add a `_python: >=3.x` line to the .deps file; newer ansible-core releases require it.".to_string(),
      ),
      ConfigurationError::UnknownCollection { name } => Some(format!(
        "Remove '{}' from [excludes] in build-meta.toml or check --collections-dir",
        name
      )),
      ConfigurationError::NotFound { .. } => Some("Check the path passed on the command line.".to_string()),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigurationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigurationError::InvalidVersion { value } => {
        write!(
          f,
          "Invalid release version '{}': expected N[.N[.N]] with an optional aN/bN/rcN, .postN or .devN suffix",
          value
        )
      }
      ConfigurationError::MissingField { field } => {
        write!(f, "Missing required field in release metadata: {}", field)
      }
      ConfigurationError::DuplicateCollection { name } => {
        write!(f, "Collection '{}' appears more than once in the inventory", name)
      }
      ConfigurationError::InvalidCollectionName { name } => {
        write!(f, "Invalid collection name '{}': expected 'namespace.name'", name)
      }
      ConfigurationError::UnknownCollection { name } => {
        write!(f, "Collection '{}' is configured but not part of the inventory", name)
      }
      ConfigurationError::InvalidDependency { collection, version } => {
        write!(f, "Invalid version '{}' for collection '{}'", version, collection)
      }
      ConfigurationError::NotFound { path } => {
        write!(f, "File not found: {}", path.display())
      }
    }
  }
}

/// Validation errors
#[derive(Debug)]
pub enum ValidationError {
  /// Regenerated manifest differs from the one on disk
  ManifestMismatch {
    path: PathBuf,
    line: usize,
    expected: String,
    actual: String,
  },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::ManifestMismatch { .. } => Some(
        "Make sure --deps and --collections-dir point at the inputs of the published release.".to_string(),
      ),
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::ManifestMismatch {
        path,
        line,
        expected,
        actual,
      } => {
        write!(
          f,
          "Manifest {} does not reproduce (first difference at line {})\n  on disk:     {}\n  regenerated: {}",
          path.display(),
          line,
          actual,
          expected
        )
      }
    }
  }
}

/// Result type alias for ansible-build-meta
pub type BuildResult<T> = Result<T, BuildError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> BuildResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> BuildResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<BuildError>,
{
  fn context(self, ctx: impl Into<String>) -> BuildResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> BuildResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &BuildError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
