//! Error types for loading engine configuration.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors produced while loading or validating an engine configuration.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// RON syntax or shape error. The message carries the `line:col` location.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("unknown action '{name}'")]
    /// A binding names an action the engine does not know.
    UnknownAction {
        /// Optional path associated with the error.
        path: Option<PathBuf>,
        /// The offending action name, as written.
        name: String,
    },
}

impl Error {
    /// Render a human-friendly error message including the path when available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Parse { path, message } => match path {
                Some(p) => format!("Config parse error in {}\n{}", p.display(), message),
                None => format!("Config parse error\n{}", message),
            },
            Self::UnknownAction { path, name } => {
                let known = crate::Action::ALL
                    .iter()
                    .map(|a| a.name())
                    .collect::<Vec<_>>()
                    .join(", ");
                match path {
                    Some(p) => format!(
                        "Config validation error in {}\nunknown action '{}' (expected one of: {})",
                        p.display(),
                        name,
                        known
                    ),
                    None => format!(
                        "Config validation error\nunknown action '{}' (expected one of: {})",
                        name, known
                    ),
                }
            }
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::UnknownAction { path, .. } => {
                path.as_deref()
            }
        }
    }

    /// Attach `p` to this error, replacing any path already present.
    pub fn with_path(mut self, p: &Path) -> Self {
        match &mut self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::UnknownAction { path, .. } => {
                *path = Some(p.to_path_buf());
            }
        }
        self
    }
}

/// Result alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_includes_path() {
        let e = Error::Read {
            path: None,
            message: "No such file".into(),
        }
        .with_path(Path::new("/tmp/keys.ron"));
        assert_eq!(e.path(), Some(Path::new("/tmp/keys.ron")));
        assert_eq!(e.pretty(), "Read error at /tmp/keys.ron: No such file");
    }

    #[test]
    fn unknown_action_lists_choices() {
        let e = Error::UnknownAction {
            path: None,
            name: "explode".into(),
        };
        assert_eq!(e.to_string(), "unknown action 'explode'");
        let pretty = e.pretty();
        assert!(pretty.contains("'explode'"));
        assert!(pretty.contains("addSibling"));
        assert!(pretty.contains("deepClick"));
    }
}
