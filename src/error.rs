use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Broad class of a failure, used when reporting why a run was aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    ResourceMissing,
    MalformedInput,
    Persistence,
    Io,
}

#[derive(Error, Debug)]
pub enum LantError {
    #[error("no alphabet defined for language '{0}'")]
    UnknownLanguage(String),
    #[error("board size too small ({faces} dice faces for {letters} distinct letters)")]
    BoardTooSmall { faces: usize, letters: usize },
    #[error("invalid alphabet for '{language}': {reason}")]
    InvalidAlphabet { language: String, reason: String },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("file missing {}", .0.display())]
    MissingResource(PathBuf),
    #[error("no texts found in {}", .0.display())]
    EmptyCorpus(PathBuf),
    #[error("{} is not valid UTF-8 text", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("corpus contains no characters from the alphabet")]
    NoPlayableCharacters,
    #[error("malformed grid: {0}")]
    InvalidGrid(String),
    #[error("malformed alphabet configuration")]
    BadAlphabetConfig(#[source] serde_json::Error),
    #[error("results store {}: {reason}", .path.display())]
    Storage { path: PathBuf, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl LantError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LantError::UnknownLanguage(_)
            | LantError::BoardTooSmall { .. }
            | LantError::InvalidAlphabet { .. }
            | LantError::InvalidParameter(_) => ErrorCategory::Configuration,
            LantError::MissingResource(_) | LantError::EmptyCorpus(_) => {
                ErrorCategory::ResourceMissing
            }
            LantError::Malformed { .. }
            | LantError::NoPlayableCharacters
            | LantError::InvalidGrid(_)
            | LantError::BadAlphabetConfig(_) => ErrorCategory::MalformedInput,
            LantError::Storage { .. } => ErrorCategory::Persistence,
            LantError::Io(_) => ErrorCategory::Io,
        }
    }

    /// Wraps an I/O error raised while reading `path`, separating bad
    /// encodings from plain read failures.
    pub fn reading(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::InvalidData => LantError::Malformed { path, source: err },
            io::ErrorKind::NotFound => LantError::MissingResource(path),
            _ => LantError::Io(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, LantError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            LantError::UnknownLanguage("xyz".into()).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            LantError::BoardTooSmall { faces: 6, letters: 30 }.category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            LantError::EmptyCorpus(PathBuf::from("data/eng/texts")).category(),
            ErrorCategory::ResourceMissing
        );
        assert_eq!(
            LantError::NoPlayableCharacters.category(),
            ErrorCategory::MalformedInput
        );
    }

    #[test]
    fn test_reading_maps_error_kinds() {
        let bad = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        assert!(matches!(LantError::reading("a.txt", bad), LantError::Malformed { .. }));

        let missing = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            LantError::reading("a.txt", missing),
            LantError::MissingResource(_)
        ));

        let other = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert_eq!(LantError::reading("a.txt", other).category(), ErrorCategory::Io);
    }

    #[test]
    fn test_board_too_small_message() {
        let err = LantError::BoardTooSmall { faces: 6, letters: 30 };
        assert_eq!(
            err.to_string(),
            "board size too small (6 dice faces for 30 distinct letters)"
        );
    }
}
