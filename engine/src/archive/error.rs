use crate::GameId;

#[derive(Debug)]
pub enum ArchiveError {
    Io(std::io::Error),
    Serialization(serde_yaml_ng::Error),
    UnsupportedVersion { found: u8, expected: u8 },
    EmptyFile,
    NotFound(GameId),
}

impl std::fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchiveError::Io(e) => write!(f, "IO error: {}", e),
            ArchiveError::Serialization(e) => write!(f, "Archive format error: {}", e),
            ArchiveError::UnsupportedVersion { found, expected } => {
                write!(f, "Unsupported archive version: found {}, expected {}", found, expected)
            }
            ArchiveError::EmptyFile => write!(f, "Empty archive file"),
            ArchiveError::NotFound(id) => write!(f, "No archived game with id {}", id),
        }
    }
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArchiveError::Io(e) => Some(e),
            ArchiveError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ArchiveError {
    fn from(e: std::io::Error) -> Self {
        ArchiveError::Io(e)
    }
}

impl From<serde_yaml_ng::Error> for ArchiveError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        ArchiveError::Serialization(e)
    }
}
