use std::fmt;

/// Fatal conditions.  Everything the frame loop can't do "right now" (full
/// pools, unknown scene names) is a silent no-op instead.
#[derive(Debug)]
pub enum GameError {
    Io(std::io::Error),
    /// The config file could not be parsed.
    Config(String),
    /// An image settled as `Failed` while waiting for readiness.
    AssetLoad { path: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io(e) => write!(f, "i/o error: {e}"),
            GameError::Config(e) => write!(f, "invalid config: {e}"),
            GameError::AssetLoad { path } => write!(f, "failed to load image `{path}`"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

impl From<toml::de::Error> for GameError {
    fn from(e: toml::de::Error) -> Self {
        GameError::Config(e.to_string())
    }
}
