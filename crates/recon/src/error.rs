use std::fmt;

#[derive(Debug)]
pub enum MusterError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad ratio, empty keyword, etc.).
    ConfigValidation(String),
    /// A source has no header row; no join is meaningful without one.
    MissingHeader { source: String },
    /// Cache file statted fresh but could not be read or parsed.
    CacheCorrupt { path: String, reason: String },
    /// IO error (source read, cache write, etc.).
    Io(String),
}

impl fmt::Display for MusterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingHeader { source } => {
                write!(f, "source '{source}': missing header row")
            }
            Self::CacheCorrupt { path, reason } => {
                write!(f, "cache '{path}' is unreadable: {reason}")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for MusterError {}
