#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),
    /// Patterns `regex` rejects are retried with fancy-regex; its error is
    /// the one reported.
    #[error(transparent)]
    Regex(#[from] fancy_regex::Error),
    #[error(transparent)]
    AhoCorasick(#[from] aho_corasick::BuildError),
    /// A rule table names a label outside the closed set of its family.
    #[error("unknown {family} label: {value:?}")]
    UnknownLabel { family: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a host capability while a probe reads it.
///
/// Probes never propagate these: they are logged and the affected fields
/// fall back to their "unknown" values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// The host refused access (e.g. a masked GPU debug extension).
    #[error("access denied: {0}")]
    Denied(String),
    /// The capability exists but is not usable right now.
    #[error("capability unavailable: {0}")]
    Unavailable(String),
    #[error("probe failed: {0}")]
    Failed(String),
}
