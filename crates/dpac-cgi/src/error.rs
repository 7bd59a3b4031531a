//! CGI error types.

use std::path::PathBuf;

use dpac_rules::RulesError;

/// Errors from the CGI front end.
#[derive(Debug, thiserror::Error)]
pub enum CgiError {
    #[error("unable to read conf file {path:?}: {source}")]
    Conf {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to read pac file {path:?}: {source}")]
    Pac {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("client address not given and REMOTE_ADDR is not set")]
    MissingRemoteAddr,

    #[error("rules: {0}")]
    Rules(#[from] RulesError),

    #[error("no rule matched client address {0}")]
    NoMatch(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
