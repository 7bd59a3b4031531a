//! dpac CGI library.
//!
//! Glue between the rule engine (`dpac-rules`) and the CGI environment:
//! conf and PAC file loading, `REMOTE_ADDR` lookup, and response framing.
//! Exposed as a library so integration tests can drive the full flow
//! without spawning a process.

pub mod cli;
pub mod error;
pub mod response;

pub use cli::CgiArgs;
pub use error::CgiError;
