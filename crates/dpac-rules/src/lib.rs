//! IP-to-PAC rule table engine for dpac-rs.
//!
//! Parses the dpac conf format (one `<network-spec-list> <pac-file>` rule
//! per line) and resolves a client IPv4 address to the PAC document it
//! should be served. Rules are evaluated in file order and the first match
//! wins; a `*` wildcard rule matches every address and shadows everything
//! after it.
//!
//! # Conf format
//!
//! ```text
//! # comment
//! 10.2.3.0/24;10.3.4.0/24  branch.pac
//! 192.168.0.0/255.255.0.0  office.pac
//! *                        default.pac
//! ```
//!
//! Masks may be given as a CIDR prefix length or as a literal dotted quad
//! (which need not be a contiguous prefix). Malformed lines are skipped
//! with a recorded diagnostic; table construction is best-effort per line.
//!
//! # Example
//!
//! ```
//! use dpac_rules::{resolve, Resolution};
//!
//! let conf = "10.2.3.0/24 branch.pac\n* default.pac\n";
//! match resolve(conf, "10.2.3.5").unwrap() {
//!     Resolution::Output(pac) => assert_eq!(pac, "branch.pac"),
//!     Resolution::NoMatch => unreachable!(),
//! }
//! ```

pub mod error;
pub mod parser;
pub mod spec;
pub mod table;

pub use error::{LineError, ParseIssue, RulesError};
pub use spec::NetworkSpec;
pub use table::{resolve, Resolution, Rule, RuleTable};
