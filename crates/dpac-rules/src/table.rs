//! Ordered rule table and first-match resolution.

use std::net::Ipv4Addr;

use tracing::{debug, warn};

use crate::error::{ParseIssue, RulesError};
use crate::parser::{self, LineToken};
use crate::spec::NetworkSpec;

/// One conf line's mapping from a network-spec list to an output id.
#[derive(Debug, Clone)]
pub struct Rule {
    specs: Vec<NetworkSpec>,
    output: String,
    wildcard: bool,
}

impl Rule {
    /// A wildcard rule matches every address; any other rule matches if
    /// at least one of its specs contains the address.
    fn matches(&self, addr: Ipv4Addr) -> bool {
        self.wildcard || self.specs.iter().any(|spec| spec.contains(addr))
    }

    /// The output id this rule maps to (returned verbatim from the conf).
    pub fn output(&self) -> &str {
        &self.output
    }

    /// The networks this rule covers (empty for the wildcard rule).
    pub fn specs(&self) -> &[NetworkSpec] {
        &self.specs
    }

    /// Whether this is the `*` catch-all rule.
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }
}

/// An ordered rule table parsed from conf text.
///
/// Rule order is file line order; evaluation order is significant. The
/// table owns its rules exclusively and is immutable after construction,
/// so repeated lookups against it are trivially idempotent.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    issues: Vec<ParseIssue>,
}

impl RuleTable {
    /// Parse conf text into an ordered rule table.
    ///
    /// Parsing is best-effort per line: a line with a syntax error or a
    /// malformed network spec is skipped, logged, and recorded in
    /// [`issues`](Self::issues), and construction continues. Each line is
    /// handled independently; no state carries over between lines. Empty
    /// input is fatal.
    pub fn parse(text: &str) -> Result<Self, RulesError> {
        if text.is_empty() {
            return Err(RulesError::EmptyTable);
        }

        let mut rules = Vec::new();
        let mut issues = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            match parser::tokenize_line(raw) {
                Ok(LineToken::Skip) => {}
                Ok(LineToken::Wildcard { output }) => {
                    rules.push(Rule {
                        specs: Vec::new(),
                        output: output.to_string(),
                        wildcard: true,
                    });
                }
                Ok(LineToken::Rule { specs, output }) => match parser::parse_spec_list(specs) {
                    Ok(specs) => {
                        rules.push(Rule {
                            specs,
                            output: output.to_string(),
                            wildcard: false,
                        });
                    }
                    Err(error) => {
                        warn!(line, %error, "skipping conf line");
                        issues.push(ParseIssue { line, error });
                    }
                },
                Err(error) => {
                    warn!(line, %error, "skipping conf line");
                    issues.push(ParseIssue { line, error });
                }
            }
        }

        debug!(rules = rules.len(), skipped = issues.len(), "parsed rule table");
        Ok(Self { rules, issues })
    }

    /// Find the output id for `addr`.
    ///
    /// Rules are scanned in file order and the first match returns
    /// immediately: earlier rules strictly take precedence even when a
    /// later rule is more specific, and a wildcard rule shadows every rule
    /// after it wherever it appears. There is no longest-prefix semantics.
    pub fn lookup(&self, addr: Ipv4Addr) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(addr))
            .map(|rule| rule.output.as_str())
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Diagnostics for lines that were skipped during parsing.
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no line produced a rule.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Outcome of a resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The output id of the first matching rule.
    Output(String),
    /// The table was exhausted without a match. A normal outcome; the
    /// caller decides the default behavior.
    NoMatch,
}

/// Resolve a client address against conf text in one call.
///
/// The query address is validated before any conf line is examined; a
/// non-IPv4 query is [`RulesError::InvalidQueryAddress`]. The table is
/// built once, used for this single lookup, and discarded.
pub fn resolve(conf: &str, query: &str) -> Result<Resolution, RulesError> {
    let addr: Ipv4Addr = query
        .parse()
        .map_err(|_| RulesError::InvalidQueryAddress(query.to_string()))?;

    let table = RuleTable::parse(conf)?;
    match table.lookup(addr) {
        Some(output) => {
            debug!(client = %addr, pac = output, "matched rule");
            Ok(Resolution::Output(output.to_string()))
        }
        None => Ok(Resolution::NoMatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineError;

    const CONF: &str = "\
# test
10.2.3.0/24;10.3.4.0/24 proxyA.pac
*                        default.pac
10.9.9.0/24              proxyB.pac
";

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    #[test]
    fn first_match_wins() {
        let table = RuleTable::parse(CONF).unwrap();
        assert_eq!(table.lookup(ip("10.2.3.5")), Some("proxyA.pac"));
        assert_eq!(table.lookup(ip("10.3.4.200")), Some("proxyA.pac"));
    }

    #[test]
    fn wildcard_shadows_later_more_specific_rule() {
        let table = RuleTable::parse(CONF).unwrap();
        // 10.9.9.0/24 appears after the wildcard, so it never fires.
        assert_eq!(table.lookup(ip("10.9.9.5")), Some("default.pac"));
        assert_eq!(table.lookup(ip("8.8.8.8")), Some("default.pac"));
    }

    #[test]
    fn comments_and_blanks_produce_no_rules() {
        let table = RuleTable::parse("# only\n\n   \n# comments\n").unwrap();
        assert!(table.is_empty());
        assert!(table.issues().is_empty());
        assert_eq!(table.lookup(ip("10.0.0.1")), None);
    }

    #[test]
    fn syntax_error_line_is_skipped_and_recorded() {
        let conf = "bad-line-no-delimiter\n10.2.3.0/24 a.pac\n";
        let table = RuleTable::parse(conf).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.issues(),
            &[ParseIssue {
                line: 1,
                error: LineError::Syntax
            }]
        );
        assert_eq!(table.lookup(ip("10.2.3.9")), Some("a.pac"));
    }

    #[test]
    fn malformed_spec_excludes_whole_rule() {
        // The second entry is invalid, so the valid first entry must not
        // be registered either.
        let conf = "10.2.3.0/24;10.3.4.0/99 a.pac\n* fallback.pac\n";
        let table = RuleTable::parse(conf).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.issues().len(), 1);
        assert!(matches!(
            table.issues()[0].error,
            LineError::MalformedAddress(_)
        ));
        assert_eq!(table.lookup(ip("10.2.3.5")), Some("fallback.pac"));
    }

    #[test]
    fn wildcard_takes_output_verbatim() {
        let table = RuleTable::parse("* some dir/file name.pac\n").unwrap();
        assert!(table.rules()[0].is_wildcard());
        assert!(table.rules()[0].specs().is_empty());
        assert_eq!(table.lookup(ip("1.2.3.4")), Some("some dir/file name.pac"));
    }

    #[test]
    fn crlf_and_unterminated_last_line() {
        let conf = "10.2.3.0/24 a.pac\r\n* b.pac";
        let table = RuleTable::parse(conf).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(ip("10.2.3.1")), Some("a.pac"));
        assert_eq!(table.lookup(ip("9.9.9.9")), Some("b.pac"));
    }

    #[test]
    fn empty_input_is_fatal() {
        assert!(matches!(
            RuleTable::parse("").unwrap_err(),
            RulesError::EmptyTable
        ));
    }

    #[test]
    fn resolve_end_to_end() {
        assert_eq!(
            resolve(CONF, "10.2.3.5").unwrap(),
            Resolution::Output("proxyA.pac".into())
        );
        assert_eq!(
            resolve(CONF, "10.9.9.5").unwrap(),
            Resolution::Output("default.pac".into())
        );
        assert_eq!(
            resolve(CONF, "8.8.8.8").unwrap(),
            Resolution::Output("default.pac".into())
        );
    }

    #[test]
    fn resolve_no_match_without_wildcard() {
        let conf = "10.2.3.0/24 a.pac\n";
        assert_eq!(resolve(conf, "192.0.2.1").unwrap(), Resolution::NoMatch);
    }

    #[test]
    fn resolve_rejects_bad_query_before_reading_lines() {
        // Even a conf full of garbage is never inspected for a bad query.
        let err = resolve("complete garbage", "not-an-ip").unwrap_err();
        assert!(matches!(err, RulesError::InvalidQueryAddress(q) if q == "not-an-ip"));

        // IPv6 queries are rejected too; the format is IPv4-only.
        resolve(CONF, "::1").unwrap_err();
    }

    #[test]
    fn resolve_is_idempotent() {
        let first = resolve(CONF, "10.9.9.5").unwrap();
        for _ in 0..3 {
            assert_eq!(resolve(CONF, "10.9.9.5").unwrap(), first);
        }
    }

    #[test]
    fn dotted_mask_rule_matches() {
        let conf = "10.4.0.0/255.255.0.0 wide.pac\n";
        let table = RuleTable::parse(conf).unwrap();
        assert_eq!(table.lookup(ip("10.4.200.9")), Some("wide.pac"));
        assert_eq!(table.lookup(ip("10.5.0.1")), None);
    }
}
