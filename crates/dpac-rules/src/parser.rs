//! Conf-line tokenizer and network-spec parsing.
//!
//! Lines have the shape `<network-spec-list> <output-id>` with one or more
//! spaces or tabs as the delimiter. The spec list is `;`-separated; each
//! entry is either slash-CIDR (`10.4.5.0/24`) or slash-dotted-mask
//! (`10.4.5.0/255.255.0.0`). A left token of exactly `*` is the wildcard
//! rule and carries no spec list.

use std::net::Ipv4Addr;

use crate::error::LineError;
use crate::spec::NetworkSpec;

/// Result of tokenizing a single conf line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineToken<'a> {
    /// Blank or comment line; produces no rule.
    Skip,
    /// Wildcard rule: matches every address.
    Wildcard { output: &'a str },
    /// Ordinary rule: spec-list text plus output id, both still unparsed.
    Rule { specs: &'a str, output: &'a str },
}

/// Split one raw conf line into its network-spec text and output id.
///
/// Accepts both `\n` and `\r\n` terminated input (one trailing `\r` is
/// stripped here in case the caller split on `\n` alone). A line with no
/// space/tab run after the left token, or nothing but whitespace after it,
/// is a syntax error; the caller is expected to skip such lines.
pub fn tokenize_line(raw: &str) -> Result<LineToken<'_>, LineError> {
    let line = raw.strip_suffix('\r').unwrap_or(raw);
    let line = line.trim_start_matches([' ', '\t']);

    if line.is_empty() || line.starts_with('#') {
        return Ok(LineToken::Skip);
    }

    let Some(delim) = line.find([' ', '\t']) else {
        return Err(LineError::Syntax);
    };
    let (left, rest) = line.split_at(delim);
    let output = rest.trim_matches([' ', '\t']);
    if output.is_empty() {
        return Err(LineError::Syntax);
    }

    if left == "*" {
        Ok(LineToken::Wildcard { output })
    } else {
        Ok(LineToken::Rule { specs: left, output })
    }
}

/// Parse a single network spec in either slash-CIDR or dotted-mask form.
///
/// The two forms are told apart by the shape of the part after the slash
/// (a dotted quad contains `.`), not by its value: `/24` is a prefix
/// length even though 24 is also a valid octet.
pub fn parse_network_spec(text: &str) -> Result<NetworkSpec, LineError> {
    let (addr_part, mask_part) = text
        .split_once('/')
        .ok_or_else(|| malformed(text, "missing '/'"))?;

    let network: Ipv4Addr = addr_part
        .parse()
        .map_err(|_| malformed(text, "bad network address"))?;

    if mask_part.contains('.') {
        let netmask: Ipv4Addr = mask_part
            .parse()
            .map_err(|_| malformed(text, "bad dotted mask"))?;
        Ok(NetworkSpec::with_mask(network, netmask))
    } else {
        let prefix: u8 = mask_part
            .parse()
            .map_err(|_| malformed(text, "bad prefix length"))?;
        if prefix > 32 {
            return Err(malformed(text, "prefix length out of range"));
        }
        Ok(NetworkSpec::from_prefix(network, prefix))
    }
}

/// Parse a `;`-separated network-spec list.
///
/// One trailing `;` after the last entry is accepted. Any entry that fails
/// to parse, or any empty entry, invalidates the entire list; a rule is
/// never registered with only some of its specs.
pub fn parse_spec_list(text: &str) -> Result<Vec<NetworkSpec>, LineError> {
    let body = text.strip_suffix(';').unwrap_or(text);
    if body.is_empty() {
        return Err(malformed(text, "empty network list"));
    }
    body.split(';').map(parse_network_spec).collect()
}

fn malformed(spec: &str, reason: &str) -> LineError {
    LineError::MalformedAddress(format!("{spec:?}: {reason}"))
}
