//! CGI response framing for PAC documents.

use std::io::Write;

/// MIME type browsers expect for proxy auto-config scripts.
pub const PAC_CONTENT_TYPE: &str = "application/x-ns-proxy-autoconfig";

/// Write a complete CGI response: content headers, blank line, body.
///
/// The body is passed through verbatim; the web server in front of the
/// CGI adds the status line and transport framing.
pub fn write_pac_response(out: &mut impl Write, body: &[u8]) -> std::io::Result<()> {
    writeln!(out, "Content-Length: {}", body.len())?;
    writeln!(out, "Content-Type: {PAC_CONTENT_TYPE}")?;
    writeln!(out)?;
    out.write_all(body)?;
    out.flush()
}
