//! CLI definitions and the CGI entry point.
//!
//! All diagnostics go to stderr via `tracing`; stdout carries nothing but
//! the CGI response.

use std::io::{self, Write};
use std::path::PathBuf;
use std::{env, fs};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dpac_rules::{resolve, Resolution};

use crate::error::CgiError;
use crate::response::write_pac_response;

/// Dynamic proxy auto-config CGI.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dpac",
    version,
    about = "Serves proxy auto-config files chosen by client IP"
)]
pub struct CgiArgs {
    /// Conf file path. Defaults to `<binary-basename>.conf`.
    #[arg(short, long)]
    pub conf: Option<PathBuf>,

    /// Client IP address. Defaults to the REMOTE_ADDR environment
    /// variable set by the web server.
    #[arg(long)]
    pub client_ip: Option<String>,

    /// Directory PAC filenames from the conf are resolved against.
    #[arg(long, default_value = ".")]
    pub pac_dir: PathBuf,
}

/// Initialize tracing for the CGI binary.
///
/// Writes to stderr only; honors `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Run the CGI flow, writing the response to stdout.
pub fn run(args: CgiArgs) -> Result<(), CgiError> {
    respond(&args, &mut io::stdout().lock())
}

/// Run the CGI flow against an arbitrary writer.
///
/// Reads the conf, resolves the client address, loads the matched PAC
/// file, and writes the framed response to `out`.
pub fn respond(args: &CgiArgs, out: &mut impl Write) -> Result<(), CgiError> {
    let conf_path = args.conf.clone().unwrap_or_else(default_conf_path);
    let conf = fs::read_to_string(&conf_path).map_err(|source| CgiError::Conf {
        path: conf_path.clone(),
        source,
    })?;

    let client_ip = match &args.client_ip {
        Some(ip) => ip.clone(),
        None => env::var("REMOTE_ADDR").map_err(|_| CgiError::MissingRemoteAddr)?,
    };

    match resolve(&conf, &client_ip)? {
        Resolution::Output(name) => {
            let pac_path = args.pac_dir.join(&name);
            let body = fs::read(&pac_path).map_err(|source| CgiError::Pac {
                path: pac_path.clone(),
                source,
            })?;
            info!(client = %client_ip, pac = %name, bytes = body.len(), "serving pac file");
            write_pac_response(out, &body)?;
            Ok(())
        }
        Resolution::NoMatch => {
            warn!(client = %client_ip, conf = %conf_path.display(), "no rule matched");
            Err(CgiError::NoMatch(client_ip))
        }
    }
}

/// Conf file named after the invoked binary, e.g. `dpac` -> `dpac.conf`.
fn default_conf_path() -> PathBuf {
    let basename = env::current_exe()
        .ok()
        .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "dpac".to_string());
    PathBuf::from(format!("{basename}.conf"))
}
