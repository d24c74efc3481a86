use clap::{ArgAction, Parser};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use urlshort::PathMapping;

/// Redirect HTTP request paths to configured URLs
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Options {
    /// Logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(
        help = "Socket address to listen on (--help for more)",
        long_help = r"Socket address to listen on:
    - incoming http connections are received on this socket
Examples:
    - 127.0.0.1:3000
    - 0.0.0.0:80
    - [2001:db8::1]:8080"
    )]
    pub listen: SocketAddr,

    #[arg(
        help = "YAML file of redirects (--help for more)",
        long_help = r"YAML file of redirects:
    - a list of records, each with a `path` and a `url`
    - paths must match the request path exactly
    - a repeated path uses its last url
Example:
    - path: /urlshort
      url: https://github.com/gophercises/urlshort"
    )]
    #[arg(short, long, display_order = 0)]
    pub config: Option<PathBuf>,

    #[arg(
        help = "Inline redirect, PATH=URL (--help for more)",
        long_help = r"Inline redirect, PATH=URL:
    - may be given more than once
    - checked after the YAML file, so the file wins on conflicts
Examples:
    - /gh=https://github.com
    - /docs=https://docs.rs/urlshort"
    )]
    #[arg(short, long = "redirect", display_order = 0, value_parser = PathMapping::from_str)]
    pub redirects: Vec<PathMapping>,

    /// Respond with 301 Moved Permanently instead of 302 Found
    #[arg(long)]
    pub permanent: bool,
}
