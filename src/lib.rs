//! Redirect HTTP request paths to URLs from an in-memory map or a YAML list.
//!
//! ```no_run
//! use urlshort::{map_handler, yaml_handler, NotFound};
//!
//! # async fn run() -> Result<(), urlshort::err::Error> {
//! let inline = map_handler([("/gh", "https://github.com")], NotFound);
//! let handler = yaml_handler(b"- path: /docs\n  url: https://docs.rs\n", inline)?;
//! urlshort::server::serve(([127, 0, 0, 1], 8080).into(), handler).await?;
//! # Ok(())
//! # }
//! ```

pub mod body;
pub mod config;
pub mod err;
pub mod handler;
pub mod server;
pub mod table;

pub use config::{load, ConfigParseError, PathMapping};
pub use handler::{
    handler_fn, map_handler, yaml_handler, Handler, NotFound, RedirectHandler, RedirectStatus,
};
pub use table::MappingTable;
