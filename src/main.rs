mod opt;

use urlshort::err::DisplayError;
use urlshort::{config, map_handler, server, MappingTable, NotFound, RedirectStatus};

#[tokio::main]
async fn main() -> Result<(), DisplayError> {
    let opt::Options {
        verbose,
        listen,
        config: config_path,
        redirects,
        permanent,
    } = clap::Parser::parse();

    env_logger::Builder::new()
        .filter_level(match verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let status = if permanent {
        RedirectStatus::MovedPermanently
    } else {
        RedirectStatus::Found
    };

    let inline = map_handler(redirects, NotFound).with_status(status);
    let table = match &config_path {
        Some(path) => config::load_from_path(path).await?,
        None => MappingTable::new(),
    };
    log::info!(
        "Serving {} redirects from config, {} inline",
        table.len(),
        inline.table().len()
    );
    let handler = map_handler(table, inline).with_status(status);

    server::serve(listen, handler).await?;

    Ok(())
}
