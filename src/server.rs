use crate::handler::Handler;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

pub async fn serve<H>(addr: SocketAddr, handler: H) -> Result<(), io::Error>
where
    H: Handler<Incoming> + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on {}", listener.local_addr()?);
    serve_listener(listener, handler).await
}

/// Serves connections from `listener` until accepting fails for a reason other than a dropped peer.
pub async fn serve_listener<H>(listener: TcpListener, handler: H) -> Result<(), io::Error>
where
    H: Handler<Incoming> + 'static,
{
    let handler = Arc::new(handler);

    loop {
        let tcp = accept(&listener).await?;
        let io = TokioIo::new(tcp);

        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            let serve = service_fn(move |req: Request<Incoming>| {
                let resp = handler.call(req);
                async move { Ok::<_, Infallible>(resp.await) }
            });

            if let Err(e) = auto::Builder::new(TokioExecutor::new())
                .serve_connection(io, serve)
                .await
            {
                log::error!("Error serving connection: {}", e);
            }
        });
    }
}

async fn accept(listener: &TcpListener) -> Result<TcpStream, io::Error> {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                log::trace!("Accepted connection from {}", addr);
                return Ok(stream);
            }
            Err(e) if dropped_by_peer(&e) => log::debug!("Aborted connection dropped: {}", e),
            Err(e) => return Err(e),
        }
    }
}

fn dropped_by_peer(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
    )
}
