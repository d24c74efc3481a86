use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::header::LOCATION;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use urlshort::{body, handler_fn, map_handler, server, yaml_handler, RedirectStatus};

async fn start<H>(handler: H) -> SocketAddr
where
    H: urlshort::Handler<hyper::body::Incoming> + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve_listener(listener, handler));
    addr
}

async fn get(addr: SocketAddr, path: &str) -> Response<hyper::body::Incoming> {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .unwrap();
    tokio::spawn(conn);

    let req = Request::get(path)
        .header("host", addr.to_string())
        .body(Empty::<Bytes>::new())
        .unwrap();
    sender.send_request(req).await.unwrap()
}

#[tokio::test]
async fn redirects_over_http() {
    let fallback = handler_fn(|req: Request<hyper::body::Incoming>| async move {
        Response::new(body::full::<urlshort::err::Error>(format!(
            "fallback {}",
            req.uri().path()
        )))
    });
    let yml = b"
- path: /urlshort
  url: https://github.com/org/urlshort
";
    let addr = start(yaml_handler(yml, fallback).unwrap()).await;

    let resp = get(addr, "/urlshort").await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()[LOCATION], "https://github.com/org/urlshort");

    let resp = get(addr, "/other").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&text[..], b"fallback /other");
}

#[tokio::test]
async fn permanent_redirects_over_http() {
    let handler = map_handler([("/a", "https://x")], urlshort::NotFound)
        .with_status(RedirectStatus::MovedPermanently);
    let addr = start(handler).await;

    let resp = get(addr, "/a").await;
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(resp.headers()[LOCATION], "https://x");

    let resp = get(addr, "/b").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
