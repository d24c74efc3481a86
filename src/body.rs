use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full};
use hyper::body::Bytes;

pub fn empty<E>() -> BoxBody<Bytes, E> {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}

pub fn full<E>(chunk: impl Into<Bytes>) -> BoxBody<Bytes, E> {
    Full::new(chunk.into())
        .map_err(|never| match never {})
        .boxed()
}
