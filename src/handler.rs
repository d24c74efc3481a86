use crate::body;
use crate::config::{self, ConfigParseError};
use crate::err::Error;
use crate::table::MappingTable;
use futures::future::{self, BoxFuture, FutureExt};
use headers::{ContentType, HeaderMapExt};
use http_body_util::combinators::BoxBody;
use hyper::body::Bytes;
use hyper::header::LOCATION;
use hyper::http::HeaderValue;
use hyper::{Method, Request, Response, StatusCode, Uri};
use std::future::Future;
use std::sync::Arc;

pub type ResponseBody = BoxBody<Bytes, Error>;

/// Something that turns a request into a response.
///
/// Generic over the request body, so the same handler can sit behind a hyper server
/// (`Request<Incoming>`) or be driven directly with in-memory requests.
pub trait Handler<B>: Send + Sync {
    fn call(&self, req: Request<B>) -> BoxFuture<'static, Response<ResponseBody>>;
}

impl<B, H: Handler<B> + ?Sized> Handler<B> for Arc<H> {
    fn call(&self, req: Request<B>) -> BoxFuture<'static, Response<ResponseBody>> {
        (**self).call(req)
    }
}

impl<B, H: Handler<B> + ?Sized> Handler<B> for Box<H> {
    fn call(&self, req: Request<B>) -> BoxFuture<'static, Response<ResponseBody>> {
        (**self).call(req)
    }
}

pub struct HandlerFn<F>(F);

/// Wraps an async closure as a [`Handler`].
pub fn handler_fn<B, F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(Request<B>) -> Fut + Send + Sync,
    Fut: Future<Output = Response<ResponseBody>> + Send + 'static,
{
    HandlerFn(f)
}

impl<B, F, Fut> Handler<B> for HandlerFn<F>
where
    F: Fn(Request<B>) -> Fut + Send + Sync,
    Fut: Future<Output = Response<ResponseBody>> + Send + 'static,
{
    fn call(&self, req: Request<B>) -> BoxFuture<'static, Response<ResponseBody>> {
        (self.0)(req).boxed()
    }
}

/// Fallback that answers every request with an empty 404.
#[derive(Clone, Copy, Debug, Default)]
pub struct NotFound;

impl<B> Handler<B> for NotFound {
    fn call(&self, req: Request<B>) -> BoxFuture<'static, Response<ResponseBody>> {
        log::warn!("{} {} -> [no match]", req.method(), req.uri());
        let mut resp = Response::new(body::empty());
        *resp.status_mut() = StatusCode::NOT_FOUND;
        future::ready(resp).boxed()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RedirectStatus {
    /// 302: clients re-check on every visit, so targets can change later.
    #[default]
    Found,
    /// 301: clients and proxies may cache the redirect indefinitely.
    MovedPermanently,
}

impl RedirectStatus {
    pub fn code(self) -> StatusCode {
        match self {
            RedirectStatus::Found => StatusCode::FOUND,
            RedirectStatus::MovedPermanently => StatusCode::MOVED_PERMANENTLY,
        }
    }

    fn reason(self) -> &'static str {
        match self {
            RedirectStatus::Found => "Found",
            RedirectStatus::MovedPermanently => "Moved Permanently",
        }
    }
}

/// Redirects requests whose path is in the table, and hands everything else to `fallback`.
pub struct RedirectHandler<F> {
    table: MappingTable,
    status: RedirectStatus,
    fallback: F,
}

impl<F> RedirectHandler<F> {
    pub fn new(table: MappingTable, fallback: F) -> Self {
        Self {
            table,
            status: RedirectStatus::default(),
            fallback,
        }
    }

    pub fn with_status(mut self, status: RedirectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    pub fn status(&self) -> RedirectStatus {
        self.status
    }

    fn redirect(&self, method: &Method, uri: &Uri, url: &str) -> Response<ResponseBody> {
        let location = match HeaderValue::from_str(url) {
            Ok(location) => location,
            Err(e) => {
                log::warn!("{} {} -> [invalid redirect url] {:?} : {}", method, uri, url, e);
                let mut resp = Response::new(body::empty());
                *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                return resp;
            }
        };

        log::info!("{} {} -> {}", method, uri, url);
        let mut resp = if *method == Method::GET {
            let link = format!(
                "<a href=\"{}\">{}</a>.\n",
                escape_html(url),
                self.status.reason()
            );
            Response::new(body::full(link))
        } else {
            Response::new(body::empty())
        };
        if *method == Method::GET || *method == Method::HEAD {
            resp.headers_mut().typed_insert(ContentType::html());
        }
        *resp.status_mut() = self.status.code();
        resp.headers_mut().insert(LOCATION, location);
        resp
    }
}

impl<B, F: Handler<B>> Handler<B> for RedirectHandler<F> {
    fn call(&self, req: Request<B>) -> BoxFuture<'static, Response<ResponseBody>> {
        match self.table.resolve(req.uri().path()) {
            Some(url) => future::ready(self.redirect(req.method(), req.uri(), url)).boxed(),
            None => {
                log::debug!("{} {} -> [fallback]", req.method(), req.uri());
                self.fallback.call(req)
            }
        }
    }
}

/// Builds a handler from a ready-made path to url mapping.
pub fn map_handler<F>(table: impl Into<MappingTable>, fallback: F) -> RedirectHandler<F> {
    RedirectHandler::new(table.into(), fallback)
}

/// Parses `yml` once and builds a handler over the resulting mapping.
///
/// The only possible error is invalid YAML; see [`config::load`] for the expected format.
pub fn yaml_handler<F>(yml: &[u8], fallback: F) -> Result<RedirectHandler<F>, ConfigParseError> {
    let table = config::load(yml)?;
    Ok(RedirectHandler::new(table, fallback))
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
