use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use reqwest::{Request, Response};
use tower::{Layer, Service};

/// Logs every gateway exchange: method, URL, body size, status and latency.
///
/// Request bodies are never logged; query parameters that may carry
/// secrets are masked.
#[derive(Clone)]
pub struct LoggingMiddleware {
    verbose: bool,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Log at `debug` instead of `info`.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for LoggingMiddleware
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Service = LoggingMiddlewareService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddlewareService {
            inner,
            verbose: self.verbose,
        }
    }
}

#[derive(Clone)]
pub struct LoggingMiddlewareService<S> {
    inner: S,
    verbose: bool,
}

const SENSITIVE_FIELDS: &[&str] = &["key", "api_key", "sign", "secret", "password", "token"];

impl<S> LoggingMiddlewareService<S> {
    fn redact_url(url: &str) -> String {
        let Some((base, query)) = url.split_once('?') else {
            return url.to_string();
        };

        let redacted_query = query
            .split('&')
            .map(|param| match param.split_once('=') {
                Some((name, _)) if SENSITIVE_FIELDS.iter().any(|s| name.eq_ignore_ascii_case(s)) => {
                    format!("{name}=[REDACTED]")
                }
                _ => param.to_string(),
            })
            .collect::<Vec<_>>()
            .join("&");

        format!("{base}?{redacted_query}")
    }

    fn body_len(request: &Request) -> Option<usize> {
        request
            .body()
            .and_then(|body| body.as_bytes())
            .map(|bytes| bytes.len())
    }

    fn log_request(method: &str, url: &str, body_len: Option<usize>, verbose: bool) {
        let safe_url = Self::redact_url(url);
        let size = body_len.map_or_else(|| "-".to_string(), |len| format!("{len}B"));
        if verbose {
            debug!("[WechatPay] >>> {} {} ({})", method, safe_url, size);
        } else {
            info!("[WechatPay] {} {}", method, safe_url);
        }
    }

    fn log_response(status: u16, duration: Duration, verbose: bool) {
        if status >= 400 {
            warn!(
                "[WechatPay] <<< {} {} ({:?})",
                status,
                Self::status_text(status),
                duration
            );
        } else if verbose {
            debug!(
                "[WechatPay] <<< {} {} ({:?})",
                status,
                Self::status_text(status),
                duration
            );
        } else {
            info!("[WechatPay] {} ({:?})", status, duration);
        }
    }

    fn status_text(status: u16) -> &'static str {
        match status {
            200 => "OK",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            408 => "Request Timeout",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "",
        }
    }
}

impl<S, Error> Service<Request> for LoggingMiddlewareService<S>
where
    S: Service<Request, Response = Response, Error = Error> + Send + Clone + 'static,
    S::Future: Send,
    Error: Send + 'static,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let method = req.method().as_str().to_string();
        let url = req.url().to_string();
        let body_len = Self::body_len(&req);
        let verbose = self.verbose;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            Self::log_request(&method, &url, body_len, verbose);

            let start = Instant::now();
            let response = inner.call(req).await?;

            Self::log_response(response.status().as_u16(), start.elapsed(), verbose);

            Ok(response)
        })
    }
}
