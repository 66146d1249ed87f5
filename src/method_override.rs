//! HTML forms can only send GET and POST. A POST carrying `?_method=PUT`
//! (or an `X-HTTP-Method-Override` header) is re-dispatched with that verb.
//!
//! This has to run before routing, so it wraps the whole `Router` rather
//! than being added with `Router::layer`.

use axum::extract::{Query, Request};
use axum::http::{Method, Uri};
use serde::Deserialize;

pub const HEADER: &str = "x-http-method-override";

/// Rewrite the method of an overridden POST; other requests pass through
pub fn override_method(mut request: Request) -> Request {
    if request.method() != Method::POST {
        return request;
    }

    let requested = query_override(request.uri()).or_else(|| {
        request
            .headers()
            .get(HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    });

    if let Some(method) = requested.as_deref().and_then(allowed_method) {
        tracing::debug!("Overriding POST {} as {}", request.uri().path(), method);
        *request.method_mut() = method;
    }

    request
}

#[derive(Deserialize)]
struct OverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// The `_method` query parameter, percent-decoded; unparsable queries carry none
fn query_override(uri: &Uri) -> Option<String> {
    Query::<OverrideQuery>::try_from_uri(uri)
        .ok()
        .and_then(|Query(query)| query.method)
}

fn allowed_method(name: &str) -> Option<Method> {
    match name.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
