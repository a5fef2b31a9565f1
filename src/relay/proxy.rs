//! `/api` forwarding

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use log::{debug, error, warn};
use url::Url;

use super::{RelayState, MAX_BODY_BYTES};

const API_PREFIX: &str = "/api";

/// Headers that describe one hop and must not be forwarded.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

pub async fn forward(State(state): State<RelayState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let target = target_url(&state.backend_url, &parts.uri);

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Rejected {} {}: {}", parts.method, parts.uri, e);
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    debug!("Proxying {} {} -> {}", parts.method, parts.uri, target);
    let upstream = state
        .client
        .request(parts.method.clone(), target.clone())
        .headers(outbound_headers(&parts.headers, &state.backend_url))
        .body(body)
        .send()
        .await;

    let upstream = match upstream {
        Ok(response) => response,
        Err(e) => {
            error!("Proxy error for {} {}: {}", parts.method, target, e);
            return (StatusCode::BAD_GATEWAY, "Backend unavailable").into_response();
        }
    };

    let status = upstream.status();
    let headers = strip_hop_by_hop(upstream.headers());
    match upstream.bytes().await {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            *response.headers_mut() = headers;
            response
        }
        Err(e) => {
            error!("Failed reading backend response for {}: {}", target, e);
            (StatusCode::BAD_GATEWAY, "Backend response interrupted").into_response()
        }
    }
}

/// Map `/api/rest?query` onto the backend, dropping the `/api` prefix.
pub fn target_url(backend: &Url, uri: &Uri) -> Url {
    let rest = uri.path().strip_prefix(API_PREFIX).unwrap_or(uri.path());
    let base = backend.path().trim_end_matches('/');
    let path = format!("{}{}", base, rest);

    let mut url = backend.clone();
    url.set_path(if path.is_empty() { "/" } else { &path });
    url.set_query(uri.query());
    url
}

fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();

    // Anything the Connection header names is hop-by-hop too.
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in HOP_BY_HOP {
        out.remove(name);
    }
    for name in &listed {
        out.remove(name);
    }
    out.remove(header::CONTENT_LENGTH);
    out
}

/// Request headers for the backend. `Host` is left for the client to set
/// from the target, and `Origin` is rewritten to the backend's origin.
pub fn outbound_headers(headers: &HeaderMap, backend: &Url) -> HeaderMap {
    let mut out = strip_hop_by_hop(headers);
    out.remove(header::HOST);

    if out.contains_key(header::ORIGIN) {
        match HeaderValue::from_str(&backend.origin().ascii_serialization()) {
            Ok(origin) => {
                out.insert(header::ORIGIN, origin);
            }
            Err(_) => {
                out.remove(header::ORIGIN);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn test_target_strips_api_prefix() {
        let uri: Uri = "/api/meetings/m-1?expand=true".parse().unwrap();
        assert_eq!(
            target_url(&backend("http://localhost:8080"), &uri).as_str(),
            "http://localhost:8080/meetings/m-1?expand=true"
        );
    }

    #[test]
    fn test_target_keeps_backend_base_path() {
        let uri: Uri = "/api/calendars".parse().unwrap();
        assert_eq!(
            target_url(&backend("http://backend:9000/v1/"), &uri).as_str(),
            "http://backend:9000/v1/calendars"
        );

        let bare: Uri = "/api".parse().unwrap();
        assert_eq!(
            target_url(&backend("http://backend:9000"), &bare).as_str(),
            "http://backend:9000/"
        );
    }

    #[test]
    fn test_outbound_headers_rewrite_origin() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:5000"));
        headers.insert(header::ORIGIN, HeaderValue::from_static("http://localhost:5000"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive, x-trace"));
        headers.insert("x-trace", HeaderValue::from_static("1"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let out = outbound_headers(&headers, &backend("http://backend.internal:8080/"));

        assert!(out.get(header::HOST).is_none());
        assert!(out.get(header::CONNECTION).is_none());
        assert!(out.get("x-trace").is_none());
        assert_eq!(out[header::ORIGIN], "http://backend.internal:8080");
        assert_eq!(out[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_no_origin_added_when_absent() {
        let out = outbound_headers(&HeaderMap::new(), &backend("http://backend:8080"));
        assert!(out.get(header::ORIGIN).is_none());
    }
}
