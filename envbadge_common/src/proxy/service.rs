use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    debug_handler,
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use hyper::header::{ACCEPT_ENCODING, CONNECTION, HOST, LOCATION};
use hyper::{HeaderMap, StatusCode};
use scorched::{logf, LogData, LogImportance};

use crate::{error::Result, proxy::util::relative_location, state::ProxyState};

/// Connection-scoped headers that must not be forwarded in either direction.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "proxy-connection"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// Remove the hop-by-hop headers, including every header the `Connection` field names.
fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let named: Vec<HeaderName> = headers
        .get_all(CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect();

    for name in named {
        headers.remove(name);
    }

    let hop_by_hop: Vec<HeaderName> = headers
        .keys()
        .filter(|name| is_hop_by_hop(name))
        .cloned()
        .collect();

    for name in hop_by_hop {
        headers.remove(name);
    }
}

#[debug_handler]
pub async fn proxy(
    State(state): State<Arc<ProxyState>>,
    req: Request,
) -> Result<impl IntoResponse> {
    let (mut parts, body) = req.into_parts();

    let body_bytes: Vec<u8> = to_bytes(body, usize::MAX).await?.to_vec();

    strip_hop_by_hop(&mut parts.headers);

    parts
        .headers
        .insert(HOST, HeaderValue::from_str(&state.upstream.authority())?);

    // Leave the choice of encodings to the client so responses arrive decompressed
    parts.headers.remove(ACCEPT_ENCODING);

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let res = state
        .client
        .request(
            parts.method,
            format!("{}{}", state.upstream, path_and_query),
        )
        .headers(parts.headers)
        .body(body_bytes)
        .send()
        .await?;

    let mut response_builder = Response::builder().status(res.status());

    let mut headers = res.headers().clone();
    strip_hop_by_hop(&mut headers);

    let location = headers
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(|location| relative_location(&state.upstream, location));
    if let Some(location) = location {
        headers.insert(LOCATION, HeaderValue::from_str(&location)?);
    }

    if let Some(response_headers) = response_builder.headers_mut() {
        *response_headers = headers;
    }

    match response_builder.body(Body::from_stream(res.bytes_stream())) {
        Ok(response) => Ok(response.into_response()),
        Err(e) => {
            logf!(Error, "Error building response: {:?}", e);
            Ok((StatusCode::INTERNAL_SERVER_ERROR, "Error building response").into_response())
        }
    }
}
