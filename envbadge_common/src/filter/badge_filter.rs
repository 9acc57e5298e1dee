use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use encoding_rs::{Encoding, UTF_8};
use hyper::header::{CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, TRANSFER_ENCODING};
use scorched::{logf, LogData, LogImportance};

use crate::{
    error::Result,
    filter::capture::{CaptureError, CaptureShim},
    rewriting::{html::badge_rewriter::BadgeRewriter, rewriter::Rewriter},
    state::FilterState,
};

/// Index pages of the repository browser and the package manager.
pub const ACCEPTED_PATHS: [&str; 2] = ["/crx/de/index.jsp", "/crx/packmgr/index.jsp"];

/// Buffers the downstream response of the accepted admin pages and injects the environment
/// badge into it.
///
/// Requests are passed through with the downstream response returned as is, body unread, when
/// no feature is enabled, when the path is not accepted, or when the response is not
/// uncompressed HTML in a known character encoding. The rewritten document is encoded back
/// into the declared encoding. If the injected text cannot be represented there, the captured
/// bytes are emitted unchanged.
pub async fn badge_filter(
    State(state): State<Arc<FilterState>>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let settings = match state.settings.as_ref().map(|source| source.badge_settings()) {
        Some(settings) if settings.any_enabled() => settings,
        _ => return Ok(next.run(request).await),
    };

    if !accepts(&request) {
        return Ok(next.run(request).await);
    }

    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    let Some(encoding) = rewritable_encoding(response.headers()) else {
        logf!(
            Debug,
            "Not rewriting {}: response is not uncompressed HTML in a known encoding",
            path
        );
        return Ok(response);
    };

    let (mut parts, body) = response.into_parts();

    let captured = async {
        let bytes = CaptureShim::read(body, state.max_capture_bytes).await?;
        let captured = CaptureShim::decode(&bytes, encoding)?;
        Ok::<_, CaptureError>((bytes, captured))
    };
    let (original, captured) = match captured.await {
        Ok(result) => result,
        Err(e) => {
            logf!(Error, "Error capturing response for {}: {}", path, e);
            return Err(e.into());
        }
    };

    let modified = BadgeRewriter::new(&settings).rewrite(captured.into_output());

    let output = match encode(modified, encoding) {
        Some(output) => {
            logf!(Debug, "Injected environment badge into {}", path);
            output
        }
        None => {
            logf!(
                Warning,
                "Not rewriting {}: the badge cannot be encoded as {}",
                path,
                encoding.name()
            );
            original
        }
    };

    parts.headers.remove(TRANSFER_ENCODING);
    parts
        .headers
        .insert(CONTENT_LENGTH, HeaderValue::from(output.len()));

    Ok(Response::from_parts(parts, Body::from(output)))
}

fn accepts(request: &Request) -> bool {
    request.method() != Method::HEAD && ACCEPTED_PATHS.contains(&request.uri().path())
}

/// The encoding to decode and re-encode the body with, `None` when the response is not
/// rewritable.
fn rewritable_encoding(headers: &HeaderMap) -> Option<&'static Encoding> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())?;

    if !content_type.to_ascii_lowercase().contains("text/html") {
        return None;
    }

    let identity = headers
        .get_all(CONTENT_ENCODING)
        .iter()
        .all(|v| v.to_str().map_or(false, |v| v.trim().eq_ignore_ascii_case("identity")));
    if !identity {
        return None;
    }

    let encoding = match charset(content_type) {
        Some(label) => Encoding::for_label(label.as_bytes())?,
        None => UTF_8,
    };

    // UTF-16 and the replacement encoding can only be decoded, their output is UTF-8
    (encoding.output_encoding() == encoding).then_some(encoding)
}

/// `None` when some character of `text` has no representation in `encoding`.
fn encode(text: String, encoding: &'static Encoding) -> Option<Bytes> {
    if encoding == UTF_8 {
        return Some(Bytes::from(text));
    }

    let (bytes, _, unmappable) = encoding.encode(&text);
    (!unmappable).then(|| Bytes::from(bytes.into_owned()))
}

fn charset(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}
