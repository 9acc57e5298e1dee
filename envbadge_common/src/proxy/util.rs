use core::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid upstream origin `{0}`, expected `http(s)://host[:port]`")]
pub struct InvalidOriginError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// The scheme of the origin
    scheme: Scheme,
    /// The host of the origin
    host: String,
    /// The port of the origin
    port: u16,
}

impl Origin {
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The value for a `Host` header, the port is left out when it is the scheme's default.
    pub fn authority(&self) -> String {
        if self.port == self.scheme.default_port() {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scheme {
            Scheme::Http => write!(f, "http://{}:{}", self.host, self.port),
            Scheme::Https => write!(f, "https://{}:{}", self.host, self.port),
        }
    }
}

impl FromStr for Origin {
    type Err = InvalidOriginError;

    fn from_str(origin: &str) -> Result<Self, Self::Err> {
        parse_origin(origin)
    }
}

fn parse_origin(origin: &str) -> Result<Origin, InvalidOriginError> {
    let invalid = || InvalidOriginError(origin.to_string());

    // A trailing slash is the only path an origin may carry
    let trimmed = origin.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let mut parts = trimmed.splitn(2, "://");
    let scheme = match parts.next() {
        Some("http") => Scheme::Http,
        Some("https") => Scheme::Https,
        _ => return Err(invalid()),
    };

    let mut parts = parts.next().ok_or_else(invalid)?.splitn(2, ':');
    let host = parts.next().ok_or_else(invalid)?.to_string();
    if host.is_empty() || host.contains('/') || host.contains(':') {
        return Err(invalid());
    }

    let port = parts
        .next()
        .map(|port| port.parse().map_err(|_| invalid()))
        .unwrap_or_else(|| Ok(scheme.default_port()))?;

    Ok(Origin { scheme, host, port })
}

/// Turn a `Location` that points at the upstream into a path on the proxy. Anything else is
/// returned unchanged.
pub fn relative_location(upstream: &Origin, location: &str) -> String {
    let scheme = match upstream.scheme() {
        Scheme::Http => "http://",
        Scheme::Https => "https://",
    };

    let candidates = [
        format!("{}{}", scheme, upstream.authority()),
        format!("{}{}:{}", scheme, upstream.host(), upstream.port()),
    ];

    for prefix in candidates.iter() {
        if let Some(rest) = location.strip_prefix(prefix.as_str()) {
            if rest.is_empty() || rest.starts_with(['?', '#']) {
                return format!("/{}", rest);
            }
            if rest.starts_with('/') {
                return rest.to_string();
            }
        }
    }

    location.to_string()
}
