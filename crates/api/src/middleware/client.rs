//! Client fingerprinting.
//!
//! A fingerprint is `sha256(salt + ip + "|" + user_agent)` in hex. It is a
//! coarse anti-abuse key, not an identity: it binds a session token to the
//! device that requested it and keys the per-device rate limits.
//!
//! ```ignore
//! async fn my_handler(fingerprint: ClientFingerprint, ...) -> ... {
//!     // fingerprint.0 is the hex digest
//! }
//! ```

use std::{convert::Infallible, net::SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, header::USER_AGENT, request::Parts},
};
use sha2::{Digest, Sha256};

use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFingerprint(pub String);

impl FromRequestParts<AppState> for ClientFingerprint {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        let ip = client_ip(&parts.headers, peer, state.config.trust_proxy_headers);
        let user_agent = header_str(&parts.headers, USER_AGENT.as_str());

        Ok(ClientFingerprint(fingerprint(
            &state.config.fingerprint_salt,
            &ip,
            user_agent,
        )))
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or_default()
}

/// Client address as reported by the edge proxy, falling back to the peer.
///
/// Proxy headers are ignored unless `trust_proxy` is set, since any caller
/// can send them.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy: bool) -> String {
    let peer_ip = || peer.map(|addr| addr.ip().to_string()).unwrap_or_default();
    if !trust_proxy {
        return peer_ip();
    }

    let direct = ["x-nf-client-connection-ip", "client-ip"]
        .into_iter()
        .map(|name| header_str(headers, name))
        .find(|v| !v.is_empty());
    if let Some(ip) = direct {
        return ip.to_string();
    }

    let forwarded = header_str(headers, "x-forwarded-for")
        .split(',')
        .next()
        .unwrap_or_default()
        .trim();
    if !forwarded.is_empty() {
        return forwarded.to_string();
    }

    peer_ip()
}

pub fn fingerprint(salt: &str, ip: &str, user_agent: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(ip.as_bytes());
    hasher.update(b"|");
    hasher.update(user_agent.as_bytes());
    hex::encode(hasher.finalize())
}
