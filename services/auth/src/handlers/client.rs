//! Caller address and device detection.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};

use crate::domain::types::{ClientMeta, UNKNOWN_IP};

/// Address and user agent of the HTTP caller, read before the body is consumed.
#[derive(Debug, Clone, Default)]
pub struct RequestOrigin {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestOrigin {
    /// Body values win; otherwise fall back to what the request itself reveals.
    pub fn meta(&self, device: Option<String>, ip_address: Option<String>) -> ClientMeta {
        ClientMeta {
            ip_address: non_blank(ip_address)
                .or_else(|| self.ip.clone())
                .unwrap_or_else(|| UNKNOWN_IP.to_owned()),
            device: non_blank(device)
                .or_else(|| self.user_agent.clone())
                .unwrap_or_default(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        let origin = Self {
            ip: client_ip(&parts.headers, peer),
            user_agent: parts
                .headers
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned),
        };
        async move { Ok(origin) }
    }
}

/// First `x-forwarded-for` hop, then `x-real-ip`, then the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    forwarded
        .or(real_ip)
        .map(str::to_owned)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}
