//! HTTP Handlers

pub mod applications;
pub mod auth;
pub mod bank_connections;
pub mod health;

use axum::http::HeaderMap;

use crate::domain::models::application::RequestMetadata;

const UNKNOWN: &str = "unknown";

/// Client address and user agent, preferring proxy headers
pub(crate) fn request_metadata(headers: &HeaderMap) -> RequestMetadata {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let ip_address = header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .or_else(|| header("x-real-ip"))
        .unwrap_or(UNKNOWN);
    let user_agent = header("user-agent").unwrap_or(UNKNOWN);

    RequestMetadata {
        ip_address: Some(ip_address.to_string()),
        user_agent: Some(user_agent.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn prefers_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        headers.insert("user-agent", HeaderValue::from_static("Mozilla/5.0"));

        let metadata = request_metadata(&headers);
        assert_eq!(metadata.ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(metadata.user_agent.as_deref(), Some("Mozilla/5.0"));
    }

    #[test]
    fn falls_back_to_unknown() {
        let metadata = request_metadata(&HeaderMap::new());
        assert_eq!(metadata.ip_address.as_deref(), Some("unknown"));
        assert_eq!(metadata.user_agent.as_deref(), Some("unknown"));
    }
}
