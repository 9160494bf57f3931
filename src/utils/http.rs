// src/utils/http.rs
//! Authorization-header parsing.
//!
//! The typical way a DID token enters the system: an `Authorization`
//! header of the form `Bearer <token>`. Pure string handling, no HTTP
//! dependency.

/// Extracts the bearer token from an `Authorization` header value.
///
/// The `Bearer` scheme is matched case-insensitively with a single space
/// before the token. Placeholder values a browser or proxy may inject
/// (`""`, `"null"`, `"none"`, any casing) count as no token.
///
/// # Returns
/// `Some(token)` if a usable token is present, `None` otherwise.
pub fn parse_authorization_header_value(header_value: &str) -> Option<String> {
    let (scheme, token) = header_value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    null_safe(token)
}

fn null_safe(value: &str) -> Option<String> {
    if value.is_empty()
        || value.eq_ignore_ascii_case("null")
        || value.eq_ignore_ascii_case("none")
    {
        return None;
    }

    Some(value.to_string())
}
