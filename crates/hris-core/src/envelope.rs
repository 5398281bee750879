//! Normalization of the response envelopes the API wraps payloads in.
//!
//! Endpoints answer with the payload itself, `{ "data": ... }`,
//! `{ "user": ... }` or `{ "data": { "user": ... } }`. These helpers pick the
//! payload with a fixed precedence; a `null` at any step counts as absent.

use serde_json::Value;

fn present<'a>(value: Option<&'a Value>) -> Option<&'a Value> {
    value.filter(|v| !v.is_null())
}

/// Extracts a user object.
///
/// Precedence: `data.user`, then `user`, then the value itself.
pub fn unwrap_user(value: &Value) -> &Value {
    present(value.get("data").and_then(|d| d.get("user")))
        .or_else(|| present(value.get("user")))
        .unwrap_or(value)
}

/// Extracts a `data` payload.
///
/// Precedence: `data`, then the value itself.
pub fn unwrap_data(value: &Value) -> &Value {
    present(value.get("data")).unwrap_or(value)
}

/// Finds a bearer token in a sign-in response.
///
/// Precedence: `token`, `access_token`, `data.token`, `data.access_token`.
/// Only non-empty strings count.
pub fn extract_token(value: &Value) -> Option<&str> {
    let data = value.get("data");
    [
        value.get("token"),
        value.get("access_token"),
        data.and_then(|d| d.get("token")),
        data.and_then(|d| d.get("access_token")),
    ]
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
    .find(|token| !token.is_empty())
}

/// Extracts a list payload: [`unwrap_data`] when it yields an array, else an
/// empty slice.
pub fn unwrap_list(value: &Value) -> &[Value] {
    match unwrap_data(value) {
        Value::Array(items) => items.as_slice(),
        _ => &[],
    }
}
