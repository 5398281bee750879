//! Authenticated JSON client for the HRIS REST API.

use super::{ApiError, ReqwestTransport, TokenStore};
use hris_core::config::AppConfig;
use hris_core::events::{Subscription, UnauthorizedBus, UnauthorizedEvent};
use hris_core::http::{HttpRequest, HttpTransport, Method, MultipartForm, RequestBody};
use hris_core::storage::SlotStorage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use url::form_urlencoded;

const AUTHORIZATION: &str = "Authorization";
const CONTENT_TYPE: &str = "Content-Type";
const ACCEPT: &str = "Accept";
const APPLICATION_JSON: &str = "application/json";

/// Options for [`ApiClient::request`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<RequestBody>,
    /// Extra headers. They may replace `Content-Type`/`Accept` but never the
    /// bearer `Authorization` header.
    pub headers: Vec<(String, String)>,
    /// Query parameters, form-encoded onto the URL.
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

/// JSON client that attaches the stored bearer token.
///
/// Every 401 is published on the [`UnauthorizedBus`] before the error is
/// returned to the caller, so a session guard can react without each call
/// site checking status codes. Clones share the token store and the bus.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    tokens: TokenStore,
    unauthorized: UnauthorizedBus,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        tokens: TokenStore,
        unauthorized: UnauthorizedBus,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            tokens,
            unauthorized,
        }
    }

    /// Client over reqwest for the configured base URL.
    pub fn from_config(config: &AppConfig, storage: Arc<dyn SlotStorage>) -> Self {
        Self::new(
            config.base_url(),
            Arc::new(ReqwestTransport::new()),
            TokenStore::new(storage),
            UnauthorizedBus::new(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn unauthorized_bus(&self) -> &UnauthorizedBus {
        &self.unauthorized
    }

    pub fn set_token(&self, token: &str) -> hris_core::Result<()> {
        self.tokens.set_token(token)
    }

    pub fn get_token(&self) -> Option<String> {
        self.tokens.get_token()
    }

    pub fn clear_token(&self) -> hris_core::Result<()> {
        self.tokens.clear_token()
    }

    /// Registers `callback` for every future 401 response.
    pub fn on_unauthorized<F>(&self, callback: F) -> Subscription<UnauthorizedEvent>
    where
        F: Fn(&UnauthorizedEvent) + Send + Sync + 'static,
    {
        self.unauthorized.subscribe(callback)
    }

    /// Performs a request and returns the parsed JSON body.
    ///
    /// Empty or non-JSON bodies parse as `Value::Null`.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let method = options.method;
        let http_request = self.build_request(path, options);

        tracing::debug!(%method, path, "API request");

        let response = self
            .transport
            .send(http_request)
            .await
            .map_err(|e| {
                tracing::debug!(%method, path, "API request failed without response: {}", e);
                ApiError::network(e.message)
            })?;

        let body = parse_body(&response.body);

        if response.is_success() {
            tracing::debug!(%method, path, status = response.status, "API response");
            return Ok(body);
        }

        let error = ApiError::from_response(response.status, body);
        if error.is_unauthorized() {
            tracing::warn!(%method, path, "Unauthorized response; notifying subscribers");
            self.unauthorized
                .publish(&UnauthorizedEvent::new(method, path, error.message()));
        } else {
            tracing::debug!(%method, path, status = response.status, "API error response");
        }
        Err(error)
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::new(Method::Get)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::new(Method::Post).json(body))
            .await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::new(Method::Put).json(body))
            .await
    }

    pub async fn patch(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::new(Method::Patch).json(body))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::new(Method::Delete)).await
    }

    /// POSTs a multipart form.
    pub async fn upload(&self, path: &str, form: MultipartForm) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::new(Method::Post).multipart(form))
            .await
    }

    /// GET and decode the body into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.get(path).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Sends `body` as JSON and decodes the response into `T`.
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let value = self
            .request(path, RequestOptions::new(method).json(body))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    fn build_request(&self, path: &str, options: RequestOptions) -> HttpRequest {
        let token = self.tokens.get_token();
        let mut headers: Vec<(String, String)> = vec![(ACCEPT.to_string(), APPLICATION_JSON.to_string())];

        if matches!(options.body, Some(RequestBody::Json(_))) {
            set_header(&mut headers, CONTENT_TYPE, APPLICATION_JSON);
        }

        for (name, value) in options.headers {
            if token.is_some() && name.eq_ignore_ascii_case(AUTHORIZATION) {
                tracing::debug!("Ignoring caller Authorization header; bearer token takes precedence");
                continue;
            }
            set_header(&mut headers, &name, &value);
        }

        if let Some(token) = token {
            set_header(&mut headers, AUTHORIZATION, &format!("Bearer {}", token));
        }

        HttpRequest {
            method: options.method,
            url: self.url_for(path, &options.query),
            headers,
            body: options.body,
        }
    }

    fn url_for(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        if !query.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(
                &form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(query)
                    .finish(),
            );
        }
        url
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("tokens", &self.tokens)
            .field("unauthorized", &self.unauthorized)
            .finish()
    }
}

/// Percent-encodes `value` for use as a single path segment.
///
/// Everything except ASCII alphanumerics and `*-._` is escaped, so ids
/// containing `/`, `?` or spaces cannot change the endpoint.
pub fn path_segment(value: &str) -> String {
    // byte_serialize writes a space as '+' and a literal '+' as %2B.
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Replaces a header with the same name (case-insensitive) or appends it.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
        Some(existing) => *existing = (name.to_string(), value.to_string()),
        None => headers.push((name.to_string(), value.to_string())),
    }
}

fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|e| {
        tracing::debug!("Response body is not JSON: {}", e);
        Value::Null
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_transport::RecordingTransport;
    use crate::storage::MemorySlotStorage;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn client() -> (ApiClient, RecordingTransport) {
        let transport = RecordingTransport::new();
        let client = ApiClient::new(
            "http://api.test/",
            Arc::new(transport.clone()),
            TokenStore::new(Arc::new(MemorySlotStorage::new())),
            UnauthorizedBus::new(),
        );
        (client, transport)
    }

    #[tokio::test]
    async fn test_bearer_header_when_token_held() {
        let (client, transport) = client();
        client.set_token("abc").unwrap();

        client.get("/api/employees").await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.url, "http://api.test/api/employees");
        assert_eq!(request.header("authorization"), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        let (client, transport) = client();

        client.get("api/employees").await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.url, "http://api.test/api/employees");
        assert_eq!(request.header("authorization"), None);
    }

    #[tokio::test]
    async fn test_caller_headers_cannot_override_bearer() {
        let (client, transport) = client();
        client.set_token("abc").unwrap();

        let options = RequestOptions::new(Method::Get)
            .header("Authorization", "Basic xyz")
            .header("X-Company", "C-1");
        client.request("/api/locations", options).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.header("Authorization"), Some("Bearer abc"));
        assert_eq!(request.header("X-Company"), Some("C-1"));
    }

    #[tokio::test]
    async fn test_json_body_sets_content_type() {
        let (client, transport) = client();

        client
            .post("/api/locations", json!({ "name": "HQ" }))
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(
            request.body,
            Some(RequestBody::Json(json!({ "name": "HQ" })))
        );
    }

    #[tokio::test]
    async fn test_multipart_body_has_no_content_type() {
        let (client, transport) = client();

        let form = MultipartForm::new().file("avatar", "me.png", Some("image/png".into()), vec![1]);
        client.upload("/api/employees/1/avatar", form).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.header("content-type"), None);
        assert!(matches!(request.body, Some(RequestBody::Multipart(_))));
    }

    #[tokio::test]
    async fn test_success_returns_body_unwrapped() {
        let (client, transport) = client();
        transport.respond(200, r#"{ "data": [1, 2] }"#);

        let value = client.get("/api/employees").await.unwrap();
        assert_eq!(value, json!({ "data": [1, 2] }));
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        let (client, transport) = client();
        transport.respond(204, "");

        assert_eq!(client.delete("/api/locations/1").await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_http_error_carries_status_message_and_body() {
        let (client, transport) = client();
        transport.respond(404, r#"{"message": "not found"}"#);

        let err = client.get("/api/employees/99").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.message(), "not found");
        assert_eq!(err.body(), Some(&json!({ "message": "not found" })));
    }

    #[tokio::test]
    async fn test_network_error_has_no_status() {
        let (client, transport) = client();
        transport.fail("connection refused");

        let err = client.get("/api/employees").await.unwrap_err();
        assert!(err.is_network());
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_unauthorized_notifies_before_error_returns() {
        let (client, transport) = client();
        transport.respond(401, r#"{"message": "Token expired"}"#);

        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let _sub = client.on_unauthorized(move |event| {
            assert_eq!(event.path, "/auth/me");
            assert_eq!(event.message, "Token expired");
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let err = client.get("/auth/me").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_panicking_subscriber_still_yields_401_error() {
        let (client, transport) = client();
        transport.respond(401, r#"{"message": "Token expired"}"#);

        let _bad = client.on_unauthorized(|_| panic!("subscriber failure"));
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let _good = client.on_unauthorized(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let err = client.get("/auth/me").await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(err.message(), "Token expired");
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_query_values_are_encoded() {
        let (client, transport) = client();

        let options = RequestOptions::new(Method::Get)
            .query("status", "pending&role=admin")
            .query("q", "a b");
        client.request("/api/admin/checkclock", options).await.unwrap();

        assert_eq!(
            transport.last_request().url,
            "http://api.test/api/admin/checkclock?status=pending%26role%3Dadmin&q=a+b"
        );
    }

    #[test]
    fn test_path_segment_escapes_separators() {
        assert_eq!(path_segment("E-7"), "E-7");
        assert_eq!(path_segment("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(path_segment("x y+z"), "x%20y%2Bz");
    }

    #[tokio::test]
    async fn test_other_errors_do_not_notify() {
        let (client, transport) = client();
        transport.respond(403, "{}");

        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let _sub = client.on_unauthorized(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(client.get("/api/admin/checkclock").await.is_err());
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Location {
        id: u32,
        name: String,
    }

    #[tokio::test]
    async fn test_typed_helpers() {
        let (client, transport) = client();
        transport.respond(200, r#"{ "id": 1, "name": "HQ" }"#);
        transport.respond(200, r#"{ "unexpected": true }"#);

        let location: Location = client.get_json("/api/locations/1").await.unwrap();
        assert_eq!(location, Location { id: 1, name: "HQ".into() });

        let err = client
            .send_json::<_, Location>(Method::Put, "/api/locations/1", &json!({ "name": "HQ" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Serialization { .. }));
    }

    #[test]
    fn test_parse_body_tolerates_garbage() {
        assert_eq!(parse_body("<html>oops</html>"), Value::Null);
        assert_eq!(parse_body("  "), Value::Null);
        assert_eq!(parse_body("[1]"), json!([1]));
    }
}
