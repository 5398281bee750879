//! reqwest-backed [`HttpTransport`].

use async_trait::async_trait;
use hris_core::http::{
    HttpRequest, HttpResponse, HttpTransport, Method, MultipartForm, MultipartPart, RequestBody,
    TransportError,
};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends requests with a shared reqwest [`Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn to_reqwest_form(form: MultipartForm) -> Result<Form, TransportError> {
    let mut out = Form::new();
    for part in form.parts().iter().cloned() {
        out = match part {
            MultipartPart::Text { name, value } => out.text(name, value),
            MultipartPart::File {
                name,
                file_name,
                mime_type,
                bytes,
            } => {
                let mut file_part = Part::bytes(bytes).file_name(file_name);
                if let Some(mime) = mime_type {
                    file_part = file_part.mime_str(&mime).map_err(|e| {
                        TransportError::new(format!("Invalid MIME type '{}': {}", mime, e))
                    })?;
                }
                out.part(name, file_part)
            }
        };
    }
    Ok(out)
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url)
            .timeout(self.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            Some(RequestBody::Json(value)) => builder.body(value.to_string()),
            // reqwest sets multipart/form-data with its own boundary.
            Some(RequestBody::Multipart(form)) => builder.multipart(to_reqwest_form(form)?),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::new(format!("Failed to reach server: {}", e)))?;

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(status, "Failed to read response body: {}", e);
                String::new()
            }
        };

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_reqwest_method(Method::Patch), reqwest::Method::PATCH);
        assert_eq!(to_reqwest_method(Method::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn test_invalid_mime_is_rejected() {
        let form = MultipartForm::new().file("avatar", "a.png", Some("not a mime".into()), vec![0]);
        assert!(to_reqwest_form(form).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let transport = ReqwestTransport::new().with_timeout(Duration::from_secs(2));
        let request = HttpRequest {
            method: Method::Get,
            // Port 9 (discard) on localhost is normally closed.
            url: "http://127.0.0.1:9/unreachable".to_string(),
            headers: Vec::new(),
            body: None,
        };
        assert!(transport.send(request).await.is_err());
    }
}
