//! HTTP transport seam
//!
//! Dashboard code talks to the backend through [`HttpTransport`] so the
//! request/response flow can run outside the browser. [`GlooTransport`] is
//! the browser implementation on top of `gloo-net`.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Single file sent as a multipart form field
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartFile {
    pub field: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Multipart(MultipartFile),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn post(url: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (DNS, CORS, offline, ...)
#[derive(Debug, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Browser transport built on `gloo-net`
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTransport;

impl GlooTransport {
    fn form_data(file: &MultipartFile) -> Result<web_sys::FormData, TransportError> {
        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let blob = web_sys::Blob::new_with_u8_array_sequence(&parts)
            .map_err(|e| TransportError(format!("{e:?}")))?;
        let form_data = web_sys::FormData::new().map_err(|e| TransportError(format!("{e:?}")))?;
        form_data
            .append_with_blob_and_filename(&file.field, &blob, &file.filename)
            .map_err(|e| TransportError(format!("{e:?}")))?;
        Ok(form_data)
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        use gloo_net::http::Request;

        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = match &request.body {
            RequestBody::Empty => builder.send().await,
            RequestBody::Multipart(file) => {
                let form_data = Self::form_data(file)?;
                builder
                    .body(form_data)
                    .map_err(|e| TransportError(e.to_string()))?
                    .send()
                    .await
            }
        }
        .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        // Body read failures leave an empty body; the status still drives normalization
        let body = response.text().await.unwrap_or_default();
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_headers() {
        let request = HttpRequest::get("http://h/getfiles/")
            .header("Authorization", "Bearer t")
            .header("Accept", "application/json");
        assert_eq!(request.header_value("authorization"), Some("Bearer t"));
        assert_eq!(request.header_value("Content-Type"), None);
        assert_eq!(request.body, RequestBody::Empty);
    }

    #[test]
    fn test_response_ok_range() {
        assert!(HttpResponse { status: 204, body: String::new() }.ok());
        assert!(!HttpResponse { status: 0, body: String::new() }.ok());
        assert!(!HttpResponse { status: 401, body: String::new() }.ok());
    }
}
