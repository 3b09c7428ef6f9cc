use core::future::Future;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    StatusCode, Url,
};

/// A JSON `POST` request to the listings service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    url: Url,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl HttpRequest {
    /// Create a `POST` request carrying a JSON body.
    pub fn post_json(url: Url, body: Vec<u8>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self { url, headers, body }
    }

    /// Get the target URL.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Get the headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the headers, mutably.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Get the body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decompose the request into its parts.
    pub fn into_parts(self) -> (Url, HeaderMap, Vec<u8>) {
        (self.url, self.headers, self.body)
    }
}

/// The status and body of a listings service response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new response.
    pub const fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Get the status.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the raw body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// A transport for listings service requests.
///
/// Implementors send exactly one request per call and report the response
/// whatever its status. Only failures to obtain a response are errors.
pub trait HttpChannel {
    /// The error type returned when no response could be obtained.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Send the request and wait for the response.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send;
}

impl HttpChannel for reqwest::Client {
    type Error = reqwest::Error;

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
        let (url, headers, body) = request.into_parts();
        let response = self.post(url).headers(headers).body(body).send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse::new(status, body))
    }
}

impl<T: HttpChannel + Sync> HttpChannel for &T {
    type Error = T::Error;

    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send {
        (**self).send(request)
    }
}
