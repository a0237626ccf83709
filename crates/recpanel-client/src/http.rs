use std::time::Duration;

use recpanel_core::ApiRequest;

use crate::transport::{RawResponse, Transport};
use crate::{ClientError, Result};

#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "recpanel".to_string(),
        }
    }
}

#[cfg(feature = "http")]
mod imp {
    use super::{ApiRequest, ClientError, RawResponse, Result, Transport, TransportOptions};
    use recpanel_core::HttpMethod;
    use reqwest::blocking::Client;
    use reqwest::header::ACCEPT;
    use reqwest::Method;
    use std::time::Duration;
    use url::Url;

    /// Blocking `reqwest` transport rooted at the service base URL.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: Client,
        base_url: Url,
    }

    impl HttpTransport {
        pub fn new(base_url: &str, options: TransportOptions) -> Result<Self> {
            let base_url = Url::parse(base_url.trim())?;
            if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
                return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
            }
            let client = Client::builder()
                .user_agent(options.user_agent)
                .timeout(options.timeout)
                .connect_timeout(options.timeout.min(Duration::from_secs(10)))
                .build()?;
            Ok(Self { client, base_url })
        }

        pub fn base_url(&self) -> &Url {
            &self.base_url
        }

        /// Full URL for a request; segments are percent-encoded by `url`.
        pub fn url_for(&self, request: &ApiRequest) -> Result<Url> {
            let mut url = self.base_url.clone();
            {
                let mut segments = url
                    .path_segments_mut()
                    .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?;
                segments.pop_if_empty();
                segments.extend(&request.segments);
            }
            url.set_query(request.query.as_deref());
            Ok(url)
        }
    }

    impl Transport for HttpTransport {
        fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
            let url = self.url_for(request)?;
            let mut builder = self
                .client
                .request(method(request.method), url)
                .header(ACCEPT, "application/json");
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
            let response = builder.send()?;
            let status = response.status().as_u16();
            let body = response.text()?;
            Ok(RawResponse { status, body })
        }
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

}

#[cfg(not(feature = "http"))]
mod imp {
    use super::{ApiRequest, ClientError, RawResponse, Result, Transport, TransportOptions};

    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        base_url: String,
    }

    impl HttpTransport {
        pub fn new(base_url: &str, options: TransportOptions) -> Result<Self> {
            let _ = options;
            Ok(Self {
                base_url: base_url.to_string(),
            })
        }
    }

    impl Transport for HttpTransport {
        fn send(&self, _request: &ApiRequest) -> Result<RawResponse> {
            let _ = &self.base_url;
            Err(ClientError::Unavailable(
                "HTTP transport requires the http feature".to_string(),
            ))
        }
    }
}

pub use imp::HttpTransport;
