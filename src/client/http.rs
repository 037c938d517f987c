use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::client::config::{Config, Credentials};
use crate::transport::MT_CONTENT_TYPE;

pub type BoxError = Box<dyn StdError + Send + Sync>;
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raw aggregator response, kept on errors so callers can inspect status and body.
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// One HTTPS POST per call.
///
/// Implementations own host, credentials and TLS settings; `path` is relative to the
/// aggregator root (`/sms_messages`). Any failure to obtain a response is an `Err`.
pub trait HttpTransport: Send + Sync {
    fn post<'a>(
        &'a self,
        path: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
pub(crate) struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl ReqwestTransport {
    pub(crate) fn new(
        config: Config,
        timeout: Option<Duration>,
        user_agent: Option<String>,
    ) -> Result<Self, BoxError> {
        let base_url = Url::parse(&format!("https://{}", config.host.as_str()))?;

        let mut builder = reqwest::Client::builder().https_only(true);
        for pem in &config.trust_anchors {
            builder = builder.add_root_certificate(reqwest::Certificate::from_pem(pem)?);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            credentials: config.credentials,
        })
    }

    fn request(&self, path: &str, body: String) -> Result<reqwest::Request, BoxError> {
        let url = self.base_url.join(path)?;
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, MT_CONTENT_TYPE)
            .basic_auth(
                self.credentials.username.as_str(),
                Some(self.credentials.password.as_str()),
            )
            .body(body)
            .build()?;
        Ok(request)
    }
}

impl HttpTransport for ReqwestTransport {
    fn post<'a>(
        &'a self,
        path: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let request = self.request(path, body)?;
            let response = self.client.execute(request).await?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    let value = value.to_str().ok()?;
                    Some((name.as_str().to_owned(), value.to_owned()))
                })
                .collect();
            let body = response.text().await?;
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::AUTHORIZATION;

    use crate::domain::Host;

    use super::*;

    fn transport(host: &str, username: &str, password: &str) -> ReqwestTransport {
        let config = Config::new(
            Host::new(host).unwrap(),
            Credentials::new(username, password).unwrap(),
        );
        ReqwestTransport::new(config, None, None).unwrap()
    }

    #[test]
    fn request_targets_configured_host_over_https() {
        let request = transport("somehost.com", "jack", "password")
            .request("/sms_messages", "<xml/>".to_owned())
            .unwrap();
        assert_eq!(request.method(), &reqwest::Method::POST);
        assert_eq!(request.url().as_str(), "https://somehost.com/sms_messages");
    }

    #[test]
    fn request_carries_basic_auth() {
        let request = transport("somehost.com", "tom", "ground control")
            .request("/sms_messages", "<xml/>".to_owned())
            .unwrap();
        let auth = request.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Basic dG9tOmdyb3VuZCBjb250cm9s");
    }

    #[test]
    fn request_carries_mt_content_type_and_body() {
        let request = transport("somehost.com", "jack", "password")
            .request("/premium_sms_messages", "<xml/>".to_owned())
            .unwrap();
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/mobile_terminated_sms_message_v1+xml"
        );
        assert_eq!(request.url().path(), "/premium_sms_messages");
        assert_eq!(
            request.body().and_then(|body| body.as_bytes()),
            Some("<xml/>".as_bytes())
        );
    }

    #[test]
    fn response_header_lookup_ignores_case() {
        let response = HttpResponse {
            status: 201,
            headers: vec![("content-type".to_owned(), "text/xml".to_owned())],
            body: String::new(),
        };
        assert_eq!(response.header("Content-Type"), Some("text/xml"));
        assert_eq!(response.header("Location"), None);
    }
}
