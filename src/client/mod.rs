//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::domain::{ApiKey, SendSms, SentSms};

const DEFAULT_SEND_ENDPOINT: &str = "https://api.brevo.com/v3/transactionalSMS/sms";
const SUCCESS_STATUS: u16 = 201;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        api_key: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        api_key: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(reqwest::header::ACCEPT, "application/json")
                .header(ApiKey::HEADER, api_key)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`BrevoClient`].
///
/// This error preserves:
/// - HTTP-level failures (any status other than `201` or transport failures),
/// - encode/parse failures,
/// - configuration failures of the client itself.
pub enum BrevoError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Status other than `201 Created` returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus {
        status: u16,
        /// `message` field of a JSON error body.
        message: Option<String>,
        /// Raw body, `None` when blank.
        body: Option<String>,
    },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// Request body could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[source] Box<dyn StdError + Send + Sync>),

    /// Endpoint override is not a valid URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl BrevoError {
    /// Human-readable reason suitable for a per-recipient report.
    ///
    /// Prefers the provider's `message`, then the raw response text, then the
    /// description of the underlying failure including all of its causes.
    pub fn detail(&self) -> String {
        match self {
            Self::HttpStatus {
                message: Some(message),
                ..
            } => message.clone(),
            Self::HttpStatus {
                body: Some(body), ..
            } => body.clone(),
            Self::HttpStatus { status, .. } => format!("HTTP {status}"),
            Self::Transport(err) | Self::Parse(err) | Self::Encode(err) => error_chain(&**err),
            Self::InvalidEndpoint(err) => err.to_string(),
        }
    }
}

/// `err` followed by each of its sources, joined with `": "`.
///
/// reqwest keeps the cause (refused connection, DNS, timeout) out of its own
/// message, so the chain is what tells failures apart. Repeated messages are
/// collapsed.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut current = Some(err);
    while let Some(err) = current {
        let message = err.to_string();
        if parts.last() != Some(&message) {
            parts.push(message);
        }
        current = err.source();
    }
    parts.join(": ")
}

/// Sends one message to one recipient.
///
/// This is the seam the batch runner depends on; [`BrevoClient`] is the production
/// implementation.
pub trait Dispatcher: Send + Sync {
    fn dispatch<'a>(
        &'a self,
        api_key: &'a ApiKey,
        request: SendSms,
    ) -> BoxFuture<'a, Result<SentSms, BrevoError>>;
}

#[derive(Debug, Clone)]
/// Builder for [`BrevoClient`].
///
/// Use this when you need to customize the endpoint or user-agent. No request timeout
/// is set beyond the HTTP client's default.
pub struct BrevoClientBuilder {
    send_endpoint: String,
    user_agent: Option<String>,
}

impl Default for BrevoClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BrevoClientBuilder {
    /// Create a builder with the default endpoint and no user-agent override.
    pub fn new() -> Self {
        Self {
            send_endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            user_agent: None,
        }
    }

    /// Override the endpoint URL for `transactionalSMS/sms`.
    pub fn send_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.send_endpoint = endpoint.into();
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`BrevoClient`].
    pub fn build(self) -> Result<BrevoClient, BrevoError> {
        let send_endpoint = Url::parse(&self.send_endpoint)?.to_string();

        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| BrevoError::Transport(Box::new(err)))?;

        Ok(BrevoClient {
            send_endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Brevo transactional SMS client.
///
/// Each call issues exactly one `POST` to `https://api.brevo.com/v3/transactionalSMS/sms`
/// (or the configured endpoint) with header-based key authentication. There are no
/// retries.
pub struct BrevoClient {
    send_endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl BrevoClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`BrevoClient::builder`].
    pub fn new() -> Self {
        Self {
            send_endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder() -> BrevoClientBuilder {
        BrevoClientBuilder::new()
    }

    pub fn send_endpoint(&self) -> &str {
        &self.send_endpoint
    }

    /// Send one SMS through Brevo.
    ///
    /// Errors:
    /// - [`BrevoError::HttpStatus`] for any status other than `201`,
    /// - [`BrevoError::Transport`] when the request never got a response,
    /// - [`BrevoError::Parse`] when a `201` body is not valid JSON.
    pub async fn send_sms(&self, api_key: &ApiKey, request: SendSms) -> Result<SentSms, BrevoError> {
        let body = crate::transport::encode_send_sms_body(&request)
            .map_err(|err| BrevoError::Encode(Box::new(err)))?;

        debug!(recipient = request.recipient(), "posting sms");
        let response = self
            .http
            .post_json(&self.send_endpoint, api_key.as_str(), body)
            .await
            .map_err(|err| {
                warn!(recipient = request.recipient(), error = %err, "sms transport failure");
                BrevoError::Transport(err)
            })?;

        if response.status != SUCCESS_STATUS {
            let message = crate::transport::decode_error_message(&response.body);
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            warn!(
                recipient = request.recipient(),
                status = response.status,
                message = message.as_deref().unwrap_or(""),
                "sms rejected"
            );
            return Err(BrevoError::HttpStatus {
                status: response.status,
                message,
                body,
            });
        }

        crate::transport::decode_send_sms_response(&response.body)
            .map_err(|err| BrevoError::Parse(Box::new(err)))
    }
}

impl Default for BrevoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher for BrevoClient {
    fn dispatch<'a>(
        &'a self,
        api_key: &'a ApiKey,
        request: SendSms,
    ) -> BoxFuture<'a, Result<SentSms, BrevoError>> {
        Box::pin(self.send_sms(api_key, request))
    }
}
