//! Client layer: runs the send pipeline and classifies aggregator responses.

mod config;
mod http;

use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::domain::{ConstructionError, OutboundMessage, ValidationErrors};
use crate::transport::{decode_mt_created_xml, decode_mt_rejected_xml, encode_mt_xml};

pub use config::{
    CA_FILE_ENV, Config, ConfigError, Credentials, HOST_ENV, PASSWORD_ENV, USERNAME_ENV,
};
pub use http::{BoxError, BoxFuture, HttpResponse, HttpTransport};

use http::ReqwestTransport;

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`EelClient`].
///
/// Every variant that follows a response keeps the raw [`HttpResponse`] so callers can
/// inspect status and body. None of them are retried.
pub enum EelError {
    /// No response was obtained (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Non-2xx status other than `400 Bad Request`.
    #[error("unexpected HTTP status: {}", .response.status)]
    HttpStatus { response: HttpResponse },

    /// `400 Bad Request` with the aggregator's `code → message` findings in document order.
    #[error("aggregator rejected message {aggregator_message_id}: {errors:?}")]
    InvalidResource {
        aggregator_message_id: String,
        errors: IndexMap<String, String>,
        response: HttpResponse,
    },

    /// 2xx status other than `201 Created`.
    #[error("unexpected response code: {}", .response.status)]
    UnexpectedResponse { response: HttpResponse },

    /// A `201`/`400` body could not be read.
    #[error("parse error: {source}")]
    Parse {
        #[source]
        source: BoxError,
        response: HttpResponse,
    },

    /// The message failed local validation; nothing was sent.
    #[error("cannot send an invalid message: {errors}")]
    InvalidMt { errors: ValidationErrors },

    /// The message was not sent for a reason other than validation.
    ///
    /// `send` only reports "not sent" for invalid messages, which `send_strict` checks
    /// first, so this is kept for callers matching on `send_strict`'s full error set.
    #[error("sms message failed to send")]
    SendFailed,

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("construction error: {0}")]
    Construction(#[from] ConstructionError),
}

impl EelError {
    /// Raw response behind this error, if one was received.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::HttpStatus { response }
            | Self::InvalidResource { response, .. }
            | Self::UnexpectedResponse { response }
            | Self::Parse { response, .. } => Some(response),
            _ => None,
        }
    }
}

#[derive(Debug)]
/// Terminal state of one [`EelClient::submit`] call.
pub enum SubmissionOutcome {
    /// Local validation failed; no request was made.
    Invalid(ValidationErrors),
    /// `201 Created`.
    Accepted { aggregator_message_id: String },
    /// `400 Bad Request` with structured findings.
    Rejected {
        aggregator_message_id: String,
        errors: IndexMap<String, String>,
        response: HttpResponse,
    },
    /// Transport failure, non-2xx status, or an unreadable body.
    Fatal(EelError),
    /// 2xx other than `201`.
    UnexpectedSuccess(HttpResponse),
}

impl SubmissionOutcome {
    /// `Ok(true)` when accepted, `Ok(false)` when invalid, `Err` for everything else.
    pub fn into_result(self) -> Result<bool, EelError> {
        match self {
            Self::Invalid(_) => Ok(false),
            Self::Accepted { .. } => Ok(true),
            Self::Rejected {
                aggregator_message_id,
                errors,
                response,
            } => Err(EelError::InvalidResource {
                aggregator_message_id,
                errors,
                response,
            }),
            Self::Fatal(err) => Err(err),
            Self::UnexpectedSuccess(response) => Err(EelError::UnexpectedResponse { response }),
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`EelClient`].
///
/// Use this when you need a timeout or a custom user-agent.
pub struct EelClientBuilder {
    config: Config,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl EelClientBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            timeout: None,
            user_agent: None,
        }
    }

    /// Set an HTTP client timeout applied to the entire request. Expiry is a fatal outcome.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`EelClient`] backed by `reqwest` over rustls.
    pub fn build(self) -> Result<EelClient, EelError> {
        let transport = ReqwestTransport::new(self.config, self.timeout, self.user_agent)
            .map_err(EelError::Transport)?;
        Ok(EelClient::with_transport(Arc::new(transport)))
    }
}

#[derive(Clone)]
/// Submits mobile-terminated messages to the aggregator.
///
/// Each call validates the message, renders its XML, makes exactly one POST and
/// classifies the response:
/// - `201` → accepted, aggregator id recorded on the message,
/// - `400` → rejected; the aggregator id from the error body is recorded too,
/// - other 2xx → unexpected success,
/// - anything else → fatal.
pub struct EelClient {
    http: Arc<dyn HttpTransport>,
}

impl EelClient {
    /// Create a client with default HTTP settings.
    pub fn new(config: Config) -> Result<Self, EelError> {
        EelClientBuilder::new(config).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(config: Config) -> EelClientBuilder {
        EelClientBuilder::new(config)
    }

    /// Use a caller-supplied transport (a proxy, a recording double, ...).
    pub fn with_transport(http: Arc<dyn HttpTransport>) -> Self {
        Self { http }
    }

    /// Run the pipeline and report the terminal state. Never returns an error.
    pub async fn submit<M: OutboundMessage + ?Sized>(
        &self,
        message: &mut M,
    ) -> SubmissionOutcome {
        if !message.is_valid() {
            debug!(
                variant = ?message.variant(),
                errors = %message.errors(),
                "message failed validation"
            );
            return SubmissionOutcome::Invalid(message.errors().clone());
        }

        let path = message.variant().path();
        let body = encode_mt_xml(&*message);
        debug!(path, "posting mobile-terminated message");

        let response = match self.http.post(path, body).await {
            Ok(response) => response,
            Err(err) => {
                warn!(path, error = %err, "aggregator unreachable");
                return SubmissionOutcome::Fatal(EelError::Transport(err));
            }
        };

        classify(message, response)
    }

    /// Send `message`. `Ok(false)` means it failed local validation and nothing was sent.
    ///
    /// Errors:
    /// - [`EelError::InvalidResource`] for `400 Bad Request`,
    /// - [`EelError::UnexpectedResponse`] for 2xx other than `201`,
    /// - [`EelError::HttpStatus`], [`EelError::Transport`] or [`EelError::Parse`] otherwise.
    pub async fn send<M: OutboundMessage + ?Sized>(
        &self,
        message: &mut M,
    ) -> Result<bool, EelError> {
        self.submit(message).await.into_result()
    }

    /// Like [`EelClient::send`], but an invalid message is an [`EelError::InvalidMt`].
    pub async fn send_strict<M: OutboundMessage + ?Sized>(
        &self,
        message: &mut M,
    ) -> Result<(), EelError> {
        if !message.is_valid() {
            return Err(EelError::InvalidMt {
                errors: message.errors().clone(),
            });
        }
        if self.send(message).await? {
            Ok(())
        } else {
            Err(EelError::SendFailed)
        }
    }
}

fn classify<M: OutboundMessage + ?Sized>(
    message: &mut M,
    response: HttpResponse,
) -> SubmissionOutcome {
    match response.status {
        201 => match decode_mt_created_xml(&response.body) {
            Ok(aggregator_message_id) => {
                info!(%aggregator_message_id, "message accepted");
                message
                    .core_mut()
                    .record_aggregator_message_id(aggregator_message_id.clone());
                SubmissionOutcome::Accepted {
                    aggregator_message_id,
                }
            }
            Err(err) => SubmissionOutcome::Fatal(EelError::Parse {
                source: Box::new(err),
                response,
            }),
        },
        400 => match decode_mt_rejected_xml(&response.body) {
            Ok(rejection) => {
                warn!(
                    aggregator_message_id = %rejection.aggregator_message_id,
                    codes = ?rejection.errors.keys().collect::<Vec<_>>(),
                    "message rejected"
                );
                message
                    .core_mut()
                    .record_aggregator_message_id(rejection.aggregator_message_id.clone());
                SubmissionOutcome::Rejected {
                    aggregator_message_id: rejection.aggregator_message_id,
                    errors: rejection.errors,
                    response,
                }
            }
            Err(err) => SubmissionOutcome::Fatal(EelError::Parse {
                source: Box::new(err),
                response,
            }),
        },
        200..=299 => {
            warn!(status = response.status, "unexpected success status");
            SubmissionOutcome::UnexpectedSuccess(response)
        }
        status => {
            warn!(status, "aggregator returned an error status");
            SubmissionOutcome::Fatal(EelError::HttpStatus { response })
        }
    }
}
