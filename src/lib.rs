//! Typed Rust client for submitting SMS to an EEL aggregator over HTTPS.
//!
//! The crate has three layers: a domain layer of strong types (messages, carriers,
//! validation), a transport layer for the aggregator's XML, and a small client layer
//! that runs the send pipeline and classifies responses.
//!
//! ```rust,no_run
//! use eel_client::{Config, Credentials, EelClient, Host, Mt, MtParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), eel_client::EelError> {
//!     let config = Config::new(
//!         Host::new("mcagg-staging.net")?,
//!         Credentials::new("jack", "password")?,
//!     );
//!     let client = EelClient::new(config)?;
//!     let mut message = Mt::new(MtParams {
//!         source: Some("12345".to_owned()),
//!         destination: Some("18005882300".to_owned()),
//!         carrier_id: Some("Att".to_owned()),
//!         content: Some("this is some content".to_owned()),
//!         ..Default::default()
//!     })?;
//!     client.send_strict(&mut message).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    BoxError, BoxFuture, Config, ConfigError, Credentials, EelClient, EelClientBuilder, EelError,
    HttpResponse, HttpTransport, SubmissionOutcome,
};
pub use domain::{
    CarrierId, ClientMessageId, ConstructionError, Host, Mo, MoField, Mt, MtField, MtParams,
    MtVariant, OutboundMessage, Password, PremiumMt, PremiumMtParams, Username, ValidationErrors,
};
pub use transport::{MT_CONTENT_TYPE, XmlError, decode_mo_xml, encode_mt_xml, encode_mt_xml_at};

