use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use quick_xml::escape::escape;
use serde::Deserialize;

use crate::domain::{MtField, MtVariant, OutboundMessage};
use crate::transport::XmlError;
use crate::transport::reader::read_document;

pub const MT_CONTENT_TYPE: &str = "application/mobile_terminated_sms_message_v1+xml";

const DELIVERY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const AGGREGATOR_MESSAGE_ID: &str = "aggregatorMessageId";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MtCreatedXml {
    aggregator_message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Parsed body of a `400 Bad Request` from the aggregator.
pub struct MtRejection {
    pub aggregator_message_id: String,
    /// `code → message` in document order.
    pub errors: IndexMap<String, String>,
}

/// Render `message` with the current UTC time as the premium delivery timestamp.
pub fn encode_mt_xml<M: OutboundMessage + ?Sized>(message: &M) -> String {
    encode_mt_xml_at(message, Utc::now())
}

pub fn encode_mt_xml_at<M: OutboundMessage + ?Sized>(message: &M, now: DateTime<Utc>) -> String {
    let value = |field: MtField| escape(message.field(field).unwrap_or_default()).into_owned();

    let xml = match message.variant() {
        MtVariant::Standard => format!(
            r#"
<?xml version="1.0" encoding="UTF-8"?>
<mobileTerminatedSmsMessage>
  <clientMessageId>{client_message_id}</clientMessageId>
  <source>{source}</source>
  <destination>{destination}</destination>
  <carrierId>{carrier_id}</carrierId>
  <content>{content}</content>
</mobileTerminatedSmsMessage>
"#,
            client_message_id = value(MtField::ClientMessageId),
            source = value(MtField::Source),
            destination = value(MtField::Destination),
            carrier_id = value(MtField::CarrierId),
            content = value(MtField::Content),
        ),
        MtVariant::Premium => format!(
            r#"
<?xml version="1.0" encoding="UTF-8"?>
<mobileTerminatedPremiumSmsMessage>
  <clientMessageId>{client_message_id}</clientMessageId>
  <source>{source}</source>
  <destination>{destination}</destination>
  <carrierId>{carrier_id}</carrierId>
  <content>{content}</content>
  <productCode>{product_code}</productCode>
  <description>{description}</description>
  <initialOptInReceipt>
    <smsDetails>
      <messageId>{initial_opt_in}</messageId>
    </smsDetails>
  </initialOptInReceipt>
  <secondaryOptInReceipt>
    <smsDetails>
      <messageId>{secondary_opt_in}</messageId>
    </smsDetails>
  </secondaryOptInReceipt>
  <deliveryTimeStamp>{delivery_time_stamp}</deliveryTimeStamp>
</mobileTerminatedPremiumSmsMessage>
"#,
            client_message_id = value(MtField::ClientMessageId),
            source = value(MtField::Source),
            destination = value(MtField::Destination),
            carrier_id = value(MtField::CarrierId),
            content = value(MtField::Content),
            product_code = value(MtField::ProductCode),
            description = value(MtField::Description),
            initial_opt_in = value(MtField::InitialOptInReceiptMessageId),
            secondary_opt_in = value(MtField::SecondaryOptInReceiptMessageId),
            delivery_time_stamp = now.format(DELIVERY_TIMESTAMP_FORMAT),
        ),
    };

    xml.trim().to_owned()
}

/// Aggregator id from a `201 Created` body.
pub fn decode_mt_created_xml(xml: &str) -> Result<String, XmlError> {
    let parsed: MtCreatedXml = quick_xml::de::from_str(xml.trim())?;
    Ok(parsed.aggregator_message_id)
}

/// Aggregator id and `code → message` pairs from a `400 Bad Request` body.
///
/// Codes keep document order. A repeated code keeps its first position and the
/// message of its last occurrence. Messages are taken as written.
pub fn decode_mt_rejected_xml(xml: &str) -> Result<MtRejection, XmlError> {
    let document = read_document(xml.trim())?;
    let aggregator_message_id = document
        .text(&[AGGREGATOR_MESSAGE_ID])
        .ok_or(XmlError::MissingElement {
            name: AGGREGATOR_MESSAGE_ID,
        })?
        .to_owned();

    // One entry per <error> element, keyed by its position in the document.
    let mut entries: IndexMap<usize, (Option<&str>, Option<&str>)> = IndexMap::new();
    for leaf in &document.leaves {
        let [errors, error, child] = leaf.path.as_slice() else {
            continue;
        };
        if errors != "errors" || error != "error" {
            continue;
        }
        let entry = entries.entry(leaf.parent).or_default();
        match child.as_str() {
            "code" => entry.0 = Some(leaf.text.as_str()),
            "message" => entry.1 = Some(leaf.text.as_str()),
            _ => {}
        }
    }

    let mut errors = IndexMap::with_capacity(entries.len());
    for (code, message) in entries.into_values() {
        let code = code.ok_or(XmlError::MissingElement { name: "code" })?;
        let message = message.ok_or(XmlError::MissingElement { name: "message" })?;
        errors.insert(code.to_owned(), message.to_owned());
    }

    Ok(MtRejection {
        aggregator_message_id,
        errors,
    })
}
