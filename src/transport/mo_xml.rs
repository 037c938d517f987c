use crate::domain::{Mo, MoField};
use crate::transport::XmlError;
use crate::transport::reader::read_document;

const MO_ROOT: &str = "mobileOriginatedSmsMessage";

/// Parse a `<mobileOriginatedSmsMessage>` document. Every field element must be present.
///
/// Element text is taken as written, including surrounding whitespace.
pub fn decode_mo_xml(xml: &str) -> Result<Mo, XmlError> {
    let document = read_document(xml.trim())?;
    if document.root != MO_ROOT {
        return Err(XmlError::UnexpectedRoot {
            expected: MO_ROOT,
            actual: document.root,
        });
    }

    let mut fields = Vec::with_capacity(MoField::ALL.len());
    for field in MoField::ALL {
        let name = field.xml_name();
        let text = document
            .text(&[name])
            .ok_or(XmlError::MissingElement { name })?;
        fields.push((field, text.to_owned()));
    }
    Ok(Mo::new(fields))
}

impl Mo {
    /// Parse an inbound `<mobileOriginatedSmsMessage>` document.
    pub fn from_xml(xml: &str) -> Result<Self, XmlError> {
        decode_mo_xml(xml)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{Mt, MtParams, OutboundMessage};
    use crate::transport::encode_mt_xml;

    use super::*;

    const MO: &str = r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <mobileOriginatedSmsMessage>
          <aggregatorMessageId>19nzlu15q652u8p9wh6ajbpnjv7zdwg37yp5</aggregatorMessageId>
          <source>12223334444</source>
          <destination>11200</destination>
          <carrierId>Att</carrierId>
          <content>FRED</content>
        </mobileOriginatedSmsMessage>
    "#;

    #[test]
    fn decode_sets_every_field() {
        let mo = decode_mo_xml(MO).unwrap();
        assert_eq!(
            mo.aggregator_message_id(),
            Some("19nzlu15q652u8p9wh6ajbpnjv7zdwg37yp5")
        );
        assert_eq!(mo.source(), Some("12223334444"));
        assert_eq!(mo.destination(), Some("11200"));
        assert_eq!(mo.carrier_id(), Some("Att"));
        assert_eq!(mo.content(), Some("FRED"));
    }

    #[test]
    fn decode_unescapes_content() {
        let xml = MO.replace("<content>FRED</content>", "<content>a &lt;b&gt; &amp; c</content>");
        let mo = decode_mo_xml(&xml).unwrap();
        assert_eq!(mo.content(), Some("a <b> & c"));
    }

    #[test]
    fn decode_fails_when_an_element_is_missing() {
        let xml = MO.replace("<carrierId>Att</carrierId>", "");
        assert!(matches!(
            decode_mo_xml(&xml),
            Err(XmlError::MissingElement { name: "carrierId" })
        ));
    }

    #[test]
    fn decode_requires_mo_root() {
        let xml = MO.replace("mobileOriginatedSmsMessage", "mobileTerminatedSmsMessage");
        assert!(matches!(
            decode_mo_xml(&xml),
            Err(XmlError::UnexpectedRoot { actual, .. }) if actual == "mobileTerminatedSmsMessage"
        ));
    }

    #[test]
    fn decode_recovers_fields_of_a_rendered_message() {
        let mut mt = Mt::new(MtParams {
            client_message_id: "19nzlu15q652u8p9wh6ajbpnjv7zdwg37yp5".into(),
            source: Some("12223334444".to_owned()),
            destination: Some("11200".to_owned()),
            carrier_id: Some("Att".to_owned()),
            content: Some("FRED & <friends>".to_owned()),
        })
        .unwrap();
        assert!(mt.is_valid());

        let xml = encode_mt_xml(&mt)
            .replace("mobileTerminatedSmsMessage", MO_ROOT)
            .replace("clientMessageId", "aggregatorMessageId");
        let mo = Mo::from_xml(&xml).unwrap();

        assert_eq!(mo.aggregator_message_id(), mt.client_message_id());
        assert_eq!(mo.source(), mt.source());
        assert_eq!(mo.destination(), mt.destination());
        assert_eq!(mo.carrier_id(), mt.carrier_id().map(|carrier| carrier.as_str()));
        assert_eq!(mo.content(), mt.content());
    }

    #[test]
    fn decode_keeps_whitespace_of_a_rendered_message() {
        let mut mt = Mt::new(MtParams {
            client_message_id: "19nzlu15q652u8p9wh6ajbpnjv7zdwg37yp5".into(),
            source: Some("12223334444".to_owned()),
            destination: Some("11200".to_owned()),
            carrier_id: Some("Att".to_owned()),
            content: Some("  hello world  ".to_owned()),
        })
        .unwrap();
        assert!(mt.is_valid());

        let xml = encode_mt_xml(&mt)
            .replace("mobileTerminatedSmsMessage", MO_ROOT)
            .replace("clientMessageId", "aggregatorMessageId");
        let mo = Mo::from_xml(&xml).unwrap();

        assert_eq!(mo.content(), Some("  hello world  "));
    }

    #[test]
    fn decode_reads_cdata_content() {
        let xml = MO.replace("<content>FRED</content>", "<content><![CDATA[ <FRED> ]]></content>");
        let mo = decode_mo_xml(&xml).unwrap();
        assert_eq!(mo.content(), Some(" <FRED> "));
    }

    #[test]
    fn decode_rejects_empty_document() {
        assert!(matches!(decode_mo_xml("   "), Err(XmlError::MissingRoot)));
    }
}
