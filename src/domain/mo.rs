use std::fmt;
use std::str::FromStr;

use crate::domain::validation::ConstructionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Named fields of an inbound (mobile-originated) message.
pub enum MoField {
    AggregatorMessageId,
    Source,
    Destination,
    Content,
    CarrierId,
}

impl MoField {
    pub const ALL: [MoField; 5] = [
        Self::AggregatorMessageId,
        Self::Source,
        Self::Destination,
        Self::Content,
        Self::CarrierId,
    ];

    /// Snake-case name (`aggregator_message_id`).
    pub fn name(self) -> &'static str {
        match self {
            Self::AggregatorMessageId => "aggregator_message_id",
            Self::Source => "source",
            Self::Destination => "destination",
            Self::Content => "content",
            Self::CarrierId => "carrier_id",
        }
    }

    /// Element name in the aggregator's XML (`aggregatorMessageId`).
    pub fn xml_name(self) -> &'static str {
        match self {
            Self::AggregatorMessageId => "aggregatorMessageId",
            Self::Source => "source",
            Self::Destination => "destination",
            Self::Content => "content",
            Self::CarrierId => "carrierId",
        }
    }
}

impl fmt::Display for MoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MoField {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| ConstructionError::UnknownField { name: s.to_owned() })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Mobile-originated SMS received from a handset via the aggregator.
///
/// Immutable once built: values are held as boxed strings and only handed out as `&str`.
pub struct Mo {
    aggregator_message_id: Option<Box<str>>,
    source: Option<Box<str>>,
    destination: Option<Box<str>>,
    content: Option<Box<str>>,
    carrier_id: Option<Box<str>>,
}

impl Mo {
    /// Build from typed field keys. Fields not mentioned stay unset.
    pub fn new<I, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (MoField, V)>,
        V: Into<String>,
    {
        let mut mo = Self::default();
        for (field, value) in fields {
            let value = Some(value.into().into_boxed_str());
            match field {
                MoField::AggregatorMessageId => mo.aggregator_message_id = value,
                MoField::Source => mo.source = value,
                MoField::Destination => mo.destination = value,
                MoField::Content => mo.content = value,
                MoField::CarrierId => mo.carrier_id = value,
            }
        }
        mo
    }

    /// Build from textual field names. Any name outside [`MoField::ALL`] is rejected.
    pub fn from_named_fields<I, K, V>(fields: I) -> Result<Self, ConstructionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let typed = fields
            .into_iter()
            .map(|(name, value)| Ok((name.as_ref().parse::<MoField>()?, value)))
            .collect::<Result<Vec<_>, ConstructionError>>()?;
        Ok(Self::new(typed))
    }

    pub fn aggregator_message_id(&self) -> Option<&str> {
        self.aggregator_message_id.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn carrier_id(&self) -> Option<&str> {
        self.carrier_id.as_deref()
    }

    pub fn get(&self, field: MoField) -> Option<&str> {
        match field {
            MoField::AggregatorMessageId => self.aggregator_message_id(),
            MoField::Source => self.source(),
            MoField::Destination => self.destination(),
            MoField::Content => self.content(),
            MoField::CarrierId => self.carrier_id(),
        }
    }

    /// All five fields in [`MoField::ALL`] order.
    pub fn attributes(&self) -> Vec<(MoField, Option<&str>)> {
        MoField::ALL
            .into_iter()
            .map(|field| (field, self.get(field)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> [(MoField, &'static str); 5] {
        [
            (
                MoField::AggregatorMessageId,
                "19nzlu15q652u8p9wh6ajbpnjv7zdwg37yp5",
            ),
            (MoField::Source, "12223334444"),
            (MoField::Destination, "11200"),
            (MoField::CarrierId, "Att"),
            (MoField::Content, "FRED"),
        ]
    }

    #[test]
    fn new_sets_each_field() {
        let mo = Mo::new(values());
        for (field, value) in values() {
            assert_eq!(mo.get(field), Some(value), "{field}");
        }
    }

    #[test]
    fn attributes_follow_fixed_order() {
        let mo = Mo::new(values());
        assert_eq!(
            mo.attributes(),
            vec![
                (
                    MoField::AggregatorMessageId,
                    Some("19nzlu15q652u8p9wh6ajbpnjv7zdwg37yp5")
                ),
                (MoField::Source, Some("12223334444")),
                (MoField::Destination, Some("11200")),
                (MoField::Content, Some("FRED")),
                (MoField::CarrierId, Some("Att")),
            ]
        );
    }

    #[test]
    fn from_named_fields_rejects_unknown_names() {
        let err = Mo::from_named_fields([("source", "1"), ("aggregatorMessageId", "x")])
            .unwrap_err();
        assert_eq!(
            err,
            ConstructionError::UnknownField {
                name: "aggregatorMessageId".to_owned()
            }
        );
    }

    #[test]
    fn from_named_fields_leaves_missing_fields_unset() {
        let mo = Mo::from_named_fields([("content", "FRED")]).unwrap();
        assert_eq!(mo.content(), Some("FRED"));
        assert_eq!(mo.source(), None);
    }

    #[test]
    fn xml_names_are_camel_case() {
        assert_eq!(MoField::AggregatorMessageId.xml_name(), "aggregatorMessageId");
        assert_eq!(MoField::CarrierId.xml_name(), "carrierId");
    }
}
