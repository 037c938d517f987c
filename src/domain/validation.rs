use std::collections::BTreeMap;
use std::fmt;

use crate::domain::mt::{MtField, MtVariant, OutboundMessage};
use crate::domain::value::CarrierId;

pub const BLANK_MESSAGE: &str = "cannot be blank";
pub const UUID_MESSAGE: &str = "must be a 36 character UUID";

const UUID_LEN: usize = 36;

/// Fields every outbound message must carry.
pub const STANDARD_REQUIRED_FIELDS: [MtField; 5] = [
    MtField::ClientMessageId,
    MtField::Source,
    MtField::Destination,
    MtField::CarrierId,
    MtField::Content,
];

/// Fields a premium message requires on top of [`STANDARD_REQUIRED_FIELDS`].
pub const PREMIUM_REQUIRED_FIELDS: [MtField; 4] = [
    MtField::ProductCode,
    MtField::InitialOptInReceiptMessageId,
    MtField::SecondaryOptInReceiptMessageId,
    MtField::Description,
];

/// Premium fields that must hold an opt-in receipt UUID.
pub const PREMIUM_UUID_FIELDS: [MtField; 2] = [
    MtField::InitialOptInReceiptMessageId,
    MtField::SecondaryOptInReceiptMessageId,
];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised while building a value; the value is never produced.
pub enum ConstructionError {
    Empty { field: &'static str },
    UnknownCarrier { value: String },
    UnknownField { name: String },
    InvalidHost { value: String },
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::UnknownCarrier { value } => {
                let known = CarrierId::ALL
                    .iter()
                    .map(|carrier| carrier.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Carrier ID {value:?} is not one of {known}")
            }
            Self::UnknownField { name } => write!(f, "unknown field: {name}"),
            Self::InvalidHost { value } => {
                write!(f, "invalid host: {value} (expected a bare host name)")
            }
        }
    }
}

impl std::error::Error for ConstructionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Stringified, trimmed value must be non-empty.
    NotBlank,
    /// Stringified, trimmed value must be exactly 36 characters.
    Uuid,
}

impl Check {
    pub fn message(self) -> &'static str {
        match self {
            Self::NotBlank => BLANK_MESSAGE,
            Self::Uuid => UUID_MESSAGE,
        }
    }

    fn passes(self, value: Option<&str>) -> bool {
        let trimmed = value.unwrap_or_default().trim();
        match self {
            Self::NotBlank => !trimmed.is_empty(),
            Self::Uuid => trimmed.chars().count() == UUID_LEN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: MtField,
    pub check: Check,
}

impl MtVariant {
    /// Required fields for this variant: the standard set, then the premium additions.
    pub fn required_fields(self) -> Vec<MtField> {
        let mut fields = STANDARD_REQUIRED_FIELDS.to_vec();
        if self == Self::Premium {
            fields.extend(PREMIUM_REQUIRED_FIELDS);
        }
        fields
    }

    /// Ordered rules applied by [`validate`]. Later rules replace earlier findings
    /// for the same field.
    pub fn rules(self) -> Vec<FieldRule> {
        let mut rules = self
            .required_fields()
            .into_iter()
            .map(|field| FieldRule {
                field,
                check: Check::NotBlank,
            })
            .collect::<Vec<_>>();
        if self == Self::Premium {
            rules.extend(PREMIUM_UUID_FIELDS.map(|field| FieldRule {
                field,
                check: Check::Uuid,
            }));
        }
        rules
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Field → human-readable problems. Empty means the message is valid.
pub struct ValidationErrors(BTreeMap<MtField, Vec<String>>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: MtField) -> Option<&[String]> {
        self.0.get(&field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = MtField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MtField, &[String])> + '_ {
        self.0.iter().map(|(field, messages)| (*field, messages.as_slice()))
    }

    fn record(&mut self, field: MtField, message: &str) {
        self.0.insert(field, vec![message.to_owned()]);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field} {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Run the variant's rules over `message`. Pure: nothing is stored on the message.
pub fn validate<M: OutboundMessage + ?Sized>(message: &M) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for rule in message.variant().rules() {
        if !rule.check.passes(message.field(rule.field)) {
            errors.record(rule.field, rule.check.message());
        }
    }
    errors
}
