use std::fmt;
use std::str::FromStr;

use crate::domain::validation::{ConstructionError, ValidationErrors, validate};
use crate::domain::value::{CarrierId, ClientMessageId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Named fields of an outbound (mobile-terminated) message.
pub enum MtField {
    ClientMessageId,
    Source,
    Destination,
    CarrierId,
    Content,
    ProductCode,
    Description,
    InitialOptInReceiptMessageId,
    SecondaryOptInReceiptMessageId,
}

impl MtField {
    pub const ALL: [MtField; 9] = [
        Self::ClientMessageId,
        Self::Source,
        Self::Destination,
        Self::CarrierId,
        Self::Content,
        Self::ProductCode,
        Self::Description,
        Self::InitialOptInReceiptMessageId,
        Self::SecondaryOptInReceiptMessageId,
    ];

    /// Snake-case name (`client_message_id`).
    pub fn name(self) -> &'static str {
        match self {
            Self::ClientMessageId => "client_message_id",
            Self::Source => "source",
            Self::Destination => "destination",
            Self::CarrierId => "carrier_id",
            Self::Content => "content",
            Self::ProductCode => "product_code",
            Self::Description => "description",
            Self::InitialOptInReceiptMessageId => "initial_opt_in_receipt_message_id",
            Self::SecondaryOptInReceiptMessageId => "secondary_opt_in_receipt_message_id",
        }
    }
}

impl fmt::Display for MtField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MtField {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| ConstructionError::UnknownField { name: s.to_owned() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MtVariant {
    Standard,
    Premium,
}

impl MtVariant {
    /// Aggregator path the variant is posted to.
    pub fn path(self) -> &'static str {
        match self {
            Self::Standard => "/sms_messages",
            Self::Premium => "/premium_sms_messages",
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Construction parameters for [`Mt`].
///
/// `carrier_id` is given by wire name and checked by [`Mt::new`].
pub struct MtParams {
    pub client_message_id: ClientMessageId,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub carrier_id: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default)]
/// Construction parameters for [`PremiumMt`].
pub struct PremiumMtParams {
    pub mt: MtParams,
    pub product_code: Option<String>,
    pub description: Option<String>,
    pub initial_opt_in_receipt_message_id: Option<String>,
    pub secondary_opt_in_receipt_message_id: Option<String>,
}

#[derive(Debug, Clone)]
/// Standard mobile-terminated SMS message.
///
/// Fields are freely settable; [`OutboundMessage::is_valid`] decides whether the message
/// can be sent. The only construction-time check is the carrier id.
pub struct Mt {
    client_message_id: Option<String>,
    source: Option<String>,
    destination: Option<String>,
    carrier_id: Option<CarrierId>,
    content: Option<String>,
    aggregator_message_id: Option<String>,
    errors: ValidationErrors,
}

impl Mt {
    /// Build a message. Fails if `carrier_id` is set to an unknown carrier.
    pub fn new(params: MtParams) -> Result<Self, ConstructionError> {
        let carrier_id = params
            .carrier_id
            .as_deref()
            .map(CarrierId::from_str)
            .transpose()?;
        Ok(Self {
            client_message_id: params.client_message_id.resolve(),
            source: params.source,
            destination: params.destination,
            carrier_id,
            content: params.content,
            aggregator_message_id: None,
            errors: ValidationErrors::default(),
        })
    }

    /// Build a message from `(field name, value)` pairs such as `("source", "12345")`.
    ///
    /// Premium-only names are rejected like any other unknown name.
    pub fn from_named_fields<I, K, V>(fields: I) -> Result<Self, ConstructionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = MtParams::default();
        for (name, value) in fields {
            let value: String = value.into();
            match name.as_ref().parse::<MtField>()? {
                MtField::ClientMessageId => params.client_message_id = value.into(),
                MtField::Source => params.source = Some(value),
                MtField::Destination => params.destination = Some(value),
                MtField::CarrierId => params.carrier_id = Some(value),
                MtField::Content => params.content = Some(value),
                _ => {
                    return Err(ConstructionError::UnknownField {
                        name: name.as_ref().to_owned(),
                    });
                }
            }
        }
        Self::new(params)
    }

    pub fn client_message_id(&self) -> Option<&str> {
        self.client_message_id.as_deref()
    }

    pub fn set_client_message_id(&mut self, value: Option<String>) {
        self.client_message_id = value;
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, value: Option<String>) {
        self.source = value;
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    pub fn set_destination(&mut self, value: Option<String>) {
        self.destination = value;
    }

    pub fn carrier_id(&self) -> Option<CarrierId> {
        self.carrier_id
    }

    pub fn set_carrier_id(&mut self, value: Option<CarrierId>) {
        self.carrier_id = value;
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn set_content(&mut self, value: Option<String>) {
        self.content = value;
    }

    fn standard_field(&self, field: MtField) -> Option<&str> {
        match field {
            MtField::ClientMessageId => self.client_message_id(),
            MtField::Source => self.source(),
            MtField::Destination => self.destination(),
            MtField::CarrierId => self.carrier_id.map(CarrierId::as_str),
            MtField::Content => self.content(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
/// Billed mobile-terminated message. Carries a product code and two opt-in receipts.
pub struct PremiumMt {
    mt: Mt,
    product_code: Option<String>,
    description: Option<String>,
    initial_opt_in_receipt_message_id: Option<String>,
    secondary_opt_in_receipt_message_id: Option<String>,
}

impl PremiumMt {
    /// Build a premium message. Fails if `carrier_id` is set to an unknown carrier.
    pub fn new(params: PremiumMtParams) -> Result<Self, ConstructionError> {
        Ok(Self {
            mt: Mt::new(params.mt)?,
            product_code: params.product_code,
            description: params.description,
            initial_opt_in_receipt_message_id: params.initial_opt_in_receipt_message_id,
            secondary_opt_in_receipt_message_id: params.secondary_opt_in_receipt_message_id,
        })
    }

    /// Build a premium message from `(field name, value)` pairs.
    pub fn from_named_fields<I, K, V>(fields: I) -> Result<Self, ConstructionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = PremiumMtParams::default();
        for (name, value) in fields {
            let value: String = value.into();
            match name.as_ref().parse::<MtField>()? {
                MtField::ClientMessageId => params.mt.client_message_id = value.into(),
                MtField::Source => params.mt.source = Some(value),
                MtField::Destination => params.mt.destination = Some(value),
                MtField::CarrierId => params.mt.carrier_id = Some(value),
                MtField::Content => params.mt.content = Some(value),
                MtField::ProductCode => params.product_code = Some(value),
                MtField::Description => params.description = Some(value),
                MtField::InitialOptInReceiptMessageId => {
                    params.initial_opt_in_receipt_message_id = Some(value);
                }
                MtField::SecondaryOptInReceiptMessageId => {
                    params.secondary_opt_in_receipt_message_id = Some(value);
                }
            }
        }
        Self::new(params)
    }

    /// Fields shared with standard messages.
    pub fn mt(&self) -> &Mt {
        &self.mt
    }

    /// Mutable access to the fields shared with standard messages.
    pub fn mt_mut(&mut self) -> &mut Mt {
        &mut self.mt
    }

    pub fn product_code(&self) -> Option<&str> {
        self.product_code.as_deref()
    }

    pub fn set_product_code(&mut self, value: Option<String>) {
        self.product_code = value;
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, value: Option<String>) {
        self.description = value;
    }

    pub fn initial_opt_in_receipt_message_id(&self) -> Option<&str> {
        self.initial_opt_in_receipt_message_id.as_deref()
    }

    pub fn set_initial_opt_in_receipt_message_id(&mut self, value: Option<String>) {
        self.initial_opt_in_receipt_message_id = value;
    }

    pub fn secondary_opt_in_receipt_message_id(&self) -> Option<&str> {
        self.secondary_opt_in_receipt_message_id.as_deref()
    }

    pub fn set_secondary_opt_in_receipt_message_id(&mut self, value: Option<String>) {
        self.secondary_opt_in_receipt_message_id = value;
    }
}

pub(crate) mod sealed {
    use super::Mt;

    pub trait Sealed {
        fn core(&self) -> &Mt;
        fn core_mut(&mut self) -> &mut Mt;
    }
}

/// Behaviour shared by [`Mt`] and [`PremiumMt`]: field lookup, validation state and
/// the aggregator id assigned by a send attempt.
pub trait OutboundMessage: sealed::Sealed {
    fn variant(&self) -> MtVariant;

    /// Current value of `field`, or `None` when unset or not part of this variant.
    fn field(&self, field: MtField) -> Option<&str>;

    /// Id assigned by the aggregator. Set once a send attempt got a parseable response,
    /// including a rejection.
    fn aggregator_message_id(&self) -> Option<&str> {
        self.core().aggregator_message_id.as_deref()
    }

    /// Findings of the last [`OutboundMessage::is_valid`] call.
    fn errors(&self) -> &ValidationErrors {
        &self.core().errors
    }

    /// Discard previous findings, revalidate, and report whether the message is sendable.
    fn is_valid(&mut self) -> bool {
        let errors = validate(&*self);
        let valid = errors.is_empty();
        self.core_mut().errors = errors;
        valid
    }
}

impl Mt {
    pub(crate) fn record_aggregator_message_id(&mut self, id: String) {
        self.aggregator_message_id = Some(id);
    }
}

impl sealed::Sealed for Mt {
    fn core(&self) -> &Mt {
        self
    }

    fn core_mut(&mut self) -> &mut Mt {
        self
    }
}

impl OutboundMessage for Mt {
    fn variant(&self) -> MtVariant {
        MtVariant::Standard
    }

    fn field(&self, field: MtField) -> Option<&str> {
        self.standard_field(field)
    }
}

impl sealed::Sealed for PremiumMt {
    fn core(&self) -> &Mt {
        &self.mt
    }

    fn core_mut(&mut self) -> &mut Mt {
        &mut self.mt
    }
}

impl OutboundMessage for PremiumMt {
    fn variant(&self) -> MtVariant {
        MtVariant::Premium
    }

    fn field(&self, field: MtField) -> Option<&str> {
        match field {
            MtField::ProductCode => self.product_code(),
            MtField::Description => self.description(),
            MtField::InitialOptInReceiptMessageId => self.initial_opt_in_receipt_message_id(),
            MtField::SecondaryOptInReceiptMessageId => self.secondary_opt_in_receipt_message_id(),
            _ => self.mt.standard_field(field),
        }
    }
}
