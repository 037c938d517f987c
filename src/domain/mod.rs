//! Domain layer: strong types with validation and invariants (no I/O).

mod mo;
mod mt;
mod validation;
mod value;

pub use mo::{Mo, MoField};
pub use mt::{Mt, MtField, MtParams, MtVariant, OutboundMessage, PremiumMt, PremiumMtParams};
pub use validation::{
    BLANK_MESSAGE, Check, ConstructionError, FieldRule, PREMIUM_REQUIRED_FIELDS,
    PREMIUM_UUID_FIELDS, STANDARD_REQUIRED_FIELDS, UUID_MESSAGE, ValidationErrors, validate,
};
pub use value::{CarrierId, ClientMessageId, Host, Password, Username};
