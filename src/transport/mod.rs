//! Transport layer: wire-format details (XML rendering and parsing).

mod mo_xml;
mod mt_xml;
mod reader;

pub use mo_xml::decode_mo_xml;
pub use mt_xml::{
    MT_CONTENT_TYPE, decode_mt_created_xml, decode_mt_rejected_xml, encode_mt_xml,
    encode_mt_xml_at,
};

#[derive(Debug, thiserror::Error)]
/// The aggregator's XML could not be read.
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("unexpected XML structure: {0}")]
    Shape(#[from] quick_xml::DeError),

    #[error("expected root element <{expected}>, found <{actual}>")]
    UnexpectedRoot {
        expected: &'static str,
        actual: String,
    },

    #[error("document has no root element")]
    MissingRoot,

    #[error("missing <{name}> element")]
    MissingElement { name: &'static str },

    #[error("element <{name}> is never closed")]
    Unclosed { name: String },
}
