//! The `z3950-transcoder` library decodes BER encoded data elements
//! against the static type descriptors of `z3950-grammar`.
//!
//! Decoding produces a tree of [`value::Node`]s in which every node
//! keeps the byte range it was decoded from. The engine follows the
//! descriptors, so the same code handles every PDU, and recursive
//! types such as `RPNStructure` are decoded by recursing into the
//! same descriptor again. Nesting depth and tree size are bounded
//! by [`context::DecoderOptions`].
//!
//! ```rust
//! use z3950_grammar::z3950::PRESENT_STATUS;
//! use z3950_transcoder::ber::Ber;
//!
//! let node = Ber::decode(&PRESENT_STATUS, &[0x9B, 0x01, 0x05]).unwrap();
//! assert_eq!(node.as_integer(), Some(5));
//! assert_eq!(node.display.as_deref(), Some("failure"));
//! ```
pub mod ber;
pub mod context;
pub mod cursor;
pub mod error;
pub mod profile;
pub mod value;

use cursor::ByteCursor;
use error::DecodingError;
use value::{BitString, ObjectIdentifier, Value};
use z3950_grammar::CharacterStringType;

/// Decoders for the content octets of primitive encodings.
///
/// Each decoder receives a cursor at the first content octet and
/// the number of content octets, consumes exactly those octets and
/// leaves the cursor untouched if it fails.
pub trait Decoder {
    fn decode_integer(&self, cursor: &mut ByteCursor, length: usize) -> Result<i64, DecodingError>;
    fn decode_boolean(&self, cursor: &mut ByteCursor, length: usize) -> Result<bool, DecodingError>;
    fn decode_null(&self, cursor: &mut ByteCursor, length: usize) -> Result<(), DecodingError>;
    fn decode_bit_string(
        &self,
        cursor: &mut ByteCursor,
        length: usize,
    ) -> Result<BitString, DecodingError>;
    fn decode_object_identifier(
        &self,
        cursor: &mut ByteCursor,
        length: usize,
    ) -> Result<ObjectIdentifier, DecodingError>;
    fn decode_character_string(
        &self,
        string: CharacterStringType,
        cursor: &mut ByteCursor,
        length: usize,
    ) -> Result<Value, DecodingError>;
    fn decode_generalized_time(
        &self,
        cursor: &mut ByteCursor,
        length: usize,
    ) -> Result<String, DecodingError>;
}
