//! Hooks through which a protocol layer interprets what the BER
//! engine cannot know on its own: the record syntaxes behind an
//! EXTERNAL and the display text of semantically tagged values.
use z3950_grammar::{values::object_identifier_name, Semantic, ToplevelDeclaration};

use crate::{
    context::DecodeContext,
    value::{Node, ObjectIdentifier, Value},
};

pub trait Profile {
    /// The type of a `single-ASN1-type` EXTERNAL with this direct reference.
    fn record_syntax(&self, _direct_reference: &ObjectIdentifier) -> Option<&'static ToplevelDeclaration> {
        None
    }

    /// Interprets the content of an `octet-aligned` EXTERNAL.
    /// `offset` is the absolute offset of `content` in the message.
    fn octet_aligned(
        &self,
        _direct_reference: Option<&ObjectIdentifier>,
        _content: &[u8],
        _offset: usize,
    ) -> Option<Vec<Node>> {
        None
    }

    /// Display text for a decoded primitive.
    fn describe(&self, semantic: Semantic, value: &Value, _context: &DecodeContext) -> Option<String> {
        match (semantic, value) {
            (_, Value::ObjectIdentifier(oid)) => object_identifier_name(oid.arcs()).map(String::from),
            _ => None,
        }
    }
}

/// Names registered object identifiers and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Profile for Plain {}
