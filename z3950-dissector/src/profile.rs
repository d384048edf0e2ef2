//! Z39.50 interpretation of EXTERNAL content and semantic values.
use z3950_grammar::{
    records::{EXPLAIN_RECORD, GENERIC_RECORD, SUTRS_RECORD},
    types::distinguished_name,
    values::{
        bib_1_attribute_values, BIB_1, BIB_1_ATTRIBUTE_TYPES, DIAG_1, DIAG_1_CONDITIONS, EXPLAIN,
        GRS_1, SUTRS, USMARC,
    },
    Semantic, ToplevelDeclaration,
};
use z3950_transcoder::{
    context::DecodeContext,
    profile::{Plain, Profile},
    value::{Node, ObjectIdentifier, Value},
};

use crate::marc::record_node;

/// Resolves the record syntaxes of Z39.50 and names bib-1 attributes
/// and diag-1 conditions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Z3950Profile;

/// Whether `set` selects bib-1. A scope without an attribute set
/// uses the bib-1 default.
fn is_bib_1(set: Option<&ObjectIdentifier>) -> bool {
    set.map_or(true, |oid| oid.arcs() == BIB_1)
}

/// Renders opaque octets as text if all of them are printable ASCII.
pub fn printable(bytes: &[u8]) -> Option<String> {
    (!bytes.is_empty() && bytes.iter().all(|b| (0x20..0x7F).contains(b)))
        .then(|| String::from_utf8_lossy(bytes).into_owned())
}

impl Profile for Z3950Profile {
    fn record_syntax(&self, direct_reference: &ObjectIdentifier) -> Option<&'static ToplevelDeclaration> {
        match direct_reference.arcs() {
            arcs if arcs == GRS_1 => Some(&GENERIC_RECORD),
            arcs if arcs == EXPLAIN => Some(&EXPLAIN_RECORD),
            arcs if arcs == SUTRS => Some(&SUTRS_RECORD),
            _ => None,
        }
    }

    fn octet_aligned(
        &self,
        direct_reference: Option<&ObjectIdentifier>,
        content: &[u8],
        offset: usize,
    ) -> Option<Vec<Node>> {
        if direct_reference?.arcs() != USMARC {
            return None;
        }
        match marc21::decode_records(content, offset) {
            Ok(records) => Some(records.iter().map(record_node).collect()),
            Err(e) => {
                log::debug!("keeping MARC21 EXTERNAL as octets: {e}");
                None
            }
        }
    }

    fn describe(&self, semantic: Semantic, value: &Value, context: &DecodeContext) -> Option<String> {
        let name = match (semantic, value) {
            (Semantic::AttributeType, Value::Integer(t)) if is_bib_1(context.attribute_set()) => {
                distinguished_name(BIB_1_ATTRIBUTE_TYPES, *t)
            }
            (Semantic::AttributeValue, Value::Integer(v)) if is_bib_1(context.attribute_set()) => {
                context
                    .attribute_type()
                    .and_then(bib_1_attribute_values)
                    .and_then(|values| distinguished_name(values, *v))
            }
            (Semantic::DiagnosticCondition, Value::Integer(c))
                if context.diagnostic_set().map_or(true, |oid| oid.arcs() == DIAG_1) =>
            {
                distinguished_name(DIAG_1_CONDITIONS, *c)
            }
            (Semantic::ReferenceId | Semantic::PrintableOctets, Value::OctetString(bytes)) => {
                return printable(bytes)
            }
            _ => return Plain.describe(semantic, value, context),
        };
        name.map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_printable_octets() {
        assert_eq!(printable(b"dog"), Some("dog".into()));
        assert_eq!(printable(b"a\x01"), None);
        assert_eq!(printable(b""), None);
    }

    #[test]
    fn resolves_record_syntaxes() {
        let grs = ObjectIdentifier::from(GRS_1);
        assert_eq!(Z3950Profile.record_syntax(&grs).map(|d| d.name), Some("GenericRecord"));
        let marc = ObjectIdentifier::from(USMARC);
        assert!(Z3950Profile.record_syntax(&marc).is_none());
    }
}
