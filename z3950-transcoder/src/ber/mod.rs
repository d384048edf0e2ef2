//! The `ber` module decodes BER encoded data elements.
mod decoder;
mod external;
pub mod header;
mod structure;

use z3950_grammar::{Tagging, ToplevelDeclaration, UNTAGGED};

use crate::{
    context::{DecodeContext, DecoderOptions},
    cursor::ByteCursor,
    error::{DecodingError, DecodingErrorType},
    profile::{Plain, Profile},
    value::{Diagnostic, DiagnosticKind, Node},
};

/// Basic Encoding Rules
#[derive(Debug, Clone, Copy, Default)]
pub struct Ber;

impl Ber {
    /// Decodes one value of `decl` with the default options.
    pub fn decode(decl: &'static ToplevelDeclaration, input: &[u8]) -> Result<Node, DecodingError> {
        Self::decode_with(decl, input, DecoderOptions::default(), &Plain)
    }

    /// Decodes one value of `decl`, interpreting open content through `profile`.
    pub fn decode_with(
        decl: &'static ToplevelDeclaration,
        input: &[u8],
        options: DecoderOptions,
        profile: &dyn Profile,
    ) -> Result<Node, DecodingError> {
        Self::decode_component(decl.name, UNTAGGED, decl, input, options, profile)
    }

    /// Decodes `input` as the component `name [tagging] decl`.
    ///
    /// Octets behind the first complete value are reported as a
    /// `TrailingData` diagnostic on the returned node, or fail the
    /// decode if `options` do not allow trailing data.
    pub fn decode_component(
        name: &'static str,
        tagging: Tagging,
        decl: &'static ToplevelDeclaration,
        input: &[u8],
        options: DecoderOptions,
        profile: &dyn Profile,
    ) -> Result<Node, DecodingError> {
        let mut cursor = ByteCursor::new(input);
        let mut ctx = DecodeContext::new(options, profile);
        let mut node = structure::decode_component(&mut cursor, &mut ctx, name, tagging, decl)?;
        if !cursor.is_empty() {
            let offset = cursor.offset();
            if !options.allow_trailing_data {
                return Err(DecodingError::new(
                    &format!("{} octets behind {}", cursor.remaining(), decl.name),
                    DecodingErrorType::UnexpectedTrailingData,
                )
                .at(offset)
                .with_partial(node));
            }
            let span = offset..input.len();
            log::warn!("{} octets behind {} at {offset}", span.len(), decl.name);
            node.diagnostics.push(Diagnostic::warning(
                DiagnosticKind::TrailingData,
                format!("{} octets behind {}", span.len(), decl.name),
                span,
            ));
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use z3950_grammar::{
        explicit, implicit,
        types::{optional, required, AsnSequence, SequenceMember},
        z3950::{
            BOOLEAN, EXTERNAL, INTEGER, INTERNATIONAL_STRING, OPERATOR, PRESENT_STATUS, QUERY,
            REFERENCE_ID,
        },
        ASN1Type, ToplevelDeclaration, UNTAGGED,
    };

    use super::*;
    use crate::value::{Severity, Value};

    static FIELDS: [SequenceMember; 3] = [
        required("first", implicit(0), &INTEGER),
        optional("middle", implicit(1), &BOOLEAN),
        required("last", implicit(2), &INTEGER),
    ];
    static OPTIONAL_MIDDLE: ToplevelDeclaration = ToplevelDeclaration::new(
        "OptionalMiddle",
        UNTAGGED,
        ASN1Type::Sequence(AsnSequence { members: &FIELDS }),
    );
    static UNORDERED: ToplevelDeclaration =
        ToplevelDeclaration::new("Unordered", UNTAGGED, ASN1Type::Set(AsnSequence { members: &FIELDS }));

    static NESTED_FIELDS: [SequenceMember; 1] = [optional("inner", explicit(0), &NESTED)];
    static NESTED: ToplevelDeclaration = ToplevelDeclaration::new(
        "Nested",
        UNTAGGED,
        ASN1Type::Sequence(AsnSequence {
            members: &NESTED_FIELDS,
        }),
    );

    fn names(node: &Node) -> Vec<&str> {
        node.children().iter().map(|c| &*c.name).collect()
    }

    #[test]
    fn skips_absent_optional_members() {
        let node = Ber::decode(&OPTIONAL_MIDDLE, &[0x30, 0x06, 0x80, 0x01, 0x07, 0x82, 0x01, 0x09])
            .unwrap();
        assert_eq!(names(&node), vec!["first", "last"]);
        assert!(node.get("middle").is_none());
        assert_eq!(node.get("last").unwrap().as_integer(), Some(9));
        assert_eq!(node.get("last").unwrap().span, 5..8);
        assert_eq!(node.span, 0..8);
    }

    #[test]
    fn decodes_present_optional_members() {
        let node = Ber::decode(
            &OPTIONAL_MIDDLE,
            &[0x30, 0x09, 0x80, 0x01, 0x07, 0x81, 0x01, 0xFF, 0x82, 0x01, 0x09],
        )
        .unwrap();
        assert_eq!(names(&node), vec!["first", "middle", "last"]);
        assert_eq!(node.get("middle").unwrap().value, Value::Boolean(true));
    }

    #[test]
    fn decodes_indefinite_lengths() {
        let node = Ber::decode(
            &OPTIONAL_MIDDLE,
            &[0x30, 0x80, 0x80, 0x01, 0x07, 0x82, 0x01, 0x09, 0x00, 0x00],
        )
        .unwrap();
        assert_eq!(names(&node), vec!["first", "last"]);
        assert_eq!(node.span, 0..10);
        assert!(node.all_diagnostics().is_empty());
    }

    #[test]
    fn fails_on_missing_end_of_contents() {
        let err = Ber::decode(&OPTIONAL_MIDDLE, &[0x30, 0x80, 0x80, 0x01, 0x07, 0x82, 0x01, 0x09])
            .unwrap_err();
        assert_eq!(err.kind, DecodingErrorType::OutOfBounds);
    }

    #[test]
    fn selects_every_operator_alternative() {
        for (id, name) in [(0u8, "and"), (1, "or"), (2, "and-not")] {
            let node = Ber::decode(&OPERATOR, &[0xBF, 0x2E, 0x02, 0x80 | id, 0x00]).unwrap();
            assert_eq!(node.chosen(), Some(name));
            assert_eq!(node.children()[0].value, Value::Null);
        }

        let prox = [
            0xBF, 0x2E, 0x10, 0xA3, 0x0E, 0x82, 0x01, 0x02, 0x83, 0x01, 0xFF, 0x84, 0x01, 0x03,
            0xA5, 0x03, 0x81, 0x01, 0x02,
        ];
        let node = Ber::decode(&OPERATOR, &prox).unwrap();
        assert_eq!(node.chosen(), Some("prox"));
        assert_eq!(node.get("distance").unwrap().as_integer(), Some(2));
        let relation = node.get("relationType").unwrap();
        assert_eq!(relation.display.as_deref(), Some("equal"));
        let unit = node.get("proximityUnitCode").unwrap();
        assert_eq!(unit.chosen(), Some("known"));
        assert_eq!(unit.children()[0].display.as_deref(), Some("word"));
    }

    #[test]
    fn rejects_unknown_alternatives() {
        let err = Ber::decode(&OPERATOR, &[0xBF, 0x2E, 0x02, 0x87, 0x00]).unwrap_err();
        assert_eq!(err.kind, DecodingErrorType::UnknownChoiceAlternative);
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn distinguishes_implicit_and_explicit_tags() {
        let implicit = Ber::decode(&REFERENCE_ID, &[0x82, 0x03, b'a', b'b', b'c']).unwrap();
        assert_eq!(implicit.value, Value::OctetString(b"abc".to_vec()));

        let explicit =
            Ber::decode(&QUERY, &[0xA2, 0x05, 0x04, 0x03, b'a', b'b', b'c']).unwrap();
        assert_eq!(explicit.chosen(), Some("type-2"));
        assert_eq!(explicit.as_str(), Some("abc"));

        let err = Ber::decode(&QUERY, &[0xA2, 0x03, 0x02, 0x01, 0x05]).unwrap_err();
        assert_eq!(err.kind, DecodingErrorType::MissingMandatoryField);
    }

    #[test]
    fn keeps_raw_octets_of_text_strings() {
        let node = Ber::decode(&INTERNATIONAL_STRING, &[0x1B, 0x04, b'c', b'a', b'f', 0xE9]).unwrap();
        assert_eq!(node.value, Value::CharacterString(vec![b'c', b'a', b'f', 0xE9]));
        assert_eq!(node.as_str(), None);
        assert_eq!(node.display.as_deref(), Some("caf\u{FFFD}"));

        let valid = Ber::decode(&INTERNATIONAL_STRING, &[0x1B, 0x03, b'd', b'o', b'g']).unwrap();
        assert_eq!(valid.as_str(), Some("dog"));
        assert_eq!(valid.display, None);
    }

    #[test]
    fn joins_segmented_strings() {
        let node = Ber::decode(
            &REFERENCE_ID,
            &[0xA2, 0x08, 0x04, 0x02, b'a', b'b', 0x04, 0x02, b'c', b'd'],
        )
        .unwrap();
        assert_eq!(node.value, Value::OctetString(b"abcd".to_vec()));
    }

    #[test]
    fn decodes_set_members_in_any_order() {
        let node = Ber::decode(&UNORDERED, &[0x31, 0x06, 0x82, 0x01, 0x09, 0x80, 0x01, 0x07])
            .unwrap();
        assert_eq!(names(&node), vec!["last", "first"]);
        assert_eq!(node.get("first").unwrap().as_integer(), Some(7));

        let err = Ber::decode(&UNORDERED, &[0x31, 0x03, 0x80, 0x01, 0x07]).unwrap_err();
        assert_eq!(err.kind, DecodingErrorType::MissingMandatoryField);
    }

    #[test]
    fn skips_trailing_extensions() {
        let input = [0x30, 0x09, 0x80, 0x01, 0x07, 0x82, 0x01, 0x09, 0x83, 0x01, 0x00];
        let node = Ber::decode(&OPTIONAL_MIDDLE, &input).unwrap();
        assert_eq!(names(&node), vec!["first", "last"]);
        let diagnostics = node.all_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::TrailingData);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(diagnostics[0].span, 8..11);

        let strict = DecoderOptions::default().allow_trailing_data(false);
        let err = Ber::decode_with(&OPTIONAL_MIDDLE, &input, strict, &Plain).unwrap_err();
        assert_eq!(err.kind, DecodingErrorType::UnexpectedTrailingData);
        assert_eq!(err.offset, 8);
    }

    #[test]
    fn reports_octets_behind_the_message() {
        let node = Ber::decode(&PRESENT_STATUS, &[0x9B, 0x01, 0x05, 0xFF]).unwrap();
        assert_eq!(node.diagnostics.len(), 1);
        assert_eq!(node.diagnostics[0].span, 3..4);
    }

    #[test]
    fn keeps_partial_tree_of_failed_decode() {
        let err = Ber::decode(&OPTIONAL_MIDDLE, &[0x30, 0x06, 0x80, 0x01, 0x07, 0x81, 0x01, 0xFF])
            .unwrap_err();
        assert_eq!(err.kind, DecodingErrorType::MissingMandatoryField);
        assert!(err.details.contains("last"));
        let partial = err.partial.unwrap();
        assert_eq!(partial.name, "OptionalMiddle");
        assert_eq!(names(&partial), vec!["first", "middle"]);
    }

    #[test]
    fn bounds_nesting_depth() {
        let mut input = [0x30, 0x80, 0xA0, 0x80].repeat(100);
        input.extend([0x00; 400]);
        let options = DecoderOptions::default().max_depth(16);
        let err = Ber::decode_with(&NESTED, &input, options, &Plain).unwrap_err();
        assert_eq!(err.kind, DecodingErrorType::DepthLimitExceeded);
    }

    #[test]
    fn bounds_node_count() {
        let options = DecoderOptions::default().max_nodes(2);
        let err = Ber::decode_with(
            &OPTIONAL_MIDDLE,
            &[0x30, 0x06, 0x80, 0x01, 0x07, 0x82, 0x01, 0x09],
            options,
            &Plain,
        )
        .unwrap_err();
        assert_eq!(err.kind, DecodingErrorType::NodeLimitExceeded);
        assert_eq!(err.offset, 5);
    }

    #[test]
    fn keeps_unknown_external_content() {
        let octets = [
            0x28, 0x0B, 0x06, 0x03, 0x2A, 0x03, 0x04, 0x81, 0x04, b't', b'e', b'x', b't',
        ];
        let node = Ber::decode(&EXTERNAL, &octets).unwrap();
        assert_eq!(
            node.get("direct-reference").unwrap().as_oid().unwrap().to_string(),
            "1.2.3.4"
        );
        let content = node.get("encoding.octet-aligned").unwrap();
        assert_eq!(content.value, Value::OctetString(b"text".to_vec()));

        let single = [
            0x28, 0x0A, 0x06, 0x03, 0x2A, 0x03, 0x04, 0xA0, 0x03, 0x02, 0x01, 0x05,
        ];
        let node = Ber::decode(&EXTERNAL, &single).unwrap();
        let any = node.get("encoding.single-ASN1-type").unwrap();
        assert_eq!(any.value, Value::OctetString(vec![0x02, 0x01, 0x05]));
        assert_eq!(any.span, 7..12);
    }
}
