//! EXTERNAL, the envelope of records and other foreign content.
//!
//! ```text
//! EXTERNAL ::= [UNIVERSAL 8] IMPLICIT SEQUENCE {
//!     direct-reference      OBJECT IDENTIFIER OPTIONAL,
//!     indirect-reference    INTEGER OPTIONAL,
//!     data-value-descriptor ObjectDescriptor OPTIONAL,
//!     encoding CHOICE {
//!         single-ASN1-type [0] ANY,
//!         octet-aligned    [1] IMPLICIT OCTET STRING,
//!         arbitrary        [2] IMPLICIT BIT STRING } }
//! ```
//!
//! What the encoding holds is decided by the profile, keyed by the
//! direct reference.
use std::ops::Range;

use z3950_grammar::{
    z3950::{ANY, BIT_STRING, INTEGER, OBJECT_DESCRIPTOR, OBJECT_IDENTIFIER, OCTET_STRING},
    AsnTag, Semantic, Tagging, ToplevelDeclaration, UNTAGGED,
};

use crate::{
    context::DecodeContext,
    cursor::ByteCursor,
    error::{DecodingError, DecodingErrorType},
    value::{Node, ObjectIdentifier, Value},
};

use super::{
    header::{at_end, peek_header, read_header},
    structure::{collect_segments, decode_any, decode_component, within, Segment},
};

const SINGLE_ASN1_TYPE: AsnTag = AsnTag::context(0);
const OCTET_ALIGNED: AsnTag = AsnTag::context(1);
const ARBITRARY: AsnTag = AsnTag::context(2);

/// Decodes the content of an EXTERNAL.
pub(crate) fn decode_external<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    name: &'static str,
    start: usize,
) -> Result<Node, DecodingError> {
    let mut children = Vec::with_capacity(4);
    let result = decode_members(cursor, ctx, &mut children);
    match result {
        Ok(()) => Ok(Node::new(name, start..cursor.offset(), Value::Sequence(children))),
        Err(mut e) => {
            children.extend(e.take_partial());
            let end = e.offset.max(start);
            Err(e.with_partial(Node::new(name, start..end, Value::Sequence(children))))
        }
    }
}

fn decode_members<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    children: &mut Vec<Node>,
) -> Result<(), DecodingError> {
    let mut direct_reference = None;
    if let Some(node) = optional(cursor, ctx, "direct-reference", &OBJECT_IDENTIFIER)? {
        direct_reference = node.as_oid().cloned();
        children.push(node);
    }
    children.extend(optional(cursor, ctx, "indirect-reference", &INTEGER)?);
    children.extend(optional(cursor, ctx, "data-value-descriptor", &OBJECT_DESCRIPTOR)?);
    children.push(decode_encoding(cursor, ctx, direct_reference.as_ref())?);
    Ok(())
}

fn optional<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    name: &'static str,
    decl: &'static ToplevelDeclaration,
) -> Result<Option<Node>, DecodingError> {
    if at_end(cursor) || !decl.accepts(&peek_header(cursor)?.tag) {
        return Ok(None);
    }
    decode_component(cursor, ctx, name, UNTAGGED, decl).map(Some)
}

fn decode_encoding<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    direct_reference: Option<&ObjectIdentifier>,
) -> Result<Node, DecodingError> {
    let header = peek_header(cursor)?;
    let chosen = match header.tag {
        SINGLE_ASN1_TYPE => {
            let syntax = direct_reference.and_then(|oid| ctx.profile.record_syntax(oid));
            log::debug!(
                "EXTERNAL {} resolves to {}",
                direct_reference.map_or_else(|| String::from("without direct reference"), |o| o.to_string()),
                syntax.map_or("ANY", |s| s.name)
            );
            read_header(cursor)?;
            within(cursor, ctx, header, |inner, ctx| match syntax {
                Some(decl) => decode_component(inner, ctx, "single-ASN1-type", UNTAGGED, decl)
                    .map(|mut node| {
                        node.display.get_or_insert_with(|| decl.name.into());
                        node
                    }),
                None => decode_any(inner, ctx, "single-ASN1-type", &ANY),
            })?
        }
        OCTET_ALIGNED => {
            let mut segmented = cursor.clone();
            let mut node = decode_component(
                cursor,
                ctx,
                "octet-aligned",
                Tagging::Implicit(OCTET_ALIGNED),
                &OCTET_STRING,
            )?;
            if let Value::OctetString(content) = &node.value {
                // Segmented content is interpreted from offset 0 and its
                // spans are moved into the segments afterwards.
                let segments = if header.constructed {
                    let header = read_header(&mut segmented)?;
                    Some(collect_segments(&mut segmented, ctx, header)?)
                } else {
                    None
                };
                let origin = if segments.is_some() { 0 } else { header.content_offset() };
                match ctx.profile.octet_aligned(direct_reference, content, origin) {
                    Some(mut records) => {
                        log::debug!("octet-aligned EXTERNAL holds {} records", records.len());
                        if let Some(segments) = &segments {
                            records.iter_mut().for_each(|r| relocate(r, segments));
                        }
                        node.value = Value::Sequence(records);
                    }
                    None => {
                        node.semantic = Semantic::PrintableOctets;
                        node.display = ctx.describe(Semantic::PrintableOctets, &node.value);
                    }
                }
            }
            node
        }
        ARBITRARY => decode_component(
            cursor,
            ctx,
            "arbitrary",
            Tagging::Implicit(ARBITRARY),
            &BIT_STRING,
        )?,
        tag => {
            return Err(DecodingError::new(
                &format!("EXTERNAL encoding {tag} is none of [0], [1] or [2]"),
                DecodingErrorType::UnknownChoiceAlternative,
            )
            .at(header.offset))
        }
    };
    Ok(Node::new(
        "encoding",
        header.offset..cursor.offset(),
        Value::Choice(Box::new(chosen)),
    ))
}

/// Message offset of `position` in the joined content of `segments`.
fn locate(segments: &[Segment], position: usize) -> usize {
    let mut start = 0;
    for segment in segments {
        if position < start + segment.bytes.len() {
            return segment.offset + position - start;
        }
        start += segment.bytes.len();
    }
    segments.last().map_or(position, |s| s.offset + s.bytes.len())
}

fn relocate_range(range: &Range<usize>, segments: &[Segment]) -> Range<usize> {
    let start = locate(segments, range.start);
    if range.end > range.start {
        start..locate(segments, range.end - 1) + 1
    } else {
        start..start
    }
}

/// Moves the spans of a tree decoded from joined segment content
/// to where its octets lie in the message.
fn relocate(node: &mut Node, segments: &[Segment]) {
    node.span = relocate_range(&node.span, segments);
    for diagnostic in &mut node.diagnostics {
        diagnostic.span = relocate_range(&diagnostic.span, segments);
    }
    match &mut node.value {
        Value::Sequence(children) | Value::SequenceOf(children) => {
            children.iter_mut().for_each(|child| relocate(child, segments))
        }
        Value::Choice(chosen) => relocate(chosen, segments),
        _ => {}
    }
}
