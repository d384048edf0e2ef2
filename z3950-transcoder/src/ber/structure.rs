//! Descriptor driven decoding of tagged, constructed and
//! alternative encodings.
//!
//! The functions below call each other along the grammar graph.
//! Every constructed encoding that is entered passes through
//! [`within`], which bounds the region, charges the depth budget
//! and handles trailing octets, so recursion through self-referential
//! declarations always consumes input and stays bounded.
use z3950_grammar::{
    component_accepts,
    types::{distinguished_name, AsnBitString, AsnInteger, ChoiceOption, SequenceMember},
    ASN1Type, AsnTag, Tagging, ToplevelDeclaration,
};

use crate::{
    context::DecodeContext,
    cursor::ByteCursor,
    error::{DecodingError, DecodingErrorType},
    value::{BitString, Diagnostic, DiagnosticKind, Node, Value},
    Decoder,
};

use super::{
    external::decode_external,
    header::{at_end, peek_header, read_header, skip_element, Header, Length, END_OF_CONTENTS},
    Ber,
};

fn malformed(details: &str, offset: usize) -> DecodingError {
    DecodingError::new(details, DecodingErrorType::MalformedEncoding).at(offset)
}

/// Decodes the component `name [tagging] decl`.
///
/// An implicit tag replaces the outer tag of `decl`, an explicit tag
/// wraps the complete encoding of `decl`. CHOICE and open types have
/// no tag of their own to replace, so they always get wrapped.
pub(crate) fn decode_component<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    name: &'static str,
    tagging: Tagging,
    decl: &'static ToplevelDeclaration,
) -> Result<Node, DecodingError> {
    match tagging {
        Tagging::Untagged => decode_tagged(cursor, ctx, name, decl.tag, decl),
        Tagging::Implicit(tag) => {
            let header = expect_header(cursor, tag, name)?;
            match (decl.tag, &decl.r#type) {
                (Tagging::Explicit(_), _)
                | (Tagging::Untagged, ASN1Type::Choice(_) | ASN1Type::Any) => {
                    within(cursor, ctx, header, |inner, ctx| decode_type(inner, ctx, name, decl))
                }
                _ => decode_content(cursor, ctx, name, decl, header),
            }
        }
        Tagging::Explicit(tag) => {
            let header = expect_header(cursor, tag, name)?;
            within(cursor, ctx, header, |inner, ctx| {
                decode_tagged(inner, ctx, name, decl.tag, decl)
            })
        }
    }
}

/// Decodes `decl` carrying the tagging of its own declaration.
fn decode_tagged<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    name: &'static str,
    tagging: Tagging,
    decl: &'static ToplevelDeclaration,
) -> Result<Node, DecodingError> {
    match tagging {
        Tagging::Untagged => decode_type(cursor, ctx, name, decl),
        Tagging::Implicit(tag) => {
            let header = expect_header(cursor, tag, name)?;
            decode_content(cursor, ctx, name, decl, header)
        }
        Tagging::Explicit(tag) => {
            let header = expect_header(cursor, tag, name)?;
            within(cursor, ctx, header, |inner, ctx| decode_type(inner, ctx, name, decl))
        }
    }
}

/// Decodes the untagged encoding of the type of `decl`.
pub(crate) fn decode_type<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    name: &'static str,
    decl: &'static ToplevelDeclaration,
) -> Result<Node, DecodingError> {
    match &decl.r#type {
        ASN1Type::Choice(choice) => decode_choice(cursor, ctx, name, decl, choice.options),
        ASN1Type::Any => decode_any(cursor, ctx, name, decl),
        ty => {
            let tag = ty
                .universal_tag()
                .ok_or_else(|| malformed("type without universal tag", cursor.offset()))?;
            let header = expect_header(cursor, tag, name)?;
            decode_content(cursor, ctx, name, decl, header)
        }
    }
}

/// Reads a header that must carry `tag`.
fn expect_header(
    cursor: &mut ByteCursor,
    tag: AsnTag,
    name: &str,
) -> Result<Header, DecodingError> {
    let header = peek_header(cursor)?;
    if header.tag != tag {
        return Err(DecodingError::new(
            &format!("{name}: expected {tag}, found {}", header.tag),
            DecodingErrorType::MissingMandatoryField,
        )
        .at(header.offset));
    }
    read_header(cursor)
}

/// Decodes the content octets of `decl`, whose header has been read.
fn decode_content<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    name: &'static str,
    decl: &'static ToplevelDeclaration,
    header: Header,
) -> Result<Node, DecodingError> {
    ctx.count_node(header.offset)?;
    let start = header.offset;
    match &decl.r#type {
        ASN1Type::Sequence(sequence) => within(cursor, ctx, header, |inner, ctx| {
            decode_sequence(inner, ctx, name, decl, sequence.members, start)
        }),
        ASN1Type::Set(set) => within(cursor, ctx, header, |inner, ctx| {
            decode_set(inner, ctx, name, decl, set.members, start)
        }),
        ASN1Type::SequenceOf(element) => within(cursor, ctx, header, |inner, ctx| {
            decode_sequence_of(inner, ctx, name, decl, element, start)
        }),
        ASN1Type::External => within(cursor, ctx, header, |inner, ctx| {
            decode_external(inner, ctx, name, start)
        }),
        ASN1Type::Choice(_) | ASN1Type::Any => {
            within(cursor, ctx, header, |inner, ctx| decode_type(inner, ctx, name, decl))
        }
        _ => decode_primitive(cursor, ctx, name, decl, header),
    }
}

fn decode_primitive<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    name: &'static str,
    decl: &'static ToplevelDeclaration,
    header: Header,
) -> Result<Node, DecodingError> {
    let offset = header.content_offset();
    let value = match (header.constructed, header.length, &decl.r#type) {
        (false, Length::Definite(length), ty) => primitive_value(cursor, ty, length)?,
        (true, _, ASN1Type::CharacterString(string)) => {
            let bytes = concatenated(collect_segments(cursor, ctx, header)?);
            let mut segments = ByteCursor::with_origin(&bytes, offset);
            Ber.decode_character_string(*string, &mut segments, bytes.len())?
        }
        (true, _, ASN1Type::BitString(_)) => {
            Value::BitString(segmented_bit_string(collect_segments(cursor, ctx, header)?)?)
        }
        (_, _, _) => {
            return Err(malformed(
                &format!("{name}: {} must use a primitive definite encoding", decl.name),
                header.offset,
            ))
        }
    };
    let display = ctx
        .describe(decl.semantic, &value)
        .or_else(|| named_value(decl, &value))
        .or_else(|| lossy_text(&value));
    ctx.observe(decl.semantic, &value);
    Ok(Node::new(name, header.offset..cursor.offset(), value)
        .with_semantic(decl.semantic)
        .with_display(display))
}

fn primitive_value(
    cursor: &mut ByteCursor,
    ty: &ASN1Type,
    length: usize,
) -> Result<Value, DecodingError> {
    Ok(match ty {
        ASN1Type::Null => {
            Ber.decode_null(cursor, length)?;
            Value::Null
        }
        ASN1Type::Boolean => Value::Boolean(Ber.decode_boolean(cursor, length)?),
        ASN1Type::Integer(_) => Value::Integer(Ber.decode_integer(cursor, length)?),
        ASN1Type::BitString(_) => Value::BitString(Ber.decode_bit_string(cursor, length)?),
        ASN1Type::CharacterString(string) => {
            Ber.decode_character_string(*string, cursor, length)?
        }
        ASN1Type::ObjectIdentifier => {
            Value::ObjectIdentifier(Ber.decode_object_identifier(cursor, length)?)
        }
        ASN1Type::GeneralizedTime => {
            Value::GeneralizedTime(Ber.decode_generalized_time(cursor, length)?)
        }
        _ => return Err(malformed("constructed type in primitive encoding", cursor.offset())),
    })
}

/// Readable text of a character string whose octets are not UTF-8.
fn lossy_text(value: &Value) -> Option<String> {
    match value {
        Value::CharacterString(bytes) if std::str::from_utf8(bytes).is_err() => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
        _ => None,
    }
}

/// Display text of named numbers and named bits.
fn named_value(decl: &'static ToplevelDeclaration, value: &Value) -> Option<String> {
    match (&decl.r#type, value) {
        (
            ASN1Type::Integer(AsnInteger {
                distinguished_values: Some(names),
            }),
            Value::Integer(i),
        ) => distinguished_name(names, *i).map(String::from),
        (
            ASN1Type::BitString(AsnBitString {
                distinguished_values: Some(names),
            }),
            Value::BitString(bits),
        ) => Some(
            bits.set_bits()
                .map(|i| {
                    distinguished_name(names, i as i64)
                        .map_or_else(|| format!("bit {i}"), String::from)
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    }
}

/// One primitive segment of a constructed string.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Segment<'a> {
    /// Absolute offset of the first content octet
    pub offset: usize,
    pub bytes: &'a [u8],
}

fn concatenated(segments: Vec<Segment>) -> Vec<u8> {
    segments.iter().flat_map(|s| s.bytes).copied().collect()
}

/// Content octets of the primitive segments of a constructed string,
/// in order. Segments may nest.
pub(crate) fn collect_segments<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    header: Header,
) -> Result<Vec<Segment<'a>>, DecodingError> {
    let mut segments = Vec::new();
    segments_into(cursor, ctx, header, &mut segments)?;
    Ok(segments)
}

fn segments_into<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    header: Header,
    segments: &mut Vec<Segment<'a>>,
) -> Result<(), DecodingError> {
    ctx.descend(header.offset)?;
    let result = match header.length {
        Length::Definite(length) => cursor.split_to(length).and_then(|mut region| {
            segment_list(&mut region, ctx, segments)?;
            if region.is_empty() {
                Ok(())
            } else {
                Err(malformed("end-of-contents in definite encoding", region.offset()))
            }
        }),
        Length::Indefinite => segment_list(cursor, ctx, segments)
            .and_then(|_| expect_end_of_contents(cursor)),
    };
    ctx.ascend();
    result
}

fn segment_list<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    segments: &mut Vec<Segment<'a>>,
) -> Result<(), DecodingError> {
    while !at_end(cursor) {
        let segment = read_header(cursor)?;
        match (segment.constructed, segment.length) {
            (false, Length::Definite(length)) => segments.push(Segment {
                offset: segment.content_offset(),
                bytes: cursor.take(length)?,
            }),
            (true, _) => segments_into(cursor, ctx, segment, segments)?,
            (false, Length::Indefinite) => {
                return Err(malformed("primitive segment with indefinite length", segment.offset))
            }
        }
    }
    Ok(())
}

/// Joins BIT STRING segments, only the last one may have unused bits.
fn segmented_bit_string(segments: Vec<Segment>) -> Result<BitString, DecodingError> {
    let mut joined = BitString {
        bytes: Vec::new(),
        unused_bits: 0,
    };
    for segment in segments {
        if joined.unused_bits != 0 {
            return Err(malformed("unused bits before the last segment", segment.offset));
        }
        let mut cursor = ByteCursor::with_origin(segment.bytes, segment.offset);
        let bits = Ber.decode_bit_string(&mut cursor, segment.bytes.len())?;
        joined.bytes.extend(bits.bytes);
        joined.unused_bits = bits.unused_bits;
    }
    Ok(joined)
}

fn expect_end_of_contents(cursor: &mut ByteCursor) -> Result<(), DecodingError> {
    let offset = cursor.offset();
    match cursor.take(2) {
        Ok(eoc) if eoc == END_OF_CONTENTS => Ok(()),
        Ok(_) => Err(malformed("missing end-of-contents octets", offset)),
        Err(e) => Err(e),
    }
}

/// Decodes the content of a constructed encoding with `decode`.
///
/// A definite length bounds `decode` to a region of its own, an
/// indefinite one lets it run up to the end-of-contents octets.
/// Octets that `decode` leaves behind are skipped as trailing data.
pub(crate) fn within<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    header: Header,
    decode: impl FnOnce(&mut ByteCursor<'a>, &mut DecodeContext<'p>) -> Result<Node, DecodingError>,
) -> Result<Node, DecodingError> {
    if !header.constructed {
        return Err(malformed(
            &format!("{} must use a constructed encoding", header.tag),
            header.offset,
        ));
    }
    ctx.descend(header.offset)?;
    let result = match header.length {
        Length::Definite(length) => cursor.split_to(length).and_then(|mut region| {
            let node = decode(&mut region, ctx)?;
            let node = finish_region(&mut region, ctx, node)?;
            if region.is_empty() {
                Ok(node)
            } else {
                Err(malformed("end-of-contents in definite encoding", region.offset())
                    .with_partial(node))
            }
        }),
        Length::Indefinite => decode(cursor, ctx)
            .and_then(|node| finish_region(cursor, ctx, node))
            .and_then(|node| match expect_end_of_contents(cursor) {
                Ok(()) => Ok(node),
                Err(e) => Err(e.with_partial(node)),
            }),
    };
    ctx.ascend();
    let mut node = result?;
    node.span = header.offset..cursor.offset();
    Ok(node)
}

/// Skips what is left of a region after its value was decoded.
fn finish_region<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    mut node: Node,
) -> Result<Node, DecodingError> {
    if let Err(e) = skip_trailing(cursor, ctx, &node.name, &mut node.diagnostics) {
        return Err(e.with_partial(node));
    }
    Ok(node)
}

/// Skips unknown trailing elements of a region, or fails if the
/// options do not allow them.
fn skip_trailing(
    cursor: &mut ByteCursor,
    ctx: &DecodeContext,
    name: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), DecodingError> {
    while !at_end(cursor) {
        let offset = cursor.offset();
        if !ctx.options.allow_trailing_data {
            let tag = peek_header(cursor)?.tag;
            return Err(DecodingError::new(
                &format!("{name}: unexpected trailing element {tag}"),
                DecodingErrorType::UnexpectedTrailingData,
            )
            .at(offset));
        }
        let span = skip_element(cursor, ctx.options.max_depth)?;
        log::warn!(
            "{name}: skipped {} octets of unknown trailing data at {offset}",
            span.len()
        );
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::TrailingData,
            format!("{} octets of unknown trailing data", span.len()),
            span,
        ));
    }
    Ok(())
}

fn missing(
    decl: &ToplevelDeclaration,
    member: &SequenceMember,
    cursor: &ByteCursor,
) -> DecodingError {
    let expected = member
        .tag
        .tag()
        .or(member.r#type.outer_tag())
        .map_or_else(|| member.r#type.name.to_string(), |t| t.to_string());
    let found = peek_header(cursor)
        .map(|h| h.tag.to_string())
        .unwrap_or_else(|_| "end of content".into());
    DecodingError::new(
        &format!(
            "{}.{}: expected {expected}, found {found}",
            decl.name, member.name
        ),
        DecodingErrorType::MissingMandatoryField,
    )
    .at(cursor.offset())
}

/// Wraps the partial children of a failed composite around the
/// partial tree of the failure itself.
fn fail_with_children(
    mut error: DecodingError,
    name: &'static str,
    start: usize,
    mut children: Vec<Node>,
    wrap: fn(Vec<Node>) -> Value,
) -> DecodingError {
    children.extend(error.take_partial());
    let end = error.offset.max(start);
    error.with_partial(Node::new(name, start..end, wrap(children)))
}

fn decode_sequence<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    name: &'static str,
    decl: &'static ToplevelDeclaration,
    members: &'static [SequenceMember],
    start: usize,
) -> Result<Node, DecodingError> {
    let scope = ctx.save_scope();
    let mut children = Vec::with_capacity(members.len());
    let mut diagnostics = Vec::new();
    let result = decode_members(cursor, ctx, decl, members, &mut children)
        .and_then(|_| skip_trailing(cursor, ctx, name, &mut diagnostics));
    ctx.restore_scope(scope);
    match result {
        Ok(()) => Ok(Node::new(name, start..cursor.offset(), Value::Sequence(children))
            .with_semantic(decl.semantic)
            .with_diagnostics(diagnostics)),
        Err(e) => Err(fail_with_children(e, name, start, children, Value::Sequence)),
    }
}

fn decode_members<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    decl: &'static ToplevelDeclaration,
    members: &'static [SequenceMember],
    children: &mut Vec<Node>,
) -> Result<(), DecodingError> {
    for member in members {
        let present = !at_end(cursor)
            && component_accepts(member.tag, member.r#type, &peek_header(cursor)?.tag);
        if present {
            children.push(decode_component(cursor, ctx, member.name, member.tag, member.r#type)?);
        } else if !member.is_optional {
            return Err(missing(decl, member, cursor));
        }
    }
    Ok(())
}

fn decode_set<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    name: &'static str,
    decl: &'static ToplevelDeclaration,
    members: &'static [SequenceMember],
    start: usize,
) -> Result<Node, DecodingError> {
    let scope = ctx.save_scope();
    let mut children = Vec::with_capacity(members.len());
    let mut diagnostics = Vec::new();
    let result = decode_set_members(cursor, ctx, decl, members, &mut children, &mut diagnostics);
    ctx.restore_scope(scope);
    match result {
        Ok(()) => Ok(Node::new(name, start..cursor.offset(), Value::Sequence(children))
            .with_semantic(decl.semantic)
            .with_diagnostics(diagnostics)),
        Err(e) => Err(fail_with_children(e, name, start, children, Value::Sequence)),
    }
}

fn decode_set_members<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    decl: &'static ToplevelDeclaration,
    members: &'static [SequenceMember],
    children: &mut Vec<Node>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), DecodingError> {
    let mut seen = vec![false; members.len()];
    while !at_end(cursor) {
        let tag = peek_header(cursor)?.tag;
        let found = members
            .iter()
            .enumerate()
            .find(|(i, m)| !seen[*i] && component_accepts(m.tag, m.r#type, &tag));
        match found {
            Some((i, member)) => {
                seen[i] = true;
                children.push(decode_component(cursor, ctx, member.name, member.tag, member.r#type)?);
            }
            None => {
                if !ctx.options.allow_trailing_data {
                    return Err(DecodingError::new(
                        &format!("{}: unexpected element {tag}", decl.name),
                        DecodingErrorType::UnexpectedTrailingData,
                    )
                    .at(cursor.offset()));
                }
                let span = skip_element(cursor, ctx.options.max_depth)?;
                log::warn!("{}: skipped unknown element {tag} at {}", decl.name, span.start);
                diagnostics.push(Diagnostic::warning(
                    DiagnosticKind::TrailingData,
                    format!("unknown element {tag}"),
                    span,
                ));
            }
        }
    }
    match members.iter().zip(&seen).find(|(m, seen)| !m.is_optional && !**seen) {
        Some((member, _)) => Err(missing(decl, member, cursor)),
        None => Ok(()),
    }
}

fn decode_sequence_of<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    name: &'static str,
    decl: &'static ToplevelDeclaration,
    element: &'static ToplevelDeclaration,
    start: usize,
) -> Result<Node, DecodingError> {
    let mut items = Vec::new();
    while !at_end(cursor) {
        match decode_component(cursor, ctx, element.name, Tagging::Untagged, element) {
            Ok(item) => items.push(item),
            Err(e) => return Err(fail_with_children(e, name, start, items, Value::SequenceOf)),
        }
    }
    Ok(Node::new(name, start..cursor.offset(), Value::SequenceOf(items)).with_semantic(decl.semantic))
}

fn decode_choice<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    name: &'static str,
    decl: &'static ToplevelDeclaration,
    options: &'static [ChoiceOption],
) -> Result<Node, DecodingError> {
    let header = peek_header(cursor)?;
    let Some(option) = options
        .iter()
        .find(|o| component_accepts(o.tag, o.r#type, &header.tag))
    else {
        return Err(DecodingError::new(
            &format!("{name}: {} selects no alternative of {}", header.tag, decl.name),
            DecodingErrorType::UnknownChoiceAlternative,
        )
        .at(header.offset));
    };
    log::trace!("{} {} selects {}", decl.name, header.tag, option.name);
    ctx.count_node(header.offset)?;
    match decode_component(cursor, ctx, option.name, option.tag, option.r#type) {
        Ok(chosen) => Ok(Node::new(
            name,
            header.offset..cursor.offset(),
            Value::Choice(Box::new(chosen)),
        )
        .with_semantic(decl.semantic)),
        Err(mut e) => match e.take_partial() {
            Some(partial) => {
                let end = e.offset.max(header.offset);
                Err(e.with_partial(Node::new(
                    name,
                    header.offset..end,
                    Value::Choice(Box::new(partial)),
                )))
            }
            None => Err(e),
        },
    }
}

/// Keeps an open type as the octets of its complete TLV.
pub(crate) fn decode_any<'a, 'p>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'p>,
    name: &'static str,
    decl: &'static ToplevelDeclaration,
) -> Result<Node, DecodingError> {
    let offset = cursor.offset();
    ctx.count_node(offset)?;
    let encoding = cursor.rest();
    let span = skip_element(cursor, ctx.options.max_depth)?;
    let value = Value::OctetString(encoding[..span.len()].to_vec());
    let display = ctx.describe(decl.semantic, &value);
    Ok(Node::new(name, span, value)
        .with_semantic(decl.semantic)
        .with_display(display))
}
