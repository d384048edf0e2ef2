use std::{borrow::Cow, ops::Range};

use nom::{
    bytes::complete::{tag, take_till},
    multi::many0,
    sequence::preceded,
    IResult,
};

use crate::{
    report, Diagnostic, DiagnosticKind, Directory, Leader, FIELD_TERMINATOR, SUBFIELD_DELIMITER,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub tag: String,
    pub content: FieldContent,
    pub span: Range<usize>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldContent {
    /// Octets of a control field without its terminator
    Control(Vec<u8>),
    Data {
        indicators: Vec<u8>,
        subfields: Vec<Subfield>,
    },
}

/// A subfield keeps the octets it was read from. MARC-8 and other
/// non UTF-8 content is only converted by [`Subfield::text`].
#[derive(Debug, Clone, PartialEq)]
pub struct Subfield {
    pub code: String,
    pub value: Vec<u8>,
    pub span: Range<usize>,
}

impl Subfield {
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }
}

/// One subfield: the delimiter followed by everything up to the next one.
fn subfield(input: &[u8]) -> IResult<&[u8], &[u8]> {
    preceded(
        tag(&[SUBFIELD_DELIMITER][..]),
        take_till(|b: u8| b == SUBFIELD_DELIMITER),
    )(input)
}

/// Data in front of the first delimiter, then the subfields.
fn subfields(input: &[u8]) -> IResult<&[u8], (&[u8], Vec<&[u8]>)> {
    let (input, leading) = take_till(|b: u8| b == SUBFIELD_DELIMITER)(input)?;
    let (input, subfields) = many0(subfield)(input)?;
    Ok((input, (leading, subfields)))
}

/// Decodes the fields in directory order. `data` is the data area
/// starting at the base address, `origin` its absolute offset.
pub(crate) fn parse_fields(
    data: &[u8],
    directory: &Directory,
    leader: &Leader,
    origin: usize,
) -> Vec<Field> {
    let mut previous_end = 0;
    directory
        .entries
        .iter()
        .map(|entry| {
            let start = entry.starting_position.unwrap_or(previous_end).min(data.len());
            let declared_end = entry
                .length
                .map(|length| (start + length).min(data.len()));
            // Without a usable length the field runs to the next terminator.
            let end = declared_end.unwrap_or_else(|| {
                data[start..]
                    .iter()
                    .position(|b| *b == FIELD_TERMINATOR)
                    .map_or(data.len(), |p| start + p + 1)
            });
            previous_end = end;
            parse_field(
                &entry.tag,
                entry.is_control_field(),
                &data[start..end],
                leader,
                origin + start,
            )
        })
        .collect()
}

fn parse_field(
    field_tag: &str,
    control: bool,
    bytes: &[u8],
    leader: &Leader,
    offset: usize,
) -> Field {
    let mut diagnostics = Vec::new();
    let span = offset..offset + bytes.len();
    let content = match bytes.split_last() {
        Some((&FIELD_TERMINATOR, content)) => content,
        _ => {
            report(
                &mut diagnostics,
                Diagnostic::warning(
                    DiagnosticKind::MissingTerminator,
                    format!("{field_tag}: field is not terminated by a field terminator"),
                    span.clone(),
                ),
            );
            bytes
        }
    };

    let content = if control {
        FieldContent::Control(content.to_vec())
    } else {
        parse_data_field(field_tag, content, leader, offset, &mut diagnostics)
    };
    Field {
        tag: field_tag.into(),
        content,
        span,
        diagnostics,
    }
}

fn parse_data_field(
    field_tag: &str,
    content: &[u8],
    leader: &Leader,
    offset: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> FieldContent {
    let indicator_count = leader.indicator_count.min(content.len());
    if indicator_count < leader.indicator_count {
        report(
            diagnostics,
            Diagnostic::warning(
                DiagnosticKind::InvalidValue,
                format!(
                    "{field_tag}: {} bytes cannot hold {} indicators",
                    content.len(),
                    leader.indicator_count
                ),
                offset..offset + content.len(),
            ),
        );
    }
    let (indicators, rest) = content.split_at(indicator_count);
    let code_length = leader.subfield_code_count.saturating_sub(1);

    // take_till and many0 never fail on complete input
    let (leading, pieces) = subfields(rest).map_or((rest, Vec::new()), |(_, parsed)| parsed);
    let mut position = offset + indicator_count;
    if !leading.is_empty() {
        report(
            diagnostics,
            Diagnostic::warning(
                DiagnosticKind::InvalidValue,
                format!("{field_tag}: data in front of the first subfield"),
                position..position + leading.len(),
            ),
        );
    }
    position += leading.len();

    let subfields = pieces
        .into_iter()
        .map(|piece| {
            let span = position..position + 1 + piece.len();
            position = span.end;
            if piece.len() < code_length {
                report(
                    diagnostics,
                    Diagnostic::warning(
                        DiagnosticKind::InvalidValue,
                        format!("{field_tag}: subfield without a code"),
                        span.clone(),
                    ),
                );
            }
            let (code, value) = piece.split_at(code_length.min(piece.len()));
            Subfield {
                code: String::from_utf8_lossy(code).into_owned(),
                value: value.to_vec(),
                span,
            }
        })
        .collect();

    FieldContent::Data {
        indicators: indicators.to_vec(),
        subfields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode_record, tests::record};

    #[test]
    fn splits_subfields() {
        let (rest, (leading, pieces)) = subfields(b"\x1faone\x1fbtwo").unwrap();
        assert!(rest.is_empty());
        assert!(leading.is_empty());
        assert_eq!(pieces, vec![b"aone".as_slice(), b"btwo".as_slice()]);
    }

    #[test]
    fn tracks_subfield_spans() {
        let input = record(&[("245", b"10\x1faThe cat\x1fcby\x1e")]);
        let record = decode_record(&input, 0).unwrap();
        let field = &record.fields[0];
        let base = record.leader.base_address_of_data;
        assert_eq!(field.span, base..base + 16);
        let FieldContent::Data { subfields, .. } = &field.content else {
            panic!("245 is not a data field")
        };
        assert_eq!(subfields[0].span, base + 2..base + 11);
        assert_eq!(subfields[1].span, base + 11..base + 15);
    }

    #[test]
    fn decodes_remaining_fields_around_a_malformed_entry() {
        let mut input = record(&[
            ("001", b"id\x1e"),
            ("245", b"10\x1faTitle\x1e"),
            ("650", b" 0\x1faSubject\x1e"),
        ]);
        // field length of the second entry
        input[24 + 12 + 3..24 + 12 + 7].copy_from_slice(b"00x9");
        let record = decode_record(&input, 0).unwrap();

        let diagnostics = record.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidValue);
        assert_eq!(record.directory.entries[1].diagnostics.len(), 1);

        assert_eq!(record.fields.len(), 3);
        assert_eq!(record.fields[0].content, FieldContent::Control(b"id".to_vec()));
        let FieldContent::Data { subfields, .. } = &record.fields[1].content else {
            panic!("245 is not a data field")
        };
        assert_eq!(subfields[0].value, b"Title");
        let FieldContent::Data { indicators, subfields } = &record.fields[2].content else {
            panic!("650 is not a data field")
        };
        assert_eq!(indicators, b" 0");
        assert_eq!(subfields[0].value, b"Subject");
    }

    #[test]
    fn reports_unterminated_fields() {
        let input = record(&[("001", b"id"), ("500", b"  \x1fanote\x1e")]);
        let record = decode_record(&input, 0).unwrap();
        assert_eq!(record.fields[0].diagnostics.len(), 1);
        assert_eq!(
            record.fields[0].diagnostics[0].kind,
            DiagnosticKind::MissingTerminator
        );
        assert_eq!(record.fields[0].content, FieldContent::Control(b"id".to_vec()));
        assert!(record.fields[1].diagnostics.is_empty());
    }

    #[test]
    fn keeps_marc_8_octets() {
        // MARC-8 combining acute in front of the base letter
        let input = record(&[("245", b"10\x1faCaf\xE2e\x1e")]);
        let record = decode_record(&input, 0).unwrap();
        let FieldContent::Data { subfields, .. } = &record.fields[0].content else {
            panic!("245 is not a data field")
        };
        assert_eq!(subfields[0].value, b"Caf\xE2e");
        assert_eq!(subfields[0].text(), "Caf\u{FFFD}e");
    }
}
