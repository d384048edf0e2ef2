//! Presents decoded MARC records as value trees.
use std::{borrow::Cow, ops::Range};

use marc21::{Directory, FieldContent, Leader, Record};
use z3950_transcoder::value::{Node, Value};

/// Field content keeps its octets. Text that is not UTF-8 is shown
/// through the display string.
fn text(name: impl Into<Cow<'static, str>>, span: Range<usize>, value: &[u8]) -> Node {
    let display = std::str::from_utf8(value)
        .is_err()
        .then(|| String::from_utf8_lossy(value).into_owned());
    Node::new(name, span, Value::CharacterString(value.to_vec())).with_display(display)
}

fn number(name: &'static str, span: Range<usize>, value: usize) -> Node {
    Node::new(name, span, Value::Integer(value as i64))
}

fn leader_node(leader: &Leader) -> Node {
    let at = |range: Range<usize>| leader.span.start + range.start..leader.span.start + range.end;
    let code = |name: &'static str, position: usize, value: char| {
        text(name, at(position..position + 1), value.to_string().as_bytes())
    };
    Node::new(
        "leader",
        leader.span.clone(),
        Value::Sequence(vec![
            number("recordLength", at(0..5), leader.record_length),
            code("recordStatus", 5, leader.record_status),
            code("typeOfRecord", 6, leader.type_of_record),
            code("bibliographicLevel", 7, leader.bibliographic_level),
            code("typeOfControl", 8, leader.type_of_control),
            code("characterCodingScheme", 9, leader.character_coding_scheme),
            number("indicatorCount", at(10..11), leader.indicator_count),
            number("subfieldCodeCount", at(11..12), leader.subfield_code_count),
            number("baseAddressOfData", at(12..17), leader.base_address_of_data),
            code("encodingLevel", 17, leader.encoding_level),
            code("descriptiveCatalogingForm", 18, leader.descriptive_cataloging_form),
            code(
                "multipartResourceRecordLevel",
                19,
                leader.multipart_resource_record_level,
            ),
            number("lengthOfFieldLength", at(20..21), leader.length_of_field_length),
            number(
                "lengthOfStartingCharacterPosition",
                at(21..22),
                leader.starting_character_position_length,
            ),
            number(
                "lengthOfImplementationDefined",
                at(22..23),
                leader.implementation_defined_length,
            ),
        ]),
    )
    .with_diagnostics(leader.diagnostics.clone())
}

fn directory_node(directory: &Directory) -> Node {
    let entries = directory
        .entries
        .iter()
        .map(|entry| {
            let mut components = vec![text("tag", entry.span.start..entry.span.start + 3, entry.tag.as_bytes())];
            components.extend(
                entry
                    .length
                    .map(|length| number("fieldLength", entry.span.clone(), length)),
            );
            components.extend(
                entry
                    .starting_position
                    .map(|start| number("startingCharacterPosition", entry.span.clone(), start)),
            );
            Node::new("entry", entry.span.clone(), Value::Sequence(components))
                .with_diagnostics(entry.diagnostics.clone())
        })
        .collect();
    Node::new("directory", directory.span.clone(), Value::SequenceOf(entries))
        .with_diagnostics(directory.diagnostics.clone())
}

/// One node per record, with the leader, the directory and the
/// fields named by their tags.
pub fn record_node(record: &Record) -> Node {
    let fields = record
        .fields
        .iter()
        .map(|field| {
            let node = match &field.content {
                FieldContent::Control(content) => text(field.tag.clone(), field.span.clone(), content),
                FieldContent::Data {
                    indicators,
                    subfields,
                } => {
                    let start = field.span.start;
                    let mut components =
                        vec![text("indicators", start..start + indicators.len(), indicators)];
                    components.extend(subfields.iter().map(|subfield| {
                        text(subfield.code.clone(), subfield.span.clone(), &subfield.value)
                    }));
                    Node::new(field.tag.clone(), field.span.clone(), Value::Sequence(components))
                }
            };
            node.with_diagnostics(field.diagnostics.clone())
        })
        .collect();
    Node::new(
        "record",
        record.span.clone(),
        Value::Sequence(vec![
            leader_node(&record.leader),
            directory_node(&record.directory),
            Node::new("fields", record.span.clone(), Value::Sequence(fields)),
        ]),
    )
    .with_diagnostics(record.record_diagnostics.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_field_octets_and_shows_lossy_text() {
        let mut input = b"00048nam a2200037 a 4500245001000000\x1e".to_vec();
        input.extend_from_slice(b"10\x1faCaf\xE2e\x1e\x1d");
        let record = marc21::decode_record(&input, 0).unwrap();
        let node = record_node(&record);
        let subfield = node.get("fields.245.a").unwrap();
        assert_eq!(subfield.value, Value::CharacterString(b"Caf\xE2e".to_vec()));
        assert_eq!(subfield.span, 39..46);
        assert_eq!(subfield.as_str(), None);
        assert_eq!(subfield.display.as_deref(), Some("Caf\u{FFFD}e"));
        let indicators = node.get("fields.245.indicators").unwrap();
        assert_eq!(indicators.as_str(), Some("10"));
        assert_eq!(indicators.display, None);
    }
}
