use std::ops::Range;

use nom::{character::complete::digit1, combinator::all_consuming};

use crate::{report, Diagnostic, DiagnosticKind, FIELD_TERMINATOR, LEADER_LENGTH, RECORD_TERMINATOR};

/// The fixed 24 byte head of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Leader {
    pub record_length: usize,
    pub record_status: char,
    pub type_of_record: char,
    pub bibliographic_level: char,
    pub type_of_control: char,
    pub character_coding_scheme: char,
    pub indicator_count: usize,
    pub subfield_code_count: usize,
    pub base_address_of_data: usize,
    pub encoding_level: char,
    pub descriptive_cataloging_form: char,
    pub multipart_resource_record_level: char,
    pub length_of_field_length: usize,
    pub starting_character_position_length: usize,
    pub implementation_defined_length: usize,
    pub span: Range<usize>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses a run of ASCII digits that spans all of `bytes`.
pub(crate) fn number(bytes: &[u8]) -> Option<usize> {
    let (_, digits) = all_consuming(digit1::<_, nom::error::Error<&[u8]>>)(bytes).ok()?;
    std::str::from_utf8(digits).ok()?.parse().ok()
}

impl Leader {
    /// Parses the leader at the start of `record`, which holds at
    /// least 24 bytes.
    pub(crate) fn parse(record: &[u8], origin: usize) -> Leader {
        let mut diagnostics = Vec::new();
        let mut numeric = |name: &str, range: Range<usize>, fallback: usize| {
            number(&record[range.clone()]).unwrap_or_else(|| {
                report(
                    &mut diagnostics,
                    Diagnostic::warning(
                        DiagnosticKind::InvalidValue,
                        format!(
                            "{name} {:?} is not a number, assuming {fallback}",
                            String::from_utf8_lossy(&record[range.clone()])
                        ),
                        origin + range.start..origin + range.end,
                    ),
                );
                fallback
            })
        };
        let scanned_length = record
            .iter()
            .position(|b| *b == RECORD_TERMINATOR)
            .map_or(record.len(), |p| p + 1);
        let scanned_base = record[LEADER_LENGTH..]
            .iter()
            .position(|b| *b == FIELD_TERMINATOR)
            .map_or(LEADER_LENGTH, |p| LEADER_LENGTH + p + 1);

        let record_length = numeric("record length", 0..5, scanned_length);
        let indicator_count = numeric("indicator count", 10..11, 2);
        let subfield_code_count = numeric("subfield code count", 11..12, 2);
        let base_address_of_data = numeric("base address of data", 12..17, scanned_base);
        let length_of_field_length = numeric("length of field length", 20..21, 4);
        let starting_character_position_length =
            numeric("length of starting character position", 21..22, 5);
        let implementation_defined_length =
            numeric("length of implementation defined portion", 22..23, 0);

        if base_address_of_data < LEADER_LENGTH || base_address_of_data > record_length {
            report(
                &mut diagnostics,
                Diagnostic::warning(
                    DiagnosticKind::InvalidValue,
                    format!(
                        "base address of data {base_address_of_data} lies outside the record"
                    ),
                    origin + 12..origin + 17,
                ),
            );
        }

        let code = |position: usize| record[position] as char;
        Leader {
            record_length,
            record_status: code(5),
            type_of_record: code(6),
            bibliographic_level: code(7),
            type_of_control: code(8),
            character_coding_scheme: code(9),
            indicator_count,
            subfield_code_count,
            base_address_of_data,
            encoding_level: code(17),
            descriptive_cataloging_form: code(18),
            multipart_resource_record_level: code(19),
            length_of_field_length,
            starting_character_position_length,
            implementation_defined_length,
            span: origin..origin + LEADER_LENGTH,
            diagnostics,
        }
    }

    /// Width of one directory entry
    pub fn entry_width(&self) -> usize {
        3 + self.length_of_field_length
            + self.starting_character_position_length
            + self.implementation_defined_length
    }
}
