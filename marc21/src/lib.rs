//! The `marc21` crate decodes MARC21 (ISO 2709) bibliographic records.
//!
//! A record is a 24 byte leader, a directory of fixed width entries
//! and the field data the directory points into. Decoding is lenient:
//! problems with numbers, directory entries and terminators are
//! attached as [`Diagnostic`]s to the part of the record they concern,
//! and decoding carries on with fallback values. Only a record that
//! is too short to hold a leader fails with a [`MarcError`].
//!
//! ```rust
//! let input = b"00041nam a2200037 a 4500001000300000\x1eab\x1e\x1d";
//! let record = marc21::decode_record(input, 0).unwrap();
//! assert_eq!(record.fields[0].tag, "001");
//! assert!(record.diagnostics().is_empty());
//! ```
mod directory;
mod field;
mod leader;

use core::fmt::{Display, Formatter};
use std::{error::Error, ops::Range};

pub use directory::{Directory, DirectoryEntry};
pub use field::{Field, FieldContent, Subfield};
pub use leader::Leader;
pub use z3950_transcoder::value::{Diagnostic, DiagnosticKind, Severity};

pub const LEADER_LENGTH: usize = 24;
pub const SUBFIELD_DELIMITER: u8 = 0x1F;
pub const FIELD_TERMINATOR: u8 = 0x1E;
pub const RECORD_TERMINATOR: u8 = 0x1D;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarcError {
    pub details: String,
    /// Absolute offset of the record that could not be decoded
    pub offset: usize,
}

impl Error for MarcError {}

impl Display for MarcError {
    fn fmt(&self, f: &mut Formatter) -> core::fmt::Result {
        write!(f, "Error decoding MARC record at offset {}: {}", self.offset, self.details)
    }
}

/// One decoded record. All spans are absolute offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub leader: Leader,
    pub directory: Directory,
    pub fields: Vec<Field>,
    pub span: Range<usize>,
    /// Problems of the record as a whole
    pub record_diagnostics: Vec<Diagnostic>,
}

impl Record {
    /// All diagnostics of the record and its parts
    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        let mut all: Vec<&Diagnostic> = self.record_diagnostics.iter().collect();
        all.extend(&self.leader.diagnostics);
        all.extend(&self.directory.diagnostics);
        for entry in &self.directory.entries {
            all.extend(&entry.diagnostics);
        }
        for field in &self.fields {
            all.extend(&field.diagnostics);
        }
        all
    }

    /// The first field carrying `tag`
    pub fn field(&self, tag: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }
}

pub(crate) fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    log::warn!(
        "MARC {:?} at {:?}: {}",
        diagnostic.kind,
        diagnostic.span,
        diagnostic.details
    );
    diagnostics.push(diagnostic);
}

/// Decodes the record at the start of `input`. `origin` is the
/// absolute offset of `input` in the enclosing message.
pub fn decode_record(input: &[u8], origin: usize) -> Result<Record, MarcError> {
    if input.len() < LEADER_LENGTH {
        return Err(MarcError {
            details: format!("{} bytes cannot hold a leader", input.len()),
            offset: origin,
        });
    }
    let leader = Leader::parse(input, origin);
    let mut record_diagnostics = Vec::new();

    let end = if leader.record_length > input.len() {
        report(
            &mut record_diagnostics,
            Diagnostic::error(
                DiagnosticKind::InvalidRecordLength,
                format!(
                    "leader declares {} bytes, {} available",
                    leader.record_length,
                    input.len()
                ),
                origin..origin + input.len(),
            ),
        );
        input.len()
    } else {
        leader.record_length.max(LEADER_LENGTH)
    };
    let record = &input[..end];

    let directory = Directory::parse(record, &leader, origin);
    let base = leader.base_address_of_data.clamp(LEADER_LENGTH, end);
    let data = &record[base..];
    let fields = field::parse_fields(data, &directory, &leader, origin + base);

    if end == leader.record_length {
        let terminated = record.last() == Some(&RECORD_TERMINATOR);
        let consumed = fields
            .iter()
            .map(|f| f.span.end - origin)
            .max()
            .unwrap_or(base)
            + 1;
        if !terminated {
            report(
                &mut record_diagnostics,
                Diagnostic::error(
                    DiagnosticKind::InvalidRecordLength,
                    "record does not end with a record terminator",
                    origin + end - 1..origin + end,
                ),
            );
        } else if consumed != end {
            report(
                &mut record_diagnostics,
                Diagnostic::warning(
                    DiagnosticKind::InvalidRecordLength,
                    format!("fields end at {consumed}, leader declares {end} bytes"),
                    origin..origin + end,
                ),
            );
        }
    }

    Ok(Record {
        leader,
        directory,
        fields,
        span: origin..origin + end,
        record_diagnostics,
    })
}

/// Decodes consecutive records, each delimited by its own leader.
///
/// Bytes behind the last record that cannot hold another leader are
/// reported on that record.
pub fn decode_records(input: &[u8], origin: usize) -> Result<Vec<Record>, MarcError> {
    let mut records = vec![decode_record(input, origin)?];
    let mut position = records[0].span.len();
    while position < input.len() {
        match decode_record(&input[position..], origin + position) {
            Ok(record) => {
                position += record.span.len();
                records.push(record);
            }
            Err(e) => {
                if let Some(last) = records.last_mut() {
                    report(
                        &mut last.record_diagnostics,
                        Diagnostic::warning(
                            DiagnosticKind::TrailingData,
                            e.details,
                            origin + position..origin + input.len(),
                        ),
                    );
                }
                break;
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a record with a 4-5 directory from `(tag, content)`
    /// pairs. Content includes its field terminator.
    pub fn record(fields: &[(&str, &[u8])]) -> Vec<u8> {
        let mut directory: Vec<u8> = Vec::new();
        let mut data: Vec<u8> = Vec::new();
        for (tag, content) in fields {
            directory.extend(format!("{tag}{:04}{:05}", content.len(), data.len()).bytes());
            data.extend_from_slice(content);
        }
        directory.push(FIELD_TERMINATOR);
        let base = LEADER_LENGTH + directory.len();
        let length = base + data.len() + 1;
        let mut record = format!("{length:05}nam a22{base:05} a 4500").into_bytes();
        record.extend(directory);
        record.extend(data);
        record.push(RECORD_TERMINATOR);
        record
    }

    pub fn sample() -> Vec<u8> {
        record(&[
            ("001", b"ocm123\x1e"),
            ("245", b"10\x1faThe cat\x1fcby Someone\x1e"),
            ("650", b" 0\x1faCats\x1e"),
        ])
    }

    #[test]
    fn decodes_well_formed_record() {
        let input = sample();
        let record = decode_record(&input, 0).unwrap();
        assert!(record.diagnostics().is_empty(), "{:?}", record.diagnostics());
        assert_eq!(record.span, 0..input.len());
        assert_eq!(record.fields.len(), 3);
        assert_eq!(
            record.field("001").unwrap().content,
            FieldContent::Control(b"ocm123".to_vec())
        );
        let title = record.field("245").unwrap();
        let FieldContent::Data { indicators, subfields } = &title.content else {
            panic!("245 is not a data field")
        };
        assert_eq!(indicators, b"10");
        assert_eq!(subfields.len(), 2);
        assert_eq!(subfields[0].code, "a");
        assert_eq!(subfields[0].value, b"The cat");
        assert_eq!(subfields[1].code, "c");
        assert_eq!(subfields[1].value, b"by Someone");
    }

    #[test]
    fn rejects_input_without_leader() {
        let err = decode_record(b"00024nam", 7).unwrap_err();
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn reports_truncated_records() {
        let mut input = sample();
        input.truncate(input.len() - 5);
        let record = decode_record(&input, 0).unwrap();
        assert_eq!(record.record_diagnostics.len(), 1);
        assert_eq!(
            record.record_diagnostics[0].kind,
            DiagnosticKind::InvalidRecordLength
        );
        assert_eq!(record.field("001").unwrap().content, FieldContent::Control(b"ocm123".to_vec()));
    }

    #[test]
    fn reports_missing_record_terminator() {
        let mut input = sample();
        let last = input.len() - 1;
        input[last] = b'x';
        let record = decode_record(&input, 0).unwrap();
        let kinds: Vec<_> = record.diagnostics().iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DiagnosticKind::InvalidRecordLength]);
    }

    #[test]
    fn decodes_consecutive_records() {
        let mut input = sample();
        let first = input.len();
        input.extend(record(&[("008", b"830415s1983\x1e")]));
        input.extend(b"\x00\x00");
        let records = decode_records(&input, 100).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].span.start, 100 + first);
        assert_eq!(records[1].fields[0].tag, "008");
        assert_eq!(records[1].record_diagnostics.len(), 1);
        assert_eq!(
            records[1].record_diagnostics[0].kind,
            DiagnosticKind::TrailingData
        );
    }
}
