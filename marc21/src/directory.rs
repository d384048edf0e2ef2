use std::ops::Range;

use crate::{
    leader::number, report, Diagnostic, DiagnosticKind, Leader, FIELD_TERMINATOR, LEADER_LENGTH,
};

/// Location of one field in the data area.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryEntry {
    pub tag: String,
    /// Length of the field including its terminator
    pub length: Option<usize>,
    /// Offset of the field relative to the base address of data
    pub starting_position: Option<usize>,
    pub span: Range<usize>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DirectoryEntry {
    /// Control fields `001` to `009` carry no indicators or subfields.
    pub fn is_control_field(&self) -> bool {
        number(self.tag.as_bytes()).map_or(false, |tag| tag < 10)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    pub entries: Vec<DirectoryEntry>,
    pub span: Range<usize>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Directory {
    /// Reads the `(base - 1 - 24) / width` entries between the leader
    /// and the directory terminator at `base - 1`.
    pub(crate) fn parse(record: &[u8], leader: &Leader, origin: usize) -> Directory {
        let mut diagnostics = Vec::new();
        let base = leader.base_address_of_data.clamp(LEADER_LENGTH, record.len());
        let end = base.saturating_sub(1).max(LEADER_LENGTH);
        let width = leader.entry_width();
        let count = (end - LEADER_LENGTH) / width;

        if record.get(end) != Some(&FIELD_TERMINATOR) || base == LEADER_LENGTH {
            report(
                &mut diagnostics,
                Diagnostic::error(
                    DiagnosticKind::MissingTerminator,
                    "directory is not terminated by a field terminator",
                    origin + end..origin + (end + 1).min(record.len()),
                ),
            );
        }
        let leftover = LEADER_LENGTH + count * width..end;
        if !leftover.is_empty() {
            report(
                &mut diagnostics,
                Diagnostic::warning(
                    DiagnosticKind::InvalidDirectoryEntry,
                    format!(
                        "{} bytes do not fill a directory entry of {width} bytes",
                        leftover.len()
                    ),
                    origin + leftover.start..origin + leftover.end,
                ),
            );
        }

        let data_length = leader.record_length.saturating_sub(base);
        let entries = (0..count)
            .map(|i| {
                let start = LEADER_LENGTH + i * width;
                parse_entry(&record[start..start + width], leader, origin + start, data_length)
            })
            .collect();

        Directory {
            entries,
            span: origin + LEADER_LENGTH..origin + base,
            diagnostics,
        }
    }
}

fn parse_entry(
    bytes: &[u8],
    leader: &Leader,
    offset: usize,
    data_length: usize,
) -> DirectoryEntry {
    let mut diagnostics = Vec::new();
    let tag = String::from_utf8_lossy(&bytes[..3]).into_owned();
    let length_end = 3 + leader.length_of_field_length;
    let position_end = length_end + leader.starting_character_position_length;

    let mut numeric = |name: &str, range: Range<usize>| {
        let value = number(&bytes[range.clone()]);
        if value.is_none() {
            report(
                &mut diagnostics,
                Diagnostic::error(
                    DiagnosticKind::InvalidValue,
                    format!(
                        "{tag}: {name} {:?} is not a number",
                        String::from_utf8_lossy(&bytes[range.clone()])
                    ),
                    offset + range.start..offset + range.end,
                ),
            );
        }
        value
    };
    let length = numeric("field length", 3..length_end);
    let starting_position = numeric("starting character position", length_end..position_end);

    if let (Some(length), Some(start)) = (length, starting_position) {
        if start + length > data_length {
            report(
                &mut diagnostics,
                Diagnostic::error(
                    DiagnosticKind::InvalidDirectoryEntry,
                    format!(
                        "{tag}: field at {start} of {length} bytes exceeds the {data_length} bytes of data"
                    ),
                    offset..offset + bytes.len(),
                ),
            );
        }
    }

    DirectoryEntry {
        tag,
        length,
        starting_position,
        span: offset..offset + bytes.len(),
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{record, sample};

    #[test]
    fn reads_exactly_the_computed_entry_count() {
        let input = record(&[
            ("001", b"a\x1e"),
            ("005", b"b\x1e"),
            ("100", b"  \x1fac\x1e"),
            ("245", b"00\x1fad\x1e"),
        ]);
        let leader = Leader::parse(&input, 0);
        let base = leader.base_address_of_data;
        assert_eq!((base - 1 - 24) / 12, 4);
        let directory = Directory::parse(&input, &leader, 0);
        assert!(directory.diagnostics.is_empty());
        assert_eq!(directory.entries.len(), 4);
        assert_eq!(input[base - 1], FIELD_TERMINATOR);
        let tags: Vec<_> = directory.entries.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["001", "005", "100", "245"]);
        assert_eq!(directory.entries[2].length, Some(6));
        assert_eq!(directory.entries[2].starting_position, Some(4));
        assert_eq!(directory.entries[3].span, 60..72);
        assert!(directory.entries[1].is_control_field());
        assert!(!directory.entries[2].is_control_field());
    }

    #[test]
    fn reports_entries_beyond_the_data() {
        let mut input = sample();
        // starting position of the third entry
        input[24 + 2 * 12 + 7..24 + 3 * 12].copy_from_slice(b"99999");
        let leader = Leader::parse(&input, 0);
        let directory = Directory::parse(&input, &leader, 0);
        let entry = &directory.entries[2];
        assert_eq!(entry.diagnostics.len(), 1);
        assert_eq!(entry.diagnostics[0].kind, DiagnosticKind::InvalidDirectoryEntry);
    }

    #[test]
    fn reports_unterminated_directory() {
        let mut input = sample();
        input[24 + 3 * 12] = b'#';
        let leader = Leader::parse(&input, 0);
        let directory = Directory::parse(&input, &leader, 0);
        assert_eq!(directory.entries.len(), 3);
        assert_eq!(directory.diagnostics.len(), 1);
        assert_eq!(directory.diagnostics[0].kind, DiagnosticKind::MissingTerminator);
    }
}
