//! Variable part parameters, `[type][length][value]`.
use std::ops::Range;

use nom::{
    bytes::complete::take,
    number::complete::u8 as octet,
    sequence::pair,
    IResult,
};
use z3950_transcoder::value::{Diagnostic, DiagnosticKind};

use crate::report;

pub const MAX_MPDU_SIZE: u8 = 1;
pub const VERSION_NUMBER: u8 = 2;
pub const CHECKSUM: u8 = 3;
pub const DISCONNECT_INFO: u8 = 4;
pub const ADMU_TIMER: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
    Number(u64),
    /// Disconnect information text, as received
    Text(Vec<u8>),
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub code: u8,
    pub value: ParameterValue,
    pub span: Range<usize>,
}

impl Parameter {
    pub fn name(&self) -> &'static str {
        parameter_name(self.code)
    }
}

pub fn parameter_name(code: u8) -> &'static str {
    match code {
        MAX_MPDU_SIZE => "Max MPDU Size",
        VERSION_NUMBER => "Version Number",
        CHECKSUM => "Checksum",
        DISCONNECT_INFO => "Disconnect Info",
        ADMU_TIMER => "ADMU Timer",
        _ => "Unknown",
    }
}

/// Width of the numeric parameters
fn numeric_width(code: u8) -> Option<usize> {
    match code {
        VERSION_NUMBER => Some(1),
        MAX_MPDU_SIZE | CHECKSUM | ADMU_TIMER => Some(2),
        _ => None,
    }
}

fn parameter(input: &[u8]) -> IResult<&[u8], (u8, &[u8])> {
    let (input, (code, length)) = pair(octet, octet)(input)?;
    let (input, value) = take(length)(input)?;
    Ok((input, (code, value)))
}

/// Parses parameters until `input` is used up or a parameter does
/// not fit. Returns the parameters and the number of bytes they take.
pub(crate) fn parse_parameters(
    mut input: &[u8],
    offset: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> (Vec<Parameter>, usize) {
    let mut parameters = Vec::new();
    let mut consumed = 0;
    while !input.is_empty() {
        let start = offset + consumed;
        let Ok((rest, (code, value))) = parameter(input) else {
            report(
                diagnostics,
                Diagnostic::warning(
                    DiagnosticKind::InvalidValue,
                    "parameter exceeds the MPDU",
                    start..start + input.len(),
                ),
            );
            break;
        };
        let length = input.len() - rest.len();
        let span = start..start + length;
        let value = match (code, numeric_width(code)) {
            (_, Some(width)) if width == value.len() => ParameterValue::Number(
                value.iter().fold(0u64, |acc, b| acc << 8 | u64::from(*b)),
            ),
            (_, Some(width)) => {
                report(
                    diagnostics,
                    Diagnostic::warning(
                        DiagnosticKind::InvalidValue,
                        format!(
                            "{} of {} bytes, expected {width}",
                            parameter_name(code),
                            value.len()
                        ),
                        span.clone(),
                    ),
                );
                ParameterValue::Raw(value.to_vec())
            }
            (DISCONNECT_INFO, None) => ParameterValue::Text(value.to_vec()),
            (_, None) => ParameterValue::Raw(value.to_vec()),
        };
        parameters.push(Parameter { code, value, span });
        consumed += length;
        input = rest;
    }
    (parameters, consumed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_and_unknown_parameters() {
        let mut diagnostics = Vec::new();
        let (parameters, consumed) = parse_parameters(
            &[1, 2, 0x04, 0x00, 4, 3, b'b', b'y', b'e', 9, 1, 0xAA],
            10,
            &mut diagnostics,
        );
        assert!(diagnostics.is_empty());
        assert_eq!(consumed, 12);
        assert_eq!(parameters[0].name(), "Max MPDU Size");
        assert_eq!(parameters[0].value, ParameterValue::Number(1024));
        assert_eq!(parameters[0].span, 10..14);
        assert_eq!(parameters[1].value, ParameterValue::Text(b"bye".to_vec()));
        assert_eq!(parameters[2].name(), "Unknown");
        assert_eq!(parameters[2].value, ParameterValue::Raw(vec![0xAA]));
    }

    #[test]
    fn stops_at_truncated_parameter() {
        let mut diagnostics = Vec::new();
        let (parameters, consumed) =
            parse_parameters(&[2, 1, 2, 5, 4, 0x00], 0, &mut diagnostics);
        assert_eq!(parameters.len(), 1);
        assert_eq!(consumed, 3);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span, 3..6);
    }

    #[test]
    fn keeps_numeric_parameters_of_unexpected_width() {
        let mut diagnostics = Vec::new();
        let (parameters, _) = parse_parameters(&[2, 2, 0, 3], 0, &mut diagnostics);
        assert_eq!(parameters[0].value, ParameterValue::Raw(vec![0, 3]));
        assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidValue);
    }
}
