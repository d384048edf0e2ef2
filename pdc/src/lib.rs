//! The `pdc` crate decodes the MPDUs of the PDC protocol.
//!
//! Every MPDU starts with a length indicator and a type code. The
//! length indicator counts the octets behind the type code, so a
//! complete MPDU takes `LI + 2` octets. The fixed part of each type
//! is followed by a list of parameters or by user data.
//!
//! ```rust
//! let mpdu = pdc::dissect(&[9, 1, 5, 1, 0, 0, 0, 1, 2, 1, 2], 0).unwrap();
//! assert_eq!(mpdu.kind, Some(pdc::MpduType::Simpdu));
//! assert_eq!(mpdu.field("state").unwrap().display, Some("Operational"));
//! ```
mod parameter;

use core::fmt::{Display, Formatter};
use std::{error::Error, ops::Range};

use nom::{
    number::complete::{be_u16, be_u32, u8 as octet},
    IResult,
};
use z3950_transcoder::value::{Diagnostic, DiagnosticKind};

pub use parameter::{parameter_name, Parameter, ParameterValue};

/// Length indicator and type code
pub const HEADER_LENGTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpduType {
    /// Start initialise
    Simpdu,
    /// Restart
    Rsmpdu,
    /// Disconnect
    Drmpdu,
    /// Data
    Dtmpdu,
    /// Administrative
    Admpdu,
    /// Expedited data
    Edmpdu,
    /// Acknowledge
    Akmpdu,
}

impl MpduType {
    pub fn from_code(code: u8) -> Option<MpduType> {
        match code {
            1 => Some(MpduType::Simpdu),
            2 => Some(MpduType::Rsmpdu),
            3 => Some(MpduType::Drmpdu),
            4 => Some(MpduType::Dtmpdu),
            5 => Some(MpduType::Admpdu),
            6 => Some(MpduType::Edmpdu),
            8 => Some(MpduType::Akmpdu),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MpduType::Simpdu => "SIMPDU",
            MpduType::Rsmpdu => "RSMPDU",
            MpduType::Drmpdu => "DRMPDU",
            MpduType::Dtmpdu => "DTMPDU",
            MpduType::Admpdu => "ADMPDU",
            MpduType::Edmpdu => "EDMPDU",
            MpduType::Akmpdu => "AKMPDU",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdcError {
    pub details: String,
}

impl Error for PdcError {}

impl Display for PdcError {
    fn fmt(&self, f: &mut Formatter) -> core::fmt::Result {
        write!(f, "Error decoding PDC MPDU: {}", self.details)
    }
}

/// A numeric field of the fixed part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub value: u64,
    pub display: Option<&'static str>,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mpdu {
    pub length_indicator: u8,
    pub code: u8,
    pub kind: Option<MpduType>,
    pub fields: Vec<Field>,
    pub parameters: Vec<Parameter>,
    pub user_data: Option<Range<usize>>,
    /// Octets decoded, header included
    pub consumed: usize,
    pub span: Range<usize>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Mpdu {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Octets decoded behind the header
    pub fn type_specific_length(&self) -> usize {
        self.consumed - HEADER_LENGTH
    }
}

pub fn state_name(state: u8) -> Option<&'static str> {
    match state {
        1 => Some("Operational"),
        2 => Some("Not Operational"),
        3 => Some("Maintenance"),
        _ => None,
    }
}

pub fn reason_name(reason: u8) -> Option<&'static str> {
    match reason {
        0 => Some("Normal"),
        1 => Some("Congestion"),
        2 => Some("Protocol Error"),
        3 => Some("Timer Expired"),
        _ => None,
    }
}

pub(crate) fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    log::warn!(
        "PDC {:?} at {:?}: {}",
        diagnostic.kind,
        diagnostic.span,
        diagnostic.details
    );
    diagnostics.push(diagnostic);
}

/// Size of the MPDU at the start of `input`, `None` until the length
/// indicator has arrived.
pub fn frame_length(input: &[u8]) -> Option<usize> {
    input.first().map(|li| *li as usize + HEADER_LENGTH)
}

#[derive(Clone, Copy)]
enum Width {
    U8,
    U16,
    U32,
    /// The top bit of one octet
    Flag,
}

fn item(width: Width, input: &[u8]) -> IResult<&[u8], u64> {
    match width {
        Width::U8 => octet(input).map(|(rest, v)| (rest, u64::from(v))),
        Width::U16 => be_u16(input).map(|(rest, v)| (rest, u64::from(v))),
        Width::U32 => be_u32(input).map(|(rest, v)| (rest, u64::from(v))),
        Width::Flag => octet(input).map(|(rest, v)| (rest, u64::from(v >> 7))),
    }
}

type Layout = &'static [(&'static str, Width)];

const SIMPDU: Layout = &[
    ("credit", Width::U8),
    ("state", Width::U8),
    ("yr_admu_nr", Width::U32),
];
const RSMPDU: Layout = &[
    ("credit", Width::U8),
    ("state", Width::U8),
    ("yr_admu_nr", Width::U32),
    ("my_admu_nr", Width::U32),
];
const DRMPDU: Layout = &[("yr_admu_nr", Width::U32), ("reason", Width::U8)];
const DTMPDU: Layout = &[("eot", Width::Flag), ("seq_nr", Width::U16)];
const ADMPDU: Layout = &[("my_admu_nr", Width::U32), ("yr_admu_nr", Width::U32)];
const EDMPDU: Layout = &[("seq_nr", Width::U8)];
const AKMPDU: Layout = &[("credit", Width::U8), ("seq_nr", Width::U16)];

/// Fixed part and what follows it
fn layout(kind: MpduType) -> (Layout, bool) {
    match kind {
        MpduType::Simpdu => (SIMPDU, false),
        MpduType::Rsmpdu => (RSMPDU, false),
        MpduType::Drmpdu => (DRMPDU, false),
        MpduType::Dtmpdu => (DTMPDU, true),
        MpduType::Admpdu => (ADMPDU, false),
        MpduType::Edmpdu => (EDMPDU, true),
        MpduType::Akmpdu => (AKMPDU, false),
    }
}

fn describe(name: &str, value: u64) -> Option<&'static str> {
    let value = u8::try_from(value).ok()?;
    match name {
        "state" => state_name(value),
        "reason" => reason_name(value),
        _ => None,
    }
}

/// Decodes the MPDU at the start of `input`. `origin` is the absolute
/// offset of `input`.
///
/// Fails only without a complete header. A body that is shorter or
/// longer than the length indicator announces is decoded as far as
/// possible and reported in the diagnostics.
pub fn dissect(input: &[u8], origin: usize) -> Result<Mpdu, PdcError> {
    let [length_indicator, code, ..] = *input else {
        return Err(PdcError {
            details: format!("{} octets cannot hold an MPDU header", input.len()),
        });
    };
    let mut diagnostics = Vec::new();
    let declared = length_indicator as usize + HEADER_LENGTH;
    if declared > input.len() {
        report(
            &mut diagnostics,
            Diagnostic::error(
                DiagnosticKind::InvalidValue,
                format!(
                    "length indicator announces {declared} octets, {} available",
                    input.len()
                ),
                origin..origin + 1,
            ),
        );
    }
    let body = &input[HEADER_LENGTH..declared.min(input.len())];
    let kind = MpduType::from_code(code);
    log::debug!(
        "PDC {} with {} octets",
        kind.map_or("unknown MPDU", |k| k.name()),
        body.len()
    );

    let mut mpdu = Mpdu {
        length_indicator,
        code,
        kind,
        fields: Vec::new(),
        parameters: Vec::new(),
        user_data: None,
        consumed: HEADER_LENGTH,
        span: origin..origin + declared.min(input.len()),
        diagnostics: Vec::new(),
    };
    let Some(kind) = kind else {
        report(
            &mut diagnostics,
            Diagnostic::warning(
                DiagnosticKind::InvalidValue,
                format!("unknown MPDU code {code}"),
                origin + 1..origin + 2,
            ),
        );
        mpdu.diagnostics = diagnostics;
        return Ok(mpdu);
    };

    let (fixed, carries_user_data) = layout(kind);
    let mut rest = body;
    for &(name, width) in fixed {
        let offset = origin + HEADER_LENGTH + (body.len() - rest.len());
        match item(width, rest) {
            Ok((remaining, value)) => {
                let span = offset..offset + (rest.len() - remaining.len());
                mpdu.fields.push(Field {
                    name,
                    value,
                    display: describe(name, value),
                    span,
                });
                rest = remaining;
            }
            Err(_) => {
                report(
                    &mut diagnostics,
                    Diagnostic::error(
                        DiagnosticKind::InvalidValue,
                        format!("{} ends before {name}", kind.name()),
                        offset..origin + HEADER_LENGTH + body.len(),
                    ),
                );
                break;
            }
        }
    }
    let fixed_length = body.len() - rest.len();
    let variable_offset = origin + HEADER_LENGTH + fixed_length;

    let variable_length = if mpdu.fields.len() < fixed.len() {
        0
    } else if carries_user_data {
        mpdu.user_data = Some(variable_offset..variable_offset + rest.len());
        rest.len()
    } else {
        let (parameters, consumed) =
            parameter::parse_parameters(rest, variable_offset, &mut diagnostics);
        mpdu.parameters = parameters;
        consumed
    };
    mpdu.consumed = HEADER_LENGTH + fixed_length + variable_length;

    if mpdu.consumed < declared && declared <= input.len() {
        report(
            &mut diagnostics,
            Diagnostic::warning(
                DiagnosticKind::TrailingData,
                format!(
                    "{} decoded {} of {declared} octets",
                    kind.name(),
                    mpdu.consumed
                ),
                origin + mpdu.consumed..origin + declared,
            ),
        );
    }
    mpdu.diagnostics = diagnostics;
    Ok(mpdu)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dissects_start_initialise() {
        let mpdu = dissect(&[9, 1, 5, 1, 0, 0, 0, 1, 2, 1, 2], 0).unwrap();
        assert!(mpdu.diagnostics.is_empty());
        assert_eq!(mpdu.kind, Some(MpduType::Simpdu));
        assert_eq!(mpdu.field("credit").unwrap().value, 5);
        assert_eq!(mpdu.field("state").unwrap().display, Some("Operational"));
        assert_eq!(mpdu.field("yr_admu_nr").unwrap().value, 1);
        assert_eq!(mpdu.field("yr_admu_nr").unwrap().span, 4..8);
        assert_eq!(mpdu.parameters.len(), 1);
        assert_eq!(mpdu.parameters[0].name(), "Version Number");
        assert_eq!(mpdu.parameters[0].value, ParameterValue::Number(2));
        assert_eq!(mpdu.consumed, 11);
        assert_eq!(mpdu.type_specific_length(), 9);
    }

    #[test]
    fn dissects_data_with_user_data() {
        let mpdu = dissect(&[6, 4, 0x80, 0x01, 0x02, b'a', b'b', b'c'], 20).unwrap();
        assert_eq!(mpdu.field("eot").unwrap().value, 1);
        assert_eq!(mpdu.field("seq_nr").unwrap().value, 0x0102);
        assert_eq!(mpdu.user_data, Some(25..28));
        assert_eq!(mpdu.consumed, 8);
    }

    #[test]
    fn dissects_disconnect_reason() {
        let mpdu = dissect(&[5, 3, 0, 0, 0, 7, 2], 0).unwrap();
        assert_eq!(mpdu.kind, Some(MpduType::Drmpdu));
        assert_eq!(mpdu.field("yr_admu_nr").unwrap().value, 7);
        assert_eq!(mpdu.field("reason").unwrap().display, Some("Protocol Error"));
    }

    #[test]
    fn decodes_nothing_behind_unknown_codes() {
        let mpdu = dissect(&[2, 7, 0xAA, 0xBB], 0).unwrap();
        assert_eq!(mpdu.kind, None);
        assert!(mpdu.fields.is_empty());
        assert_eq!(mpdu.type_specific_length(), 0);
        assert_eq!(mpdu.diagnostics.len(), 1);
    }

    #[test]
    fn reports_short_fixed_part() {
        let mpdu = dissect(&[3, 2, 5, 1, 0], 0).unwrap();
        assert_eq!(mpdu.fields.len(), 2);
        assert_eq!(mpdu.consumed, 4);
        assert_eq!(mpdu.diagnostics[0].kind, DiagnosticKind::InvalidValue);
    }

    #[test]
    fn reports_truncated_mpdus() {
        let mpdu = dissect(&[9, 1, 5, 1, 0, 0], 0).unwrap();
        assert_eq!(mpdu.diagnostics[0].span, 0..1);
        assert_eq!(mpdu.fields.len(), 2);
    }

    #[test]
    fn requires_a_header() {
        assert!(dissect(&[9], 0).is_err());
        assert_eq!(frame_length(&[9]), Some(11));
        assert_eq!(frame_length(&[]), None);
    }
}
