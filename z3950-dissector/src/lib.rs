//! The `z3950-dissector` crate turns the byte stream of a Z39.50 or
//! PDC connection into decoded value trees.
//!
//! A [`framer::Framer`] cuts the stream into complete messages, the
//! [`router`] selects the top-level PDU and the [`profile::Z3950Profile`]
//! interprets what BER alone cannot: the record syntaxes carried in
//! EXTERNALs, bib-1 attributes and diag-1 conditions.
//!
//! ```rust
//! use z3950_dissector::{config::{DissectorConfig, Protocol}, Dissector};
//!
//! let dissector = Dissector::new(DissectorConfig::default());
//! let close = [0xBF, 0x30, 0x05, 0x9F, 0x81, 0x53, 0x01, 0x00];
//! let node = dissector.dissect(Protocol::Z3950, &close).unwrap();
//! assert_eq!(node.get("close.closeReason").unwrap().display.as_deref(), Some("finished"));
//! ```
pub mod config;
pub mod framer;
pub mod marc;
pub mod mpdu;
pub mod profile;
pub mod router;

use core::fmt::{self, Display, Formatter};
use std::error::Error;

use config::{DissectorConfig, Protocol};
use framer::{FrameError, Framer};
use pdc::PdcError;
use z3950_transcoder::{error::DecodingError, value::Node};

#[derive(Debug, Clone)]
pub enum DissectError {
    Ber(DecodingError),
    Pdc(PdcError),
    Frame(FrameError),
}

impl Error for DissectError {}

impl Display for DissectError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DissectError::Ber(e) => e.fmt(f),
            DissectError::Pdc(e) => e.fmt(f),
            DissectError::Frame(e) => e.fmt(f),
        }
    }
}

impl From<DecodingError> for DissectError {
    fn from(value: DecodingError) -> Self {
        DissectError::Ber(value)
    }
}

impl From<PdcError> for DissectError {
    fn from(value: PdcError) -> Self {
        DissectError::Pdc(value)
    }
}

impl From<FrameError> for DissectError {
    fn from(value: FrameError) -> Self {
        DissectError::Frame(value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dissector {
    config: DissectorConfig,
}

impl Dissector {
    pub fn new(config: DissectorConfig) -> Self {
        Dissector { config }
    }

    pub fn config(&self) -> &DissectorConfig {
        &self.config
    }

    /// A framer for one direction of a connection.
    pub fn framer(&self, protocol: Protocol) -> Framer {
        Framer::new(protocol, &self.config)
    }

    /// Decodes one complete message. Spans are relative to `message`.
    pub fn dissect(&self, protocol: Protocol, message: &[u8]) -> Result<Node, DissectError> {
        match protocol {
            Protocol::Z3950 => Ok(router::dissect_z3950(message, self.config.decoder)?),
            Protocol::Pdc => Ok(router::dissect_pdc(message, 0)?),
        }
    }

    /// Decodes every message that `segment` completes on a connection
    /// to `port`. Ports without a registered protocol yield nothing.
    /// Messages the framer dropped for their length yield a
    /// [`DissectError::Frame`].
    pub fn dissect_segment(
        &self,
        framer: &mut Framer,
        port: u16,
        segment: &[u8],
    ) -> Vec<Result<Node, DissectError>> {
        let Some(protocol) = self.config.protocol_for_port(port) else {
            return Vec::new();
        };
        framer
            .push(segment)
            .into_iter()
            .map(|frame| {
                let frame = frame?;
                log::debug!("{protocol:?} message of {} octets at {}", frame.bytes.len(), frame.offset);
                self.dissect(protocol, &frame.bytes)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dissects_segments_by_port() {
        let dissector = Dissector::new(DissectorConfig::default().pdc_ports([4000]));
        let mut framer = dissector.framer(Protocol::Pdc);
        let results = dissector.dissect_segment(&mut framer, 4000, &[2, 6, 9]);
        assert!(results.is_empty());
        let results = dissector.dissect_segment(&mut framer, 4000, &[3]);
        let edmpdu = results[0].as_ref().unwrap();
        assert_eq!(edmpdu.name, "EDMPDU");
        assert_eq!(edmpdu.get("seq_nr").and_then(Node::as_integer), Some(9));
        assert!(dissector.dissect_segment(&mut framer, 5000, &[2, 6, 9, 3]).is_empty());
    }

    #[test]
    fn wraps_decoding_errors() {
        let dissector = Dissector::default();
        let error = dissector.dissect(Protocol::Z3950, &[0xBF, 0x30, 0x09]).unwrap_err();
        assert!(matches!(error, DissectError::Ber(_)));
        let error = dissector.dissect(Protocol::Pdc, &[2]).unwrap_err();
        assert!(error.to_string().contains("PDC"));
    }

    #[test]
    fn reports_oversized_messages() {
        let dissector = Dissector::new(DissectorConfig::default().max_message_length(64));
        let mut framer = dissector.framer(Protocol::Z3950);
        let results = dissector.dissect_segment(&mut framer, 210, &[0xB6, 0x82, 0x10, 0x00]);
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(DissectError::Frame(_))));
        assert_eq!(framer.pending(), 0);
    }
}
