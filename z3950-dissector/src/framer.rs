//! Reassembles a TCP byte stream into complete protocol messages.
use core::fmt::{self, Display, Formatter};
use std::error::Error;

use z3950_transcoder::{ber::header::message_length, error::DecodingError};

use crate::config::{DissectorConfig, Protocol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLength {
    Complete(usize),
    /// More bytes are needed before the length is known
    Incomplete,
}

/// Size of the message at the start of `input`.
pub fn frame_length(
    protocol: Protocol,
    input: &[u8],
    max_depth: usize,
) -> Result<FrameLength, DecodingError> {
    let length = match protocol {
        Protocol::Z3950 => message_length(input, max_depth)?,
        Protocol::Pdc => pdc::frame_length(input),
    };
    Ok(length.map_or(FrameLength::Incomplete, FrameLength::Complete))
}

/// One complete message and its offset in the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

/// A message that was dropped instead of being buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameError {
    pub details: String,
    /// Stream offset of the dropped message
    pub offset: usize,
}

impl Error for FrameError {}

impl Display for FrameError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Error framing message at stream offset {}: {}", self.offset, self.details)
    }
}

/// Accumulates the payload of one direction of a connection.
#[derive(Debug, Clone)]
pub struct Framer {
    protocol: Protocol,
    desegment: bool,
    max_depth: usize,
    max_message_length: usize,
    buffer: Vec<u8>,
    /// Stream offset of the first buffered byte
    offset: usize,
    /// Octets of a dropped message that have not arrived yet
    discard: usize,
}

impl Framer {
    pub fn new(protocol: Protocol, config: &DissectorConfig) -> Self {
        Framer {
            protocol,
            desegment: config.desegment,
            max_depth: config.decoder.max_depth,
            max_message_length: config.max_message_length,
            buffer: Vec::new(),
            offset: 0,
            discard: 0,
        }
    }

    /// Number of bytes waiting for the rest of their message
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Appends one segment and returns the messages it completes.
    ///
    /// Without desegmentation every segment is handed out as one
    /// message. A message whose length cannot be determined is handed
    /// out with everything buffered behind it, so that decoding
    /// reports the malformed header. A message longer than the
    /// configured maximum is never buffered: it yields a
    /// [`FrameError`] and its octets are dropped as they arrive.
    pub fn push(&mut self, segment: &[u8]) -> Vec<Result<Frame, FrameError>> {
        if !self.desegment {
            let frame = Frame {
                offset: self.offset,
                bytes: segment.to_vec(),
            };
            self.offset += segment.len();
            return vec![Ok(frame)];
        }
        let skipped = self.discard.min(segment.len());
        self.discard -= skipped;
        self.offset += skipped;
        self.buffer.extend_from_slice(&segment[skipped..]);

        let mut frames = Vec::new();
        while !self.buffer.is_empty() {
            let length = match frame_length(self.protocol, &self.buffer, self.max_depth) {
                Ok(FrameLength::Complete(n)) if n > self.max_message_length => {
                    frames.push(Err(self.drop_message(n, format!("declares {n} octets"))));
                    continue;
                }
                Ok(FrameLength::Complete(n)) if n <= self.buffer.len() => n,
                Ok(FrameLength::Complete(n)) => {
                    log::debug!("waiting for {} of {n} octets", n - self.buffer.len());
                    break;
                }
                Ok(FrameLength::Incomplete) if self.buffer.len() > self.max_message_length => {
                    let buffered = self.buffer.len();
                    frames.push(Err(self.drop_message(
                        buffered,
                        format!("{buffered} octets without an end of contents"),
                    )));
                    continue;
                }
                Ok(FrameLength::Incomplete) => break,
                Err(e) => {
                    log::debug!("flushing {} octets with a malformed header: {e}", self.buffer.len());
                    self.buffer.len()
                }
            };
            let rest = self.buffer.split_off(length);
            frames.push(Ok(Frame {
                offset: self.offset,
                bytes: std::mem::replace(&mut self.buffer, rest),
            }));
            self.offset += length;
        }
        frames
    }

    /// Drops the `length` octets of the message at the head of the buffer,
    /// including those still to come.
    fn drop_message(&mut self, length: usize, details: String) -> FrameError {
        let error = FrameError {
            details: format!("{details}, more than the limit of {}", self.max_message_length),
            offset: self.offset,
        };
        log::warn!("{error}");
        let buffered = length.min(self.buffer.len());
        self.buffer.drain(..buffered);
        self.offset += buffered;
        self.discard = length - buffered;
        error
    }

    /// Hands out whatever is buffered, complete or not.
    pub fn flush(&mut self) -> Option<Frame> {
        if self.buffer.is_empty() {
            return None;
        }
        let bytes = std::mem::take(&mut self.buffer);
        let frame = Frame {
            offset: self.offset,
            bytes,
        };
        self.offset += frame.bytes.len();
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOSE: [u8; 8] = [0xBF, 0x30, 0x05, 0x9F, 0x81, 0x53, 0x01, 0x00];

    fn framer(protocol: Protocol) -> Framer {
        Framer::new(protocol, &DissectorConfig::default())
    }

    fn frames(results: Vec<Result<Frame, FrameError>>) -> Vec<Frame> {
        results.into_iter().map(Result::unwrap).collect()
    }

    #[test]
    fn waits_for_the_rest_of_a_message() {
        let mut framer = framer(Protocol::Z3950);
        assert!(framer.push(&CLOSE[..1]).is_empty());
        assert!(framer.push(&CLOSE[1..5]).is_empty());
        assert_eq!(framer.pending(), 5);
        let frames = frames(framer.push(&CLOSE[5..]));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].bytes, CLOSE);
        assert_eq!(framer.pending(), 0);
    }

    #[test]
    fn splits_coalesced_messages() {
        let mut framer = framer(Protocol::Z3950);
        let mut stream = CLOSE.to_vec();
        stream.extend_from_slice(&CLOSE);
        stream.extend_from_slice(&CLOSE[..3]);
        let frames = frames(framer.push(&stream));
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].offset, 8);
        assert_eq!(framer.pending(), 3);
    }

    #[test]
    fn frames_indefinite_lengths() {
        let message = [0xBF, 0x30, 0x80, 0x9F, 0x81, 0x53, 0x01, 0x00, 0x00, 0x00];
        assert_eq!(
            frame_length(Protocol::Z3950, &message, 64).unwrap(),
            FrameLength::Complete(10)
        );
        assert_eq!(
            frame_length(Protocol::Z3950, &message[..8], 64).unwrap(),
            FrameLength::Incomplete
        );
    }

    #[test]
    fn frames_pdc_by_its_length_indicator() {
        let mut framer = framer(Protocol::Pdc);
        let frames = frames(framer.push(&[2, 6, 9, 3, 6]));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].bytes, vec![2, 6, 9, 3]);
        assert_eq!(framer.flush().map(|f| f.bytes), Some(vec![6]));
        assert_eq!(framer.flush(), None);
    }

    #[test]
    fn passes_segments_through_without_desegmentation() {
        let config = DissectorConfig::default().desegment(false);
        let mut framer = Framer::new(Protocol::Z3950, &config);
        let first = frames(framer.push(&CLOSE[..3]));
        assert_eq!(first[0].bytes, CLOSE[..3].to_vec());
        assert_eq!(frames(framer.push(&CLOSE[3..]))[0].offset, 3);
    }

    #[test]
    fn drops_messages_beyond_the_length_limit() {
        let config = DissectorConfig::default().max_message_length(16);
        let mut framer = Framer::new(Protocol::Z3950, &config);
        // searchRequest declaring 4 GiB of content
        let results = framer.push(&[0xB6, 0x84, 0xFF, 0xFF, 0xFF, 0xFF, 0x80, 0x01]);
        assert_eq!(results.len(), 1);
        let error = results[0].clone().unwrap_err();
        assert_eq!(error.offset, 0);
        assert!(error.details.contains("declares"));
        assert_eq!(framer.pending(), 0);

        assert!(framer.push(&[0x00; 1024]).is_empty());
        assert_eq!(framer.pending(), 0);
    }

    #[test]
    fn resumes_behind_a_dropped_message() {
        let config = DissectorConfig::default().max_message_length(16);
        let mut framer = Framer::new(Protocol::Z3950, &config);
        let mut oversized = vec![0xB6, 0x14];
        oversized.extend([0x00; 20]);
        assert!(framer.push(&oversized[..10])[0].is_err());
        let mut rest = oversized[10..].to_vec();
        rest.extend_from_slice(&CLOSE);
        let frames = frames(framer.push(&rest));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].offset, 22);
        assert_eq!(frames[0].bytes, CLOSE);
    }

    #[test]
    fn bounds_indefinite_messages() {
        let config = DissectorConfig::default().max_message_length(16);
        let mut framer = Framer::new(Protocol::Z3950, &config);
        let mut open = vec![0xB6, 0x80];
        open.extend([0x04, 0x02, 0x00, 0x00].repeat(5));
        let results = framer.push(&open);
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
        assert_eq!(framer.pending(), 0);
    }
}
