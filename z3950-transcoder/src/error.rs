use core::fmt::{Display, Formatter, Result};
use std::error::Error;

use crate::value::Node;

#[derive(Debug, Clone)]
pub struct DecodingError {
    pub details: String,
    pub kind: DecodingErrorType,
    /// Absolute offset in the message where decoding stopped
    pub offset: usize,
    /// Deepest partial tree built before the failure
    pub partial: Option<Box<Node>>,
}

impl DecodingError {
    pub fn new(details: &str, kind: DecodingErrorType) -> Self {
        DecodingError {
            details: details.into(),
            kind,
            offset: 0,
            partial: None,
        }
    }

    pub fn at(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub(crate) fn with_partial(mut self, partial: Node) -> Self {
        self.partial = Some(Box::new(partial));
        self
    }

    pub(crate) fn take_partial(&mut self) -> Option<Node> {
        self.partial.take().map(|p| *p)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodingErrorType {
    OutOfBounds,
    MalformedTag,
    MalformedLength,
    MalformedEncoding,
    MissingMandatoryField,
    UnknownChoiceAlternative,
    UnexpectedTrailingData,
    DepthLimitExceeded,
    NodeLimitExceeded,
}

impl Error for DecodingError {}

impl From<nom::Err<nom::error::Error<&[u8]>>> for DecodingError {
    fn from(value: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        let kind = match &value {
            nom::Err::Incomplete(_) => DecodingErrorType::OutOfBounds,
            nom::Err::Error(e) | nom::Err::Failure(e) if e.code == nom::error::ErrorKind::Eof => {
                DecodingErrorType::OutOfBounds
            }
            _ => DecodingErrorType::MalformedEncoding,
        };
        DecodingError::new(&value.to_string(), kind)
    }
}

impl Display for DecodingError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{:?} decoding BER encoding at offset {}: {}",
            self.kind, self.offset, self.details
        )
    }
}
