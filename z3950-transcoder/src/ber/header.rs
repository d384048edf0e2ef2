//! Identifier and length octets of a BER TLV.
use nom::{
    bytes::complete::{take, take_while},
    IResult,
};
use num::{FromPrimitive, PrimInt};
use z3950_grammar::{AsnTag, TagClass};

use crate::{
    cursor::ByteCursor,
    error::{DecodingError, DecodingErrorType},
};

const CONSTRUCTED: u8 = 0b0010_0000;
const HIGH_TAG_NUMBER: u8 = 0b0001_1111;
const CONTINUATION: u8 = 0b1000_0000;
const LONG_FORM: u8 = 0b1000_0000;
const RESERVED_LENGTH: u8 = 0b0111_1111;

/// End-of-contents octets closing an indefinite length encoding
pub const END_OF_CONTENTS: [u8; 2] = [0, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Definite(usize),
    Indefinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub tag: AsnTag,
    pub constructed: bool,
    pub length: Length,
    /// Absolute offset of the identifier octet
    pub offset: usize,
    /// Number of identifier and length octets
    pub header_length: usize,
}

impl Header {
    /// Absolute offset of the first content octet
    pub fn content_offset(&self) -> usize {
        self.offset + self.header_length
    }
}

type ParseError<'a> = nom::error::Error<&'a [u8]>;

fn octet(input: &[u8]) -> IResult<&[u8], u8> {
    nom::number::complete::u8(input)
}

/// Accumulates big-endian base-128 digits, `None` on overflow.
pub(crate) fn base128<T: PrimInt + FromPrimitive>(digits: &[u8]) -> Option<T> {
    let radix = T::from_u8(128)?;
    digits.iter().try_fold(T::zero(), |acc, digit| {
        acc.checked_mul(&radix)?
            .checked_add(&T::from_u8(digit & !CONTINUATION)?)
    })
}

/// Identifier octets: class bits, constructed flag and tag number.
pub fn identifier(input: &[u8]) -> IResult<&[u8], (AsnTag, bool)> {
    let (input, first) = octet(input)?;
    let class = TagClass::from_bits(first >> 6);
    let constructed = first & CONSTRUCTED != 0;
    if first & HIGH_TAG_NUMBER != HIGH_TAG_NUMBER {
        return Ok((input, (AsnTag::new(class, (first & HIGH_TAG_NUMBER) as u64), constructed)));
    }
    let (rest, continued) = take_while::<_, _, ParseError>(|b: u8| b & CONTINUATION != 0)(input)?;
    let (rest, _) = octet(rest)?;
    let digits = &input[..continued.len() + 1];
    match base128::<u64>(digits) {
        Some(id) => Ok((rest, (AsnTag::new(class, id), constructed))),
        None => Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TooLarge,
        ))),
    }
}

/// Length octets in short, long or indefinite form.
pub fn length(input: &[u8]) -> IResult<&[u8], Length> {
    let (input, first) = octet(input)?;
    if first & LONG_FORM == 0 {
        return Ok((input, Length::Definite(first as usize)));
    }
    match first & !LONG_FORM {
        0 => Ok((input, Length::Indefinite)),
        RESERVED_LENGTH => Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        ))),
        count => {
            let (rest, octets) = take::<_, _, ParseError>(count as usize)(input)?;
            octets
                .iter()
                .try_fold(0usize, |acc, b| acc.checked_mul(256)?.checked_add(*b as usize))
                .map(|n| (rest, Length::Definite(n)))
                .ok_or(nom::Err::Failure(nom::error::Error::new(
                    input,
                    nom::error::ErrorKind::TooLarge,
                )))
        }
    }
}

/// Reads one TLV header and advances the cursor past it.
///
/// Fails with `OutOfBounds` on an empty region, with `MalformedTag`
/// for an unterminated or oversized tag number and with
/// `MalformedLength` for a length that does not fit the region.
pub fn read_header(cursor: &mut ByteCursor) -> Result<Header, DecodingError> {
    let header = peek_header(cursor)?;
    cursor.advance(header.header_length)?;
    Ok(header)
}

/// Reads one TLV header without moving the cursor.
pub fn peek_header(cursor: &ByteCursor) -> Result<Header, DecodingError> {
    let offset = cursor.offset();
    let input = cursor.rest();
    if input.is_empty() {
        return Err(DecodingError::new(
            "no identifier octet left in region",
            DecodingErrorType::OutOfBounds,
        )
        .at(offset));
    }
    let (after_identifier, (tag, constructed)) = identifier(input).map_err(|_| {
        DecodingError::new("unterminated or oversized tag number", DecodingErrorType::MalformedTag)
            .at(offset)
    })?;
    let (rest, length) = self::length(after_identifier).map_err(|_| {
        DecodingError::new("invalid length octets", DecodingErrorType::MalformedLength)
            .at(offset + input.len() - after_identifier.len())
    })?;
    if let Length::Definite(n) = length {
        if n > rest.len() {
            return Err(DecodingError::new(
                &format!("{tag} declares {n} content octets, {} remaining", rest.len()),
                DecodingErrorType::MalformedLength,
            )
            .at(offset));
        }
    }
    log::trace!("{tag} {length:?} at {offset}");
    Ok(Header {
        tag,
        constructed,
        length,
        offset,
        header_length: input.len() - rest.len(),
    })
}

/// Whether the cursor stands at the end of its region or at the
/// end-of-contents octets of an enclosing indefinite encoding.
pub fn at_end(cursor: &ByteCursor) -> bool {
    cursor.is_empty() || cursor.peek(2).map_or(false, |b| b == END_OF_CONTENTS)
}

/// Number of content octets of an indefinite length encoding,
/// including its end-of-contents octets. `cursor` stands at the
/// first content octet and is not moved.
pub fn indefinite_extent(cursor: &ByteCursor, max_depth: usize) -> Result<usize, DecodingError> {
    let mut probe = cursor.clone();
    let mut open = 1usize;
    while open > 0 {
        if probe.peek(2).map_or(false, |b| b == END_OF_CONTENTS) {
            probe.advance(2)?;
            open -= 1;
            continue;
        }
        let header = read_header(&mut probe)?;
        match header.length {
            Length::Definite(n) => probe.advance(n)?,
            Length::Indefinite if open < max_depth => open += 1,
            Length::Indefinite => {
                return Err(DecodingError::new(
                    &format!("indefinite encodings nest deeper than {max_depth} levels"),
                    DecodingErrorType::DepthLimitExceeded,
                )
                .at(header.offset))
            }
        }
    }
    Ok(probe.position() - cursor.position())
}

/// Skips one complete TLV and returns its absolute span.
pub fn skip_element(
    cursor: &mut ByteCursor,
    max_depth: usize,
) -> Result<core::ops::Range<usize>, DecodingError> {
    let header = read_header(cursor)?;
    let content = match header.length {
        Length::Definite(n) => n,
        Length::Indefinite => indefinite_extent(cursor, max_depth)?,
    };
    cursor.advance(content)?;
    Ok(header.offset..cursor.offset())
}

/// Size of the complete BER message at the start of `input`, or
/// `None` if more bytes are needed to tell.
pub fn message_length(input: &[u8], max_depth: usize) -> Result<Option<usize>, DecodingError> {
    let (after_identifier, _) = match identifier(input) {
        Ok(parsed) => parsed,
        Err(nom::Err::Failure(_)) => {
            return Err(DecodingError::new(
                "oversized tag number",
                DecodingErrorType::MalformedTag,
            ))
        }
        Err(_) => return Ok(None),
    };
    let (content, length) = match self::length(after_identifier) {
        Ok(parsed) => parsed,
        Err(nom::Err::Failure(_)) => {
            return Err(DecodingError::new(
                "invalid length octets",
                DecodingErrorType::MalformedLength,
            )
            .at(input.len() - after_identifier.len()))
        }
        Err(_) => return Ok(None),
    };
    let header_length = input.len() - content.len();
    match length {
        Length::Definite(n) => Ok(Some(header_length + n)),
        Length::Indefinite => {
            let cursor = ByteCursor::with_origin(content, header_length);
            match indefinite_extent(&cursor, max_depth) {
                Ok(n) => Ok(Some(header_length + n)),
                Err(e)
                    if matches!(
                        e.kind,
                        DecodingErrorType::OutOfBounds | DecodingErrorType::MalformedLength
                    ) =>
                {
                    Ok(None)
                }
                Err(e) => Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_length(n: usize) -> Vec<u8> {
        if n < 128 {
            return vec![n as u8];
        }
        let octets: Vec<u8> = n
            .to_be_bytes()
            .into_iter()
            .skip_while(|b| *b == 0)
            .collect();
        let mut encoded = vec![0x80 | octets.len() as u8];
        encoded.extend(octets);
        encoded
    }

    fn encode_high_tag(mut t: u64) -> Vec<u8> {
        let mut digits = vec![(t & 0x7F) as u8];
        t >>= 7;
        while t > 0 {
            digits.push((t & 0x7F) as u8 | 0x80);
            t >>= 7;
        }
        digits.reverse();
        let mut encoded = vec![0xBF];
        encoded.extend(digits);
        encoded
    }

    #[test]
    fn decodes_short_form_lengths() {
        for n in 0..=127usize {
            let encoded = [n as u8];
            assert_eq!(length(&encoded).unwrap(), (&[][..], Length::Definite(n)));
        }
    }

    #[test]
    fn decodes_long_form_lengths() {
        for n in [128usize, 255, 256, 1000, 65_535, 65_536, 1 << 20, (1 << 24) + 7, u32::MAX as usize] {
            let encoded = encode_length(n);
            assert!(encoded.len() <= 5);
            assert_eq!(length(&encoded).unwrap().1, Length::Definite(n), "{n}");
        }
    }

    #[test]
    fn rejects_lengths_beyond_the_region() {
        let mut input = vec![0x04];
        input.extend(encode_length(300));
        input.extend([0u8; 299]);
        let err = peek_header(&ByteCursor::new(&input)).unwrap_err();
        assert_eq!(err.kind, DecodingErrorType::MalformedLength);

        let err = peek_header(&ByteCursor::new(&[0x04, 0x82, 0x01])).unwrap_err();
        assert_eq!(err.kind, DecodingErrorType::MalformedLength);
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn decodes_high_tag_numbers() {
        for t in (31..2_000u64).chain([16_383, 16_384, 1 << 32, u64::MAX]) {
            let mut input = encode_high_tag(t);
            input.push(0);
            let header = peek_header(&ByteCursor::new(&input)).unwrap();
            assert_eq!(header.tag, AsnTag::context(t));
            assert!(header.constructed);
            assert_eq!(header.header_length, input.len());
        }
    }

    #[test]
    fn rejects_malformed_tags() {
        let err = peek_header(&ByteCursor::new(&[0x9F, 0x81, 0x82])).unwrap_err();
        assert_eq!(err.kind, DecodingErrorType::MalformedTag);
        let mut oversized = vec![0x9F];
        oversized.extend([0xFF; 10]);
        oversized.extend([0x7F, 0x00]);
        let err = peek_header(&ByteCursor::new(&oversized)).unwrap_err();
        assert_eq!(err.kind, DecodingErrorType::MalformedTag);
        let err = peek_header(&ByteCursor::new(&[])).unwrap_err();
        assert_eq!(err.kind, DecodingErrorType::OutOfBounds);
    }

    #[test]
    fn reads_headers_atomically() {
        let mut cursor = ByteCursor::new(&[0xB5, 0x03, 0x02, 0x01, 0x05]);
        let header = read_header(&mut cursor).unwrap();
        assert_eq!(header.tag, AsnTag::context(21));
        assert_eq!(header.length, Length::Definite(3));
        assert_eq!(cursor.offset(), 2);

        let mut truncated = ByteCursor::new(&[0x30, 0x05, 0x01]);
        assert!(read_header(&mut truncated).is_err());
        assert_eq!(truncated.offset(), 0);
    }

    #[test]
    fn measures_indefinite_encodings() {
        // [1] { SEQUENCE (indefinite) { INTEGER 5 } } EOC
        let content = [0x30, 0x80, 0x02, 0x01, 0x05, 0x00, 0x00, 0x00, 0x00, 0xFF];
        let extent = indefinite_extent(&ByteCursor::new(&content), 8).unwrap();
        assert_eq!(extent, 9);
    }

    #[test]
    fn frames_messages() {
        let message = [0x30, 0x03, 0x02, 0x01, 0x05, 0x30];
        assert_eq!(message_length(&message, 8).unwrap(), Some(5));
        assert_eq!(message_length(&message[..1], 8).unwrap(), None);
        assert_eq!(message_length(&[0x30, 0x82, 0x01], 8).unwrap(), None);
        assert_eq!(message_length(&[0xB6, 0x82, 0x01, 0x00], 8).unwrap(), Some(260));

        let indefinite = [0x30, 0x80, 0x02, 0x01, 0x05, 0x00, 0x00];
        assert_eq!(message_length(&indefinite, 8).unwrap(), Some(7));
        assert_eq!(message_length(&indefinite[..5], 8).unwrap(), None);
    }
}
