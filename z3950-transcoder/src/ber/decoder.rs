use nom::{
    bytes::complete::take_while,
    combinator::{all_consuming, recognize},
    multi::many1,
    sequence::pair,
    IResult,
};
use z3950_grammar::CharacterStringType;

use crate::{
    cursor::ByteCursor,
    error::{DecodingError, DecodingErrorType},
    value::{BitString, ObjectIdentifier, Value},
    Decoder,
};

use super::{header::base128, Ber};

fn malformed(details: &str, offset: usize) -> DecodingError {
    DecodingError::new(details, DecodingErrorType::MalformedEncoding).at(offset)
}

/// One base-128 subidentifier of an OBJECT IDENTIFIER.
fn subidentifier(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize(pair(
        take_while(|b: u8| b & 0x80 != 0),
        nom::number::complete::u8,
    ))(input)
}

impl Decoder for Ber {
    fn decode_integer(&self, cursor: &mut ByteCursor, length: usize) -> Result<i64, DecodingError> {
        let offset = cursor.offset();
        let mut significant = cursor.peek(length)?;
        // Redundant sign octets do not count against the width.
        while let [lead, next, ..] = significant {
            if (*lead == 0x00 && next & 0x80 == 0) || (*lead == 0xFF && next & 0x80 != 0) {
                significant = &significant[1..];
            } else {
                break;
            }
        }
        let Some((first, rest)) = significant.split_first() else {
            return Err(malformed("INTEGER without content octets", offset));
        };
        if significant.len() > 8 {
            return Err(malformed("INTEGER does not fit in 64 bits", offset));
        }
        let value = rest
            .iter()
            .fold(*first as i8 as i64, |acc, b| acc << 8 | *b as i64);
        cursor.advance(length)?;
        Ok(value)
    }

    fn decode_boolean(&self, cursor: &mut ByteCursor, length: usize) -> Result<bool, DecodingError> {
        if length != 1 {
            return Err(malformed(
                &format!("BOOLEAN with {length} content octets"),
                cursor.offset(),
            ));
        }
        Ok(cursor.read_u8()? != 0)
    }

    fn decode_null(&self, cursor: &mut ByteCursor, length: usize) -> Result<(), DecodingError> {
        if length != 0 {
            return Err(malformed(
                &format!("NULL with {length} content octets"),
                cursor.offset(),
            ));
        }
        Ok(())
    }

    fn decode_bit_string(
        &self,
        cursor: &mut ByteCursor,
        length: usize,
    ) -> Result<BitString, DecodingError> {
        let offset = cursor.offset();
        let content = cursor.peek(length)?;
        let Some((unused_bits, bytes)) = content.split_first() else {
            return Err(malformed("BIT STRING without initial octet", offset));
        };
        if *unused_bits > 7 || (bytes.is_empty() && *unused_bits != 0) {
            return Err(malformed(
                &format!("BIT STRING with {unused_bits} unused bits"),
                offset,
            ));
        }
        let bit_string = BitString {
            bytes: bytes.to_vec(),
            unused_bits: *unused_bits,
        };
        cursor.advance(length)?;
        Ok(bit_string)
    }

    fn decode_object_identifier(
        &self,
        cursor: &mut ByteCursor,
        length: usize,
    ) -> Result<ObjectIdentifier, DecodingError> {
        let offset = cursor.offset();
        let content = cursor.peek(length)?;
        let (_, subidentifiers) = all_consuming(many1(subidentifier))(content)
            .map_err(|_| malformed("unterminated OBJECT IDENTIFIER subidentifier", offset))?;
        let mut arcs = Vec::with_capacity(subidentifiers.len() + 1);
        for (i, digits) in subidentifiers.into_iter().enumerate() {
            let arc = base128::<u128>(digits)
                .ok_or_else(|| malformed("OBJECT IDENTIFIER arc exceeds 128 bits", offset))?;
            if i == 0 {
                let first = (arc / 40).min(2);
                arcs.push(first);
                arcs.push(arc - first * 40);
            } else {
                arcs.push(arc);
            }
        }
        cursor.advance(length)?;
        Ok(ObjectIdentifier(arcs))
    }

    fn decode_character_string(
        &self,
        string: CharacterStringType,
        cursor: &mut ByteCursor,
        length: usize,
    ) -> Result<Value, DecodingError> {
        let bytes = cursor.take(length)?;
        Ok(if string.is_text() {
            Value::CharacterString(bytes.to_vec())
        } else {
            Value::OctetString(bytes.to_vec())
        })
    }

    fn decode_generalized_time(
        &self,
        cursor: &mut ByteCursor,
        length: usize,
    ) -> Result<String, DecodingError> {
        let offset = cursor.offset();
        let bytes = cursor.peek(length)?;
        if !bytes.is_ascii() {
            return Err(malformed("GeneralizedTime is not ASCII", offset));
        }
        cursor.advance(length)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
