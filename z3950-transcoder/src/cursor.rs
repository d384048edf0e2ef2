use nom::IResult;

use crate::error::{DecodingError, DecodingErrorType};

/// A forward-only read cursor over one region of a message.
///
/// Every read either advances the cursor by exactly the number of
/// bytes it returns or fails and leaves the position untouched.
/// Offsets reported by the cursor are absolute within the message,
/// so child cursors over nested regions keep pointing at the right
/// bytes for highlighting.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    input: &'a [u8],
    position: usize,
    origin: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_origin(input, 0)
    }

    /// A cursor over `input`, which starts at `origin` in the message.
    pub fn with_origin(input: &'a [u8], origin: usize) -> Self {
        ByteCursor {
            input,
            position: 0,
            origin,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Absolute offset of the next unread byte
    pub fn offset(&self) -> usize {
        self.origin + self.position
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unread bytes
    pub fn rest(&self) -> &'a [u8] {
        &self.input[self.position..]
    }

    pub fn peek(&self, n: usize) -> Result<&'a [u8], DecodingError> {
        self.rest().get(..n).ok_or_else(|| self.out_of_bounds(n))
    }

    pub fn advance(&mut self, n: usize) -> Result<(), DecodingError> {
        if n > self.remaining() {
            return Err(self.out_of_bounds(n));
        }
        self.position += n;
        Ok(())
    }

    pub fn take(&mut self, n: usize) -> Result<&'a [u8], DecodingError> {
        let bytes = self.peek(n)?;
        self.position += n;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodingError> {
        Ok(self.take(1)?[0])
    }

    /// Splits off the next `n` bytes as a cursor of their own and
    /// moves this cursor past them.
    pub fn split_to(&mut self, n: usize) -> Result<ByteCursor<'a>, DecodingError> {
        let origin = self.offset();
        let region = self.take(n)?;
        Ok(ByteCursor::with_origin(region, origin))
    }

    /// Runs a nom parser on the unread bytes and advances past what it consumed.
    pub fn parse<O>(
        &mut self,
        mut parser: impl FnMut(&'a [u8]) -> IResult<&'a [u8], O>,
    ) -> Result<O, DecodingError> {
        let offset = self.offset();
        let (rest, output) = parser(self.rest()).map_err(|e| DecodingError::from(e).at(offset))?;
        self.position = self.input.len() - rest.len();
        Ok(output)
    }

    fn out_of_bounds(&self, n: usize) -> DecodingError {
        DecodingError::new(
            &format!(
                "requested {n} bytes, {} remaining in region",
                self.remaining()
            ),
            DecodingErrorType::OutOfBounds,
        )
        .at(self.offset())
    }
}
