use crate::foundation::error::{SvgaError, SvgaResult};

/// Protobuf wire types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WireType {
    Varint,
    Fixed64,
    Len,
    StartGroup,
    EndGroup,
    Fixed32,
}

impl WireType {
    fn from_bits(bits: u64) -> Option<Self> {
        Some(match bits {
            0 => Self::Varint,
            1 => Self::Fixed64,
            2 => Self::Len,
            3 => Self::StartGroup,
            4 => Self::EndGroup,
            5 => Self::Fixed32,
            _ => return None,
        })
    }
}

/// Cursor over one protobuf-encoded message.
#[derive(Debug, Clone)]
pub(crate) struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    fn truncated(&self, what: &str, need: usize) -> SvgaError {
        SvgaError::decode(format!(
            "truncated {what} at offset {}: need {need} bytes, {} left",
            self.pos,
            self.buf.len().saturating_sub(self.pos)
        ))
    }

    /// Base-128 varint, at most 10 bytes.
    pub(crate) fn read_varint(&mut self) -> SvgaResult<u64> {
        let start = self.pos;
        let mut value = 0u64;
        for i in 0..10 {
            let Some(&byte) = self.buf.get(self.pos) else {
                self.pos = start;
                return Err(self.truncated("varint", i + 1));
            };
            self.pos += 1;
            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(SvgaError::decode(format!(
            "malformed varint at offset {start}: more than 10 bytes"
        )))
    }

    fn take(&mut self, n: usize, what: &str) -> SvgaResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| self.truncated(what, n))?;
        let out = &self.buf[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    pub(crate) fn read_fixed32(&mut self) -> SvgaResult<u32> {
        let b = self.take(4, "fixed32")?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub(crate) fn read_fixed64(&mut self) -> SvgaResult<u64> {
        let b = self.take(8, "fixed64")?;
        Ok(u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
    }

    /// Length-prefixed slice (strings, bytes, sub-messages, packed runs).
    pub(crate) fn read_len_delimited(&mut self) -> SvgaResult<&'a [u8]> {
        let len = self.read_varint()?;
        let len = usize::try_from(len)
            .map_err(|_| SvgaError::decode(format!("length {len} does not fit in memory")))?;
        self.take(len, "length-delimited field")
    }

    /// Field key: `(field number, wire type)`.
    pub(crate) fn read_key(&mut self) -> SvgaResult<(u32, WireType)> {
        let at = self.pos;
        let key = self.read_varint()?;
        let wire_type = WireType::from_bits(key & 0x7).ok_or_else(|| {
            SvgaError::decode(format!("invalid wire type {} at offset {at}", key & 0x7))
        })?;
        let field = u32::try_from(key >> 3)
            .ok()
            .filter(|&f| f != 0)
            .ok_or_else(|| {
                SvgaError::decode(format!("invalid field number {} at offset {at}", key >> 3))
            })?;
        Ok((field, wire_type))
    }

    /// Skip the payload of a field whose key has already been read.
    pub(crate) fn skip(&mut self, field: u32, wire_type: WireType) -> SvgaResult<()> {
        match wire_type {
            WireType::Varint => {
                self.read_varint()?;
            }
            WireType::Fixed64 => {
                self.take(8, "fixed64")?;
            }
            WireType::Len => {
                self.read_len_delimited()?;
            }
            WireType::Fixed32 => {
                self.take(4, "fixed32")?;
            }
            WireType::StartGroup => loop {
                if self.is_empty() {
                    return Err(self.truncated("group", 1));
                }
                let (inner, inner_type) = self.read_key()?;
                if inner_type == WireType::EndGroup {
                    if inner != field {
                        return Err(SvgaError::decode(format!(
                            "group {field} closed by end tag {inner}"
                        )));
                    }
                    break;
                }
                self.skip(inner, inner_type)?;
            },
            WireType::EndGroup => {
                return Err(SvgaError::decode(format!(
                    "unexpected end-group tag for field {field} at offset {}",
                    self.pos
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wire/reader.rs"]
mod tests;
