use flate2::{Decompress, FlushDecompress, Status};

use crate::foundation::error::{SvgaError, SvgaResult};

/// Inflate a complete zlib stream.
///
/// A stream that runs out of input before its end marker is an error, not a short read.
pub fn inflate(data: &[u8]) -> SvgaResult<Vec<u8>> {
    let mut z = Decompress::new(true);
    let mut out = Vec::with_capacity(data.len().saturating_mul(4).max(64));

    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity().max(64));
        }
        let consumed = z.total_in() as usize;
        let produced = out.len();

        let status = z
            .decompress_vec(&data[consumed..], &mut out, FlushDecompress::None)
            .map_err(|e| SvgaError::inflate(format!("corrupt zlib stream: {e}")))?;

        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                if z.total_in() as usize == consumed && out.len() == produced {
                    return Err(SvgaError::inflate(format!(
                        "zlib stream ended early after {consumed} of {} bytes",
                        data.len()
                    )));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wire/inflate.rs"]
mod tests;
