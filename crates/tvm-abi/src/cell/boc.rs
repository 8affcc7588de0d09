//! Bag-of-cells serialization.
//!
//! Only single-root bags of ordinary cells are produced. Parsing accepts the
//! optional offset index and CRC32-C trailer emitted by other tools; the
//! checksum is verified when present.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crc::{CRC_32_ISCSI, Crc};

use super::{Cell, CellError, MAX_REFS};

const BOC_MAGIC: [u8; 4] = [0xb5, 0xee, 0x9c, 0x72];

const FLAG_HAS_INDEX: u8 = 0x80;
const FLAG_HAS_CRC32C: u8 = 0x40;
const FLAG_SIZE_MASK: u8 = 0x07;

const CRC32C: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);

/// Smallest serialized cell: two descriptor bytes.
const MIN_CELL_BYTES: usize = 2;

fn invalid(msg: impl Into<String>) -> CellError {
    CellError::InvalidBoc(msg.into())
}

/// Minimal number of bytes needed to hold `value` (at least one).
fn byte_width(value: usize) -> usize {
    let bits = usize::BITS - value.leading_zeros();
    (bits as usize).div_ceil(8).max(1)
}

fn push_uint(out: &mut Vec<u8>, value: usize, width: usize) {
    for i in (0..width).rev() {
        out.push((value >> (8 * i)) as u8);
    }
}

/// Order cells so every reference points to a later index.
fn collect<'a>(cell: &'a Cell, out: &mut Vec<(&'a Cell, Vec<usize>)>) -> usize {
    let index = out.len();
    out.push((cell, Vec::new()));
    let refs: Vec<usize> = cell.refs().iter().map(|r| collect(r, out)).collect();
    if let Some(entry) = out.get_mut(index) {
        entry.1 = refs;
    }
    index
}

impl Cell {
    /// Serialize this cell tree as a bag of cells.
    pub fn to_boc(&self) -> Vec<u8> {
        let mut cells = Vec::new();
        collect(self, &mut cells);

        let size = byte_width(cells.len());
        let mut body = Vec::new();
        for (cell, refs) in &cells {
            body.extend_from_slice(&cell.descriptors());
            body.extend_from_slice(&cell.padded_data());
            for r in refs {
                push_uint(&mut body, *r, size);
            }
        }
        let off_bytes = byte_width(body.len());

        let mut out = Vec::with_capacity(body.len() + 16);
        out.extend_from_slice(&BOC_MAGIC);
        out.push(size as u8);
        out.push(off_bytes as u8);
        push_uint(&mut out, cells.len(), size);
        push_uint(&mut out, 1, size);
        push_uint(&mut out, 0, size);
        push_uint(&mut out, body.len(), off_bytes);
        push_uint(&mut out, 0, size);
        out.extend_from_slice(&body);
        out
    }

    /// Parse a bag of cells and return its first root.
    pub fn from_boc(bytes: &[u8]) -> Result<Cell, CellError> {
        let mut reader = Reader { bytes, pos: 0 };
        if reader.take(4)? != BOC_MAGIC {
            return Err(invalid("unknown magic"));
        }
        let flags = reader.byte()?;
        let size = usize::from(flags & FLAG_SIZE_MASK);
        if size == 0 || size > 4 {
            return Err(invalid(format!("unsupported reference size {size}")));
        }
        let off_bytes = usize::from(reader.byte()?);
        if off_bytes == 0 || off_bytes > 8 {
            return Err(invalid(format!("unsupported offset size {off_bytes}")));
        }
        let cell_count = reader.uint(size)?;
        let root_count = reader.uint(size)?;
        let _absent = reader.uint(size)?;
        let total_size = reader.uint(off_bytes)?;
        if root_count == 0 {
            return Err(invalid("no root cells"));
        }
        if root_count > cell_count {
            return Err(invalid(format!("{root_count} roots for {cell_count} cells")));
        }
        // Counts come from the input; bound them by what is left of it
        // before allocating.
        let remaining = reader.remaining();
        if cell_count.saturating_mul(MIN_CELL_BYTES) > remaining
            || root_count.saturating_mul(size) > remaining
            || total_size > remaining
        {
            return Err(invalid("header counts exceed the data"));
        }
        let mut roots = Vec::with_capacity(root_count);
        for _ in 0..root_count {
            roots.push(reader.uint(size)?);
        }
        if flags & FLAG_HAS_INDEX != 0 {
            let index_len = cell_count
                .checked_mul(off_bytes)
                .ok_or_else(|| invalid("index size overflows"))?;
            reader.take(index_len)?;
        }
        let body_end = reader
            .pos
            .checked_add(total_size)
            .ok_or_else(|| invalid("cell data size overflows"))?;

        let mut raw = Vec::with_capacity(cell_count);
        for index in 0..cell_count {
            let d1 = reader.byte()?;
            let d2 = reader.byte()?;
            if d1 & 0x08 != 0 {
                return Err(invalid(format!("cell {index} is exotic")));
            }
            if d1 & 0x10 != 0 {
                return Err(invalid(format!("cell {index} carries stored hashes")));
            }
            let ref_count = usize::from(d1 & 0x07);
            if ref_count > MAX_REFS {
                return Err(invalid(format!("cell {index} has {ref_count} references")));
            }
            let data_len = usize::from(d2).div_ceil(2);
            let mut data = reader.take(data_len)?.to_vec();
            let bit_len = if d2 % 2 == 1 {
                strip_completion_tag(&mut data)
                    .ok_or_else(|| invalid(format!("cell {index} lacks a completion tag")))?
            } else {
                data_len * 8
            };
            let mut refs = Vec::with_capacity(ref_count);
            for _ in 0..ref_count {
                let r = reader.uint(size)?;
                if r <= index || r >= cell_count {
                    return Err(invalid(format!("cell {index} references {r}")));
                }
                refs.push(r);
            }
            raw.push((data, bit_len, refs));
        }
        if reader.pos != body_end {
            return Err(invalid("cell data size does not match header"));
        }
        if flags & FLAG_HAS_CRC32C != 0 {
            let covered = bytes.get(..reader.pos).unwrap_or_default();
            let stored = reader.take(4)?;
            let expected = CRC32C.checksum(covered).to_le_bytes();
            if stored != expected {
                return Err(invalid("checksum mismatch"));
            }
        }

        // References always point forward, so build from the last cell back.
        let mut built: Vec<Option<Cell>> = vec![None; cell_count];
        for (index, (data, bit_len, refs)) in raw.into_iter().enumerate().rev() {
            let children = refs
                .iter()
                .map(|r| {
                    built
                        .get(*r)
                        .and_then(|c| c.clone())
                        .ok_or_else(|| invalid(format!("dangling reference {r}")))
                })
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(slot) = built.get_mut(index) {
                *slot = Some(Cell::from_parts(data, bit_len, children));
            }
        }

        let root = roots.first().copied().unwrap_or(0);
        built
            .get_mut(root)
            .and_then(Option::take)
            .ok_or_else(|| invalid(format!("root index {root} out of range")))
    }

    /// Bag of cells encoded as standard base64.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_boc())
    }

    pub fn from_base64(text: &str) -> Result<Cell, CellError> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|e| invalid(format!("bad base64: {e}")))?;
        Self::from_boc(&bytes)
    }
}

/// Remove the completion tag from the last byte and return the bit length.
fn strip_completion_tag(data: &mut [u8]) -> Option<usize> {
    let len = data.len();
    let last = data.last_mut()?;
    if *last == 0 {
        return None;
    }
    let trailing = last.trailing_zeros() as usize;
    *last &= !(1u8 << trailing);
    Some(len * 8 - trailing - 1)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], CellError> {
        let slice = self
            .pos
            .checked_add(n)
            .and_then(|end| self.bytes.get(self.pos..end))
            .ok_or_else(|| invalid("unexpected end of data"))?;
        self.pos += n;
        Ok(slice)
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    fn byte(&mut self) -> Result<u8, CellError> {
        self.take(1)?
            .first()
            .copied()
            .ok_or_else(|| invalid("unexpected end of data"))
    }

    fn uint(&mut self, width: usize) -> Result<usize, CellError> {
        Ok(self
            .take(width)?
            .iter()
            .fold(0usize, |acc, b| (acc << 8) | usize::from(*b)))
    }
}
