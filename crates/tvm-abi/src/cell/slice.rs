//! Reading bits and references from a cell.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use super::{Cell, CellError};

/// A read cursor over a [`Cell`].
#[derive(Debug, Clone)]
pub struct CellSlice<'a> {
    cell: &'a Cell,
    bit_pos: usize,
    ref_pos: usize,
}

impl<'a> CellSlice<'a> {
    pub fn new(cell: &'a Cell) -> Self {
        Self {
            cell,
            bit_pos: 0,
            ref_pos: 0,
        }
    }

    pub fn remaining_bits(&self) -> usize {
        self.cell.bit_len() - self.bit_pos
    }

    pub fn remaining_refs(&self) -> usize {
        self.cell.refs().len() - self.ref_pos
    }

    fn ensure(&self, bits: usize) -> Result<(), CellError> {
        if bits > self.remaining_bits() {
            return Err(CellError::BitUnderflow {
                needed: bits,
                available: self.remaining_bits(),
            });
        }
        Ok(())
    }

    fn next_bit(&mut self) -> bool {
        let pos = self.bit_pos;
        self.bit_pos += 1;
        self.cell
            .data()
            .get(pos / 8)
            .is_some_and(|b| b & (0x80 >> (pos % 8)) != 0)
    }

    pub fn load_bit(&mut self) -> Result<bool, CellError> {
        self.ensure(1)?;
        Ok(self.next_bit())
    }

    /// Read a `bits`-wide unsigned integer (at most 64 bits).
    pub fn load_uint(&mut self, bits: usize) -> Result<u64, CellError> {
        if bits > 64 {
            return Err(CellError::ValueOutOfRange {
                value: format!("uint{bits}"),
                bits: 64,
            });
        }
        self.ensure(bits)?;
        let mut value = 0u64;
        for _ in 0..bits {
            value = (value << 1) | u64::from(self.next_bit());
        }
        Ok(value)
    }

    /// Read a `bits`-wide two's complement integer (at most 64 bits).
    pub fn load_int(&mut self, bits: usize) -> Result<i64, CellError> {
        if bits > 64 {
            return Err(CellError::ValueOutOfRange {
                value: format!("int{bits}"),
                bits: 64,
            });
        }
        let raw = i128::from(self.load_uint(bits)?);
        if bits == 0 {
            return Ok(0);
        }
        let signed = if raw >> (bits - 1) & 1 == 1 {
            raw - (1i128 << bits)
        } else {
            raw
        };
        Ok(signed as i64)
    }

    pub fn load_big_uint(&mut self, bits: usize) -> Result<BigUint, CellError> {
        self.ensure(bits)?;
        let mut value = BigUint::zero();
        for _ in 0..bits {
            value <<= 1u32;
            if self.next_bit() {
                value += 1u32;
            }
        }
        Ok(value)
    }

    pub fn load_big_int(&mut self, bits: usize) -> Result<BigInt, CellError> {
        let raw = BigInt::from(self.load_big_uint(bits)?);
        if bits == 0 {
            return Ok(raw);
        }
        let half = BigInt::one() << (bits - 1);
        if raw >= half {
            Ok(raw - (half << 1))
        } else {
            Ok(raw)
        }
    }

    /// Read `bits` bits into a byte vector, most significant first.
    pub fn load_bits(&mut self, bits: usize) -> Result<Vec<u8>, CellError> {
        self.ensure(bits)?;
        let mut out = vec![0u8; bits.div_ceil(8)];
        for (i, byte) in (0..bits).map(|i| (i, i / 8)) {
            if self.next_bit() {
                if let Some(b) = out.get_mut(byte) {
                    *b |= 0x80 >> (i % 8);
                }
            }
        }
        Ok(out)
    }

    pub fn load_ref(&mut self) -> Result<&'a Cell, CellError> {
        let cell = self
            .cell
            .refs()
            .get(self.ref_pos)
            .ok_or(CellError::RefUnderflow)?;
        self.ref_pos += 1;
        Ok(cell)
    }

    /// Read a presence bit and, when set, the next reference.
    pub fn load_maybe_ref(&mut self) -> Result<Option<&'a Cell>, CellError> {
        if self.load_bit()? {
            self.load_ref().map(Some)
        } else {
            Ok(None)
        }
    }
}
