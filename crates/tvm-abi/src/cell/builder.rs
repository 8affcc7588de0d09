//! Appending bits and references to a new cell.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use super::{Cell, CellError, CellSlice, MAX_BITS, MAX_REFS};

/// Incrementally builds a [`Cell`].
///
/// Every `store_*` method returns `&mut Self` so calls chain with `?`:
///
/// ```ignore
/// let mut b = CellBuilder::new();
/// b.store_uint(0, 2)?.store_bit(true)?.store_ref(child)?;
/// let cell = b.build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct CellBuilder {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Cell>,
}

impl CellBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bits still available in this cell.
    pub fn available_bits(&self) -> usize {
        MAX_BITS - self.bit_len
    }

    fn reserve(&self, bits: usize) -> Result<(), CellError> {
        if bits > self.available_bits() {
            return Err(CellError::BitOverflow {
                requested: bits,
                available: self.available_bits(),
            });
        }
        Ok(())
    }

    fn push_bit(&mut self, bit: bool) {
        let offset = self.bit_len % 8;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            if let Some(byte) = self.data.last_mut() {
                *byte |= 0x80 >> offset;
            }
        }
        self.bit_len += 1;
    }

    pub fn store_bit(&mut self, bit: bool) -> Result<&mut Self, CellError> {
        self.reserve(1)?;
        self.push_bit(bit);
        Ok(self)
    }

    /// Store the low `bits` bits of `value`, most significant first.
    pub fn store_uint(&mut self, value: u64, bits: usize) -> Result<&mut Self, CellError> {
        if bits < 64 && value >> bits != 0 {
            return Err(CellError::ValueOutOfRange {
                value: value.to_string(),
                bits,
            });
        }
        self.reserve(bits)?;
        for i in (0..bits).rev() {
            let bit = i < 64 && (value >> i) & 1 == 1;
            self.push_bit(bit);
        }
        Ok(self)
    }

    /// Store `value` as a `bits`-wide two's complement integer.
    pub fn store_int(&mut self, value: i64, bits: usize) -> Result<&mut Self, CellError> {
        self.store_big_int(&BigInt::from(value), bits)
    }

    pub fn store_big_uint(&mut self, value: &BigUint, bits: usize) -> Result<&mut Self, CellError> {
        if value.bits() > bits as u64 {
            return Err(CellError::ValueOutOfRange {
                value: value.to_string(),
                bits,
            });
        }
        self.reserve(bits)?;
        for i in (0..bits as u64).rev() {
            self.push_bit(value.bit(i));
        }
        Ok(self)
    }

    pub fn store_big_int(&mut self, value: &BigInt, bits: usize) -> Result<&mut Self, CellError> {
        let out_of_range = || CellError::ValueOutOfRange {
            value: value.to_string(),
            bits,
        };
        if bits == 0 {
            return if value.is_zero() {
                Ok(self)
            } else {
                Err(out_of_range())
            };
        }
        let half = BigInt::one() << (bits - 1);
        if *value >= half || *value < -&half {
            return Err(out_of_range());
        }
        let unsigned = if value.sign() == Sign::Minus {
            value + (half << 1)
        } else {
            value.clone()
        };
        let unsigned = unsigned.to_biguint().ok_or_else(out_of_range)?;
        self.store_big_uint(&unsigned, bits)
    }

    /// Store the first `bit_len` bits of `bytes`.
    pub fn store_bits(&mut self, bytes: &[u8], bit_len: usize) -> Result<&mut Self, CellError> {
        if bit_len > bytes.len() * 8 {
            return Err(CellError::BitUnderflow {
                needed: bit_len,
                available: bytes.len() * 8,
            });
        }
        self.reserve(bit_len)?;
        for i in 0..bit_len {
            let bit = bytes
                .get(i / 8)
                .is_some_and(|b| b & (0x80 >> (i % 8)) != 0);
            self.push_bit(bit);
        }
        Ok(self)
    }

    /// Append the unread remainder (bits and references) of a slice.
    pub fn store_slice(&mut self, slice: &CellSlice<'_>) -> Result<&mut Self, CellError> {
        let mut slice = slice.clone();
        let bits = slice.remaining_bits();
        let data = slice.load_bits(bits)?;
        self.store_bits(&data, bits)?;
        while slice.remaining_refs() > 0 {
            let child = slice.load_ref()?;
            self.store_ref(child.clone())?;
        }
        Ok(self)
    }

    pub fn store_ref(&mut self, cell: Cell) -> Result<&mut Self, CellError> {
        if self.refs.len() >= MAX_REFS {
            return Err(CellError::RefOverflow);
        }
        self.refs.push(cell);
        Ok(self)
    }

    /// Store a presence bit followed, when present, by a reference.
    pub fn store_maybe_ref(&mut self, cell: Option<Cell>) -> Result<&mut Self, CellError> {
        match cell {
            Some(cell) => {
                if self.refs.len() >= MAX_REFS {
                    return Err(CellError::RefOverflow);
                }
                self.store_bit(true)?;
                self.store_ref(cell)
            }
            None => self.store_bit(false),
        }
    }

    pub fn build(self) -> Cell {
        Cell::from_parts(self.data, self.bit_len, self.refs)
    }
}
