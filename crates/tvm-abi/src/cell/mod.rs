//! Cells: the bit-string-plus-references unit of the TVM wire format.
//!
//! # Module Organization
//!
//! - [`builder`]: [`CellBuilder`] for appending bits and references
//! - [`slice`]: [`CellSlice`] for reading a cell front to back
//! - [`boc`]: bag-of-cells (de)serialization and base64 helpers

mod boc;
mod builder;
mod slice;

pub use builder::CellBuilder;
pub use slice::CellSlice;

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Maximum number of data bits in an ordinary cell.
pub const MAX_BITS: usize = 1023;

/// Maximum number of child references in a cell.
pub const MAX_REFS: usize = 4;

/// Errors raised while building, reading or (de)serializing cells.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    #[error("Cell overflow: cannot store {requested} more bits, {available} available")]
    BitOverflow { requested: usize, available: usize },

    #[error("Cell overflow: a cell holds at most 4 references")]
    RefOverflow,

    #[error("Cell underflow: need {needed} bits, {available} remaining")]
    BitUnderflow { needed: usize, available: usize },

    #[error("Cell underflow: no references left")]
    RefUnderflow,

    #[error("Value {value} does not fit in {bits} bits")]
    ValueOutOfRange { value: String, bits: usize },

    #[error("Invalid bag of cells: {0}")]
    InvalidBoc(String),
}

/// An ordinary cell: up to 1023 data bits and up to four child cells.
///
/// Bits are stored most-significant first; bits past `bit_len` in the last
/// byte are always zero so that structurally equal cells compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Cell>,
}

impl Cell {
    /// A cell with no bits and no references.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(data: Vec<u8>, bit_len: usize, refs: Vec<Cell>) -> Self {
        Self {
            data,
            bit_len,
            refs,
        }
    }

    /// Number of data bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Raw data bytes (the final byte may be partially used).
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Child references in order.
    pub fn refs(&self) -> &[Cell] {
        &self.refs
    }

    /// Start reading this cell from the first bit and first reference.
    pub fn as_slice(&self) -> CellSlice<'_> {
        CellSlice::new(self)
    }

    /// Depth of the tree rooted at this cell (0 for a leaf).
    pub fn depth(&self) -> u16 {
        self.refs
            .iter()
            .map(|r| r.depth().saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    /// Representation hash of this cell.
    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.descriptors());
        hasher.update(self.padded_data());
        for r in &self.refs {
            hasher.update(r.depth().to_be_bytes());
        }
        for r in &self.refs {
            hasher.update(r.hash());
        }
        hasher.finalize().into()
    }

    /// The `d1`/`d2` descriptor bytes of an ordinary level-0 cell.
    pub(crate) fn descriptors(&self) -> [u8; 2] {
        // refs.len() <= MAX_REFS and bit_len <= MAX_BITS, so both fit a byte.
        let d1 = self.refs.len() as u8;
        let d2 = (self.bit_len / 8 + self.bit_len.div_ceil(8)) as u8;
        [d1, d2]
    }

    /// Data bytes with the completion tag appended when the last byte is partial.
    pub(crate) fn padded_data(&self) -> Vec<u8> {
        let mut data = self.data.clone();
        let rem = self.bit_len % 8;
        if rem != 0 {
            if let Some(last) = data.last_mut() {
                *last |= 0x80 >> rem;
            }
        }
        data
    }
}

/// Initial state of a contract: its code and persistent data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateInit {
    pub code: Cell,
    pub data: Cell,
}

impl StateInit {
    pub fn new(code: Cell, data: Cell) -> Self {
        Self { code, data }
    }

    /// Serialize as a `StateInit` cell.
    ///
    /// `split_depth` and `special` are absent, code and data are stored as
    /// maybe-references and the library dictionary is empty.
    pub fn to_cell(&self) -> Result<Cell, CellError> {
        let mut builder = CellBuilder::new();
        builder
            .store_uint(0, 2)?
            .store_maybe_ref(Some(self.code.clone()))?
            .store_maybe_ref(Some(self.data.clone()))?
            .store_bit(false)?;
        Ok(builder.build())
    }
}
