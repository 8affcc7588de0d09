//! Wire items exchanged with the contract provider.

use std::collections::VecDeque;

use num_bigint::BigInt;
use num_traits::Zero;

use crate::address::Address;
use crate::cell::Cell;
use crate::error::{AbiError, Result};

/// One slot of a getter argument list or result tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackItem {
    Null,
    Int(BigInt),
    Cell(Cell),
    /// A slice over the whole of the contained cell.
    Slice(Cell),
    Tuple(Vec<StackItem>),
}

impl StackItem {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "int",
            Self::Cell(_) => "cell",
            Self::Slice(_) => "slice",
            Self::Tuple(_) => "tuple",
        }
    }
}

/// Sequential cursor over a list of [`StackItem`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TupleReader {
    items: VecDeque<StackItem>,
}

impl TupleReader {
    pub fn new(items: Vec<StackItem>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.items.len()
    }

    pub fn peek(&self) -> Result<&StackItem> {
        self.items
            .front()
            .ok_or_else(|| AbiError::shape("an item", "end of tuple"))
    }

    pub fn pop(&mut self) -> Result<StackItem> {
        self.items
            .pop_front()
            .ok_or_else(|| AbiError::shape("an item", "end of tuple"))
    }

    pub fn read_big_number(&mut self) -> Result<BigInt> {
        match self.pop()? {
            StackItem::Int(value) => Ok(value),
            other => Err(AbiError::shape("int", other.kind())),
        }
    }

    /// Any non-zero integer reads as `true`.
    pub fn read_boolean(&mut self) -> Result<bool> {
        Ok(!self.read_big_number()?.is_zero())
    }

    /// Read an address from a slice or cell; `addr_none` and null read as `None`.
    pub fn read_address(&mut self) -> Result<Option<Address>> {
        match self.pop()? {
            StackItem::Null => Ok(None),
            StackItem::Slice(cell) | StackItem::Cell(cell) => Ok(cell.as_slice().load_address()?),
            other => Err(AbiError::shape("slice", other.kind())),
        }
    }

    pub fn read_cell(&mut self) -> Result<Cell> {
        match self.pop()? {
            StackItem::Cell(cell) | StackItem::Slice(cell) => Ok(cell),
            other => Err(AbiError::shape("cell", other.kind())),
        }
    }

    pub fn read_tuple(&mut self) -> Result<TupleReader> {
        match self.pop()? {
            StackItem::Tuple(items) => Ok(TupleReader::new(items)),
            other => Err(AbiError::shape("tuple", other.kind())),
        }
    }
}

impl From<Vec<StackItem>> for TupleReader {
    fn from(items: Vec<StackItem>) -> Self {
        Self::new(items)
    }
}
