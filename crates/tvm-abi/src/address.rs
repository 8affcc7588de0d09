//! Contract and external addresses.
//!
//! Two textual forms are used:
//!
//! - raw `workchain:hash` for standard addresses (`0:83df…`)
//! - the compact form for external addresses: `:` followed by the hex digits
//!   of the address bits. When the bit length is not a multiple of four, a
//!   marker `1` bit and zero bits are appended to reach a nibble boundary and
//!   the string ends with `_`. The zero-length external address is `""`.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;
use thiserror::Error;

use crate::cell::{CellBuilder, CellError, CellSlice};

/// Largest external address length expressible in its 9-bit length field.
pub const MAX_EXTERNAL_BITS: u32 = 511;

/// Errors raised while parsing or (de)serializing addresses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid raw address '{0}': expected <workchain>:<64 hex digits>")]
    InvalidRaw(String),

    #[error("Invalid external address '{0}'")]
    InvalidExternal(String),

    #[error("External address value needs {needed} bits but declares {bits}")]
    ExternalValueTooWide { needed: u64, bits: u32 },

    #[error("External address length {0} exceeds 511 bits")]
    ExternalTooLong(u32),

    #[error("Unsupported address encoding (tag {0:#04b})")]
    UnsupportedTag(u64),

    #[error(transparent)]
    Cell(#[from] CellError),
}

/// A standard (`addr_std`) contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StdAddress {
    pub workchain: i32,
    pub hash: [u8; 32],
}

impl StdAddress {
    pub const fn new(workchain: i32, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }

    /// The `workchain:hex` form accepted by ABI tooling.
    pub fn to_raw_string(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }

    pub fn from_raw_string(text: &str) -> Result<Self, AddressError> {
        let invalid = || AddressError::InvalidRaw(text.to_string());
        let (wc, hash_hex) = text.split_once(':').ok_or_else(invalid)?;
        let workchain: i32 = wc.parse().map_err(|_| invalid())?;
        let bytes = hex::decode(hash_hex).map_err(|_| invalid())?;
        let hash: [u8; 32] = bytes.try_into().map_err(|_| invalid())?;
        Ok(Self { workchain, hash })
    }
}

impl fmt::Display for StdAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_raw_string())
    }
}

impl FromStr for StdAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_raw_string(s)
    }
}

/// An external (`addr_extern`) address: an arbitrary bit string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExternalAddress {
    value: BigUint,
    bits: u32,
}

impl ExternalAddress {
    pub fn new(value: BigUint, bits: u32) -> Result<Self, AddressError> {
        if bits > MAX_EXTERNAL_BITS {
            return Err(AddressError::ExternalTooLong(bits));
        }
        if value.bits() > u64::from(bits) {
            return Err(AddressError::ExternalValueTooWide {
                needed: value.bits(),
                bits,
            });
        }
        Ok(Self { value, bits })
    }

    /// The zero-length placeholder address.
    pub fn none() -> Self {
        Self {
            value: BigUint::zero(),
            bits: 0,
        }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn is_none(&self) -> bool {
        self.bits == 0
    }

    /// Compact textual form (see module docs).
    pub fn to_compact(&self) -> String {
        if self.bits == 0 {
            return String::new();
        }
        let rem = self.bits % 4;
        if rem == 0 {
            let width = (self.bits / 4) as usize;
            return format!(":{:0width$X}", self.value);
        }
        let pad = 4 - rem;
        let padded = (&self.value << pad) | (BigUint::from(1u8) << (pad - 1));
        let width = ((self.bits + pad) / 4) as usize;
        format!(":{padded:0width$X}_")
    }

    pub fn from_compact(text: &str) -> Result<Self, AddressError> {
        let invalid = || AddressError::InvalidExternal(text.to_string());
        if text.is_empty() {
            return Ok(Self::none());
        }
        let body = text.strip_prefix(':').ok_or_else(invalid)?;
        let (digits, padded) = match body.strip_suffix('_') {
            Some(digits) => (digits, true),
            None => (body, false),
        };
        if digits.is_empty() {
            return if padded { Err(invalid()) } else { Ok(Self::none()) };
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let mut value = BigUint::parse_bytes(digits.as_bytes(), 16).ok_or_else(invalid)?;
        let mut bits = u32::try_from(digits.len() * 4).map_err(|_| invalid())?;
        if padded {
            // Drop the zero fill and the marker bit above it.
            let zeros = value.trailing_zeros().ok_or_else(invalid)?;
            let strip = u32::try_from(zeros + 1).map_err(|_| invalid())?;
            value >>= strip;
            bits -= strip;
        }
        Self::new(value, bits)
    }
}

impl fmt::Display for ExternalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_compact())
    }
}

/// Any address a non-strict `address` parameter may hold.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Address {
    Std(StdAddress),
    External(ExternalAddress),
}

impl Address {
    /// Parse either textual form: raw for standard, compact (or `""`) for external.
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        if text.is_empty() || text.starts_with(':') {
            ExternalAddress::from_compact(text).map(Self::External)
        } else {
            StdAddress::from_raw_string(text).map(Self::Std)
        }
    }

    pub fn as_std(&self) -> Option<&StdAddress> {
        match self {
            Self::Std(addr) => Some(addr),
            Self::External(_) => None,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Std(addr) => addr.fmt(f),
            Self::External(addr) => addr.fmt(f),
        }
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<StdAddress> for Address {
    fn from(addr: StdAddress) -> Self {
        Self::Std(addr)
    }
}

impl From<ExternalAddress> for Address {
    fn from(addr: ExternalAddress) -> Self {
        Self::External(addr)
    }
}

const TAG_NONE: u64 = 0b00;
const TAG_EXTERN: u64 = 0b01;
const TAG_STD: u64 = 0b10;

impl CellBuilder {
    /// Store an address; `None` is written as `addr_none`.
    pub fn store_address(&mut self, address: Option<&Address>) -> Result<&mut Self, CellError> {
        match address {
            None => self.store_uint(TAG_NONE, 2),
            Some(Address::Std(addr)) => self
                .store_uint(TAG_STD, 2)?
                .store_bit(false)?
                .store_int(i64::from(addr.workchain), 8)?
                .store_bits(&addr.hash, 256),
            Some(Address::External(addr)) => self
                .store_uint(TAG_EXTERN, 2)?
                .store_uint(u64::from(addr.bits), 9)?
                .store_big_uint(&addr.value, addr.bits as usize),
        }
    }
}

impl CellSlice<'_> {
    /// Load an address; `addr_none` yields `None`.
    pub fn load_address(&mut self) -> Result<Option<Address>, AddressError> {
        match self.load_uint(2)? {
            TAG_NONE => Ok(None),
            TAG_EXTERN => {
                let bits = self.load_uint(9)? as u32;
                let value = self.load_big_uint(bits as usize)?;
                Ok(Some(Address::External(ExternalAddress::new(value, bits)?)))
            }
            TAG_STD => {
                if self.load_bit()? {
                    return Err(AddressError::UnsupportedTag(TAG_STD));
                }
                let workchain = self.load_int(8)? as i32;
                let bytes = self.load_bits(256)?;
                let hash: [u8; 32] = bytes
                    .try_into()
                    .map_err(|_| CellError::BitUnderflow {
                        needed: 256,
                        available: 0,
                    })?;
                Ok(Some(Address::Std(StdAddress { workchain, hash })))
            }
            tag => Err(AddressError::UnsupportedTag(tag)),
        }
    }
}
