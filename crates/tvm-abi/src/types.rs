//! ABI type descriptors.
//!
//! A descriptor is the textual form used in contract schemas (`uint256`,
//! `map(address,bool)`, `optional(cell)`, `tuple[]`, ...). [`AbiType::parse`]
//! turns it into an [`AbiType`] tree that drives both binding generation and
//! the value codec.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::error::{AbiError, Result};
use crate::schema::AbiParam;

/// Bit width of an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    /// `intN` / `uintN`
    Fixed(u16),
    /// `varintN` / `varuintN`: length-prefixed, at most `N - 1` bytes.
    Var(u16),
}

/// A named member of a tuple type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component {
    pub name: String,
    pub ty: AbiType,
}

/// A parsed ABI type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiType {
    Integer { signed: bool, width: IntWidth },
    Bool,
    String,
    /// `bytes` or `fixedbytesN`.
    Bytes { fixed: Option<u16> },
    Cell,
    /// `address` admits internal and external addresses; `address_std`
    /// only internal ones.
    Address { strict: bool },
    Array { element: Box<AbiType> },
    Optional { inner: Box<AbiType> },
    Map { key: Box<AbiType>, value: Box<AbiType> },
    Tuple { components: Vec<Component> },
}

const MAX_FIXED_SIGNED: u16 = 257;
const MAX_FIXED_UNSIGNED: u16 = 256;
const MAX_FIXED_BYTES: u16 = 32;

impl AbiType {
    pub fn uint(bits: u16) -> Self {
        Self::Integer {
            signed: false,
            width: IntWidth::Fixed(bits),
        }
    }

    pub fn int(bits: u16) -> Self {
        Self::Integer {
            signed: true,
            width: IntWidth::Fixed(bits),
        }
    }

    pub fn array(element: AbiType) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    pub fn optional(inner: AbiType) -> Self {
        Self::Optional {
            inner: Box::new(inner),
        }
    }

    pub fn map(key: AbiType, value: AbiType) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Parse a parameter's descriptor together with its component list.
    pub fn from_param(param: &AbiParam) -> Result<Self> {
        Self::parse(&param.ty, param.components.as_deref())
    }

    /// Parse a type descriptor.
    ///
    /// `components` belongs to the innermost `tuple` and is passed down
    /// through arrays, optionals and map values.
    pub fn parse(descriptor: &str, components: Option<&[AbiParam]>) -> Result<Self> {
        let d = descriptor.trim();

        if let Some(element) = d.strip_suffix("[]") {
            return Ok(Self::array(Self::parse(element, components)?));
        }

        if let Some(rest) = d.strip_prefix("optional(") {
            let inner = rest
                .strip_suffix(')')
                .ok_or_else(|| AbiError::UnsupportedType(d.to_string()))?;
            return Ok(Self::optional(Self::parse(inner, components)?));
        }

        if let Some(ty) = parse_integer(d)? {
            return Ok(ty);
        }

        match d {
            "bool" => return Ok(Self::Bool),
            "string" => return Ok(Self::String),
            "cell" => return Ok(Self::Cell),
            "address" => return Ok(Self::Address { strict: false }),
            "address_std" => return Ok(Self::Address { strict: true }),
            "bytes" => return Ok(Self::Bytes { fixed: None }),
            _ => {}
        }

        if let Some(digits) = d.strip_prefix("fixedbytes") {
            let n = parse_width(d, digits)?;
            if n == 0 || n > MAX_FIXED_BYTES {
                return Err(AbiError::UnsupportedType(d.to_string()));
            }
            return Ok(Self::Bytes { fixed: Some(n) });
        }

        if let Some(rest) = d.strip_prefix("map(") {
            let inner = rest
                .strip_suffix(')')
                .ok_or_else(|| AbiError::MalformedMapDescriptor(d.to_string()))?;
            let comma = top_level_comma(inner)
                .ok_or_else(|| AbiError::MalformedMapDescriptor(d.to_string()))?;
            let (key, value) = inner.split_at(comma);
            let value = value.get(1..).unwrap_or_default();
            let key = Self::parse(key, None)?;
            if !key.is_scalar_key() {
                return Err(AbiError::UnsupportedMapKey(key.to_string()));
            }
            return Ok(Self::map(key, Self::parse(value, components)?));
        }

        if d == "tuple" {
            let params = components
                .filter(|c| !c.is_empty())
                .ok_or_else(|| AbiError::MissingComponents(d.to_string()))?;
            let components = params
                .iter()
                .map(|p| {
                    Ok(Component {
                        name: p.name.clone(),
                        ty: AbiType::from_param(p)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            return Ok(Self::Tuple { components });
        }

        Err(AbiError::UnsupportedType(d.to_string()))
    }

    /// Whether values of this type may be used as map keys.
    pub fn is_scalar_key(&self) -> bool {
        matches!(
            self,
            Self::Integer { .. } | Self::Address { .. } | Self::Bool | Self::String | Self::Bytes { .. }
        )
    }

    /// Components of the innermost tuple, in schema form.
    pub fn components(&self) -> Option<Vec<AbiParam>> {
        match self {
            Self::Tuple { components } => Some(
                components
                    .iter()
                    .map(|c| c.ty.to_param(&c.name))
                    .collect(),
            ),
            Self::Array { element } => element.components(),
            Self::Optional { inner } => inner.components(),
            Self::Map { value, .. } => value.components(),
            _ => None,
        }
    }

    /// Rebuild the schema parameter this type was parsed from.
    pub fn to_param(&self, name: &str) -> AbiParam {
        AbiParam {
            name: name.to_string(),
            ty: self.to_string(),
            components: self.components(),
            init: None,
        }
    }

    /// Inclusive lower and exclusive upper bound of an integer type.
    pub fn integer_bounds(&self) -> Option<(BigInt, BigInt)> {
        let Self::Integer { signed, width } = self else {
            return None;
        };
        let bits = match width {
            IntWidth::Fixed(n) => usize::from(*n),
            IntWidth::Var(n) => 8 * usize::from(n.saturating_sub(1)),
        };
        if bits == 0 {
            return Some((BigInt::zero(), BigInt::one()));
        }
        if *signed {
            let half = BigInt::one() << (bits - 1);
            Some((-half.clone(), half))
        } else {
            Some((BigInt::zero(), BigInt::one() << bits))
        }
    }

    /// Reject integers that do not fit this type.
    pub fn check_integer(&self, value: &BigInt) -> Result<()> {
        let (low, high) = self
            .integer_bounds()
            .ok_or_else(|| AbiError::mismatch(self, "integer"))?;
        if *value < low || *value >= high {
            return Err(AbiError::IntegerOutOfRange {
                value: value.to_string(),
                ty: self.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer { signed, width } => {
                let sign = if *signed { "int" } else { "uint" };
                match width {
                    IntWidth::Fixed(n) => write!(f, "{sign}{n}"),
                    IntWidth::Var(n) => write!(f, "var{sign}{n}"),
                }
            }
            Self::Bool => f.write_str("bool"),
            Self::String => f.write_str("string"),
            Self::Bytes { fixed: None } => f.write_str("bytes"),
            Self::Bytes { fixed: Some(n) } => write!(f, "fixedbytes{n}"),
            Self::Cell => f.write_str("cell"),
            Self::Address { strict: false } => f.write_str("address"),
            Self::Address { strict: true } => f.write_str("address_std"),
            Self::Array { element } => write!(f, "{element}[]"),
            Self::Optional { inner } => write!(f, "optional({inner})"),
            Self::Map { key, value } => write!(f, "map({key},{value})"),
            Self::Tuple { .. } => f.write_str("tuple"),
        }
    }
}

fn parse_width(descriptor: &str, digits: &str) -> Result<u16> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AbiError::UnsupportedType(descriptor.to_string()));
    }
    digits
        .parse()
        .map_err(|_| AbiError::UnsupportedType(descriptor.to_string()))
}

fn parse_integer(d: &str) -> Result<Option<AbiType>> {
    let (signed, var, digits) = if let Some(rest) = d.strip_prefix("varuint") {
        (false, true, rest)
    } else if let Some(rest) = d.strip_prefix("varint") {
        (true, true, rest)
    } else if let Some(rest) = d.strip_prefix("uint") {
        (false, false, rest)
    } else if let Some(rest) = d.strip_prefix("int") {
        (true, false, rest)
    } else {
        return Ok(None);
    };
    let n = parse_width(d, digits)?;
    let valid = if var {
        n == 16 || n == 32
    } else if signed {
        (1..=MAX_FIXED_SIGNED).contains(&n)
    } else {
        (1..=MAX_FIXED_UNSIGNED).contains(&n)
    };
    if !valid {
        return Err(AbiError::UnsupportedType(d.to_string()));
    }
    let width = if var { IntWidth::Var(n) } else { IntWidth::Fixed(n) };
    Ok(Some(AbiType::Integer { signed, width }))
}

/// Byte offset of the first comma not nested inside parentheses.
fn top_level_comma(inner: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in inner.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}
