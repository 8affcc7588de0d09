//! Typed Rust bindings for TVM contract schemas.
//!
//! For each `<Contract>.abi.json` the generator emits one module with a
//! contract client type exposing:
//!
//! - `createFromABI`: initial data from constructor-flagged fields, and the
//!   resulting address
//! - `sendDeploy`: plain deployment, when the schema has no `constructor`;
//!   otherwise `sendConstructor` carries the initial state
//! - `getStateVariables`: every state field, decoded
//! - per function: a body builder, an internal send, a signed external body
//!   builder and an external send
//! - per getter: a read-only call decoding its outputs
//!
//! # Module Organization
//!
//! - [`naming`]: Method and identifier naming conventions
//! - [`mapper`]: ABI type to Rust type expressions
//! - [`ir`]: Resolved binding modules
//! - [`generator`]: Schema to IR, and file output
//! - [`render`]: Source back ends
//! - `logging`: Conditional logging macros (internal)
//!
//! # Features
//!
//! - `logging`: Enable tracing-based logging
//!
//! # Example
//!
//! ```ignore
//! use tvm_abi::AbiContract;
//! use tvm_abi_gen::Generator;
//!
//! let abi = AbiContract::from_file("build/Counter.abi.json")?;
//! let source = Generator::default().generate("Counter", &abi)?;
//! ```

pub mod error;
pub mod generator;
pub mod ir;
#[macro_use]
pub(crate) mod logging;
pub mod mapper;
pub mod naming;
pub mod render;

pub use error::{GenError, Result};
pub use generator::{ABI_SUFFIX, GenOptions, Generator, discover_contracts};
pub use ir::BindingModule;
pub use mapper::{rust_key_type, rust_type};
