//! Back ends printing a [`BindingModule`](crate::ir::BindingModule).

pub mod rust;
mod writer;

pub use writer::SourceWriter;
