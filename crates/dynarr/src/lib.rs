//! A dynamic array that keeps allocated storage and live element count
//! strictly apart, with explicit control over when reallocation happens.

mod dyn_array;
mod errors;
mod global_alloc;
mod growth;
mod strategies;


pub use dyn_array::DynArray;
pub use errors::ArrayError;

pub type Result<T> = core::result::Result<T, ArrayError>;
