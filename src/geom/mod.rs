pub mod convert;
mod parse;

pub use convert::Bounds;
