#![doc = include_str!("../README.md")]

mod charset;
mod error;
mod grammar;
mod matcher;
mod transform;
mod tree;


pub use crate::charset::CharSet;
pub use crate::error::{BoxError, Error, ErrorKind};
pub use crate::grammar::{Grammar, GrammarKind, Label};
pub use crate::transform::Value;
pub use crate::tree::Match;
