mod assembler;
mod lexer;
mod tables;

pub use assembler::{Assembler, Symbol};
