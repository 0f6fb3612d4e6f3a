pub mod constants;
pub mod error;
pub mod instruction;
pub mod module;

pub use {error::MipsError, instruction::Instruction};
