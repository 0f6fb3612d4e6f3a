mod emulator;
mod memory;
mod operations;
mod processor;
mod registers;

pub use {emulator::Emulator, memory::Memory, processor::Processor, registers::Registers};
