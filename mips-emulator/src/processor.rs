use crate::memory::Memory;
use crate::registers::Registers;
use log::debug;
use mips_types::constants::{OP_J, OP_JAL, OP_R_TYPE, OP_SYSCALL};
use mips_types::{Instruction, MipsError};
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::io;
use std::io::Write;

/// A MIPS processor.
///
/// The processor does not own memory; the emulator lends it a memory
/// reference for the duration of each step.
pub struct Processor {
    pub registers: Registers,
    pub program_counter: u32,
    pub running: bool,
    pub return_code: u32,
    pub(crate) output: Box<dyn Write>,
}

impl Processor {
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Build a processor whose syscall output goes to the given writer
    /// instead of stdout
    pub fn with_output(output: Box<dyn Write>) -> Self {
        Processor {
            registers: Registers::new(),
            program_counter: 0,
            running: true,
            return_code: 0,
            output,
        }
    }

    /// Reset all registers and the program counter to zero
    pub fn reset(&mut self) {
        self.registers = Registers::new();
        self.program_counter = 0;
        self.running = true;
        self.return_code = 0;
    }

    pub fn set_entry(&mut self, address: u32) {
        self.program_counter = address;
    }

    /// One fetch-decode-execute cycle
    pub fn step(&mut self, memory: &mut Memory) -> Result<(), MipsError> {
        let instruction = self.fetch(memory)?;
        self.execute(memory, instruction)
    }

    /// Read the instruction at the program counter without advancing
    pub fn load_next_instruction(&self, memory: &Memory) -> Result<Instruction, MipsError> {
        Ok(Instruction(memory.read_word(self.program_counter)?))
    }

    fn fetch(&mut self, memory: &Memory) -> Result<Instruction, MipsError> {
        let instruction = self.load_next_instruction(memory)?;
        debug!(
            "0x{:08x}: {}",
            self.program_counter,
            instruction.stringify()
        );
        self.program_counter = self.program_counter.wrapping_add(4);

        Ok(instruction)
    }

    /// Dispatch on the opcode. R-types dispatch again on funct; the syscall
    /// opcode is claimed before the I-type decode gets a look at it.
    fn execute(&mut self, memory: &mut Memory, instruction: Instruction) -> Result<(), MipsError> {
        match instruction.op_code() {
            OP_R_TYPE => self.execute_r(memory, instruction),
            OP_SYSCALL => self.op_syscall(memory),
            OP_J | OP_JAL => self.execute_j(instruction),
            _ => self.execute_i(memory, instruction),
        }
    }

    /// Get the string representation of the processor state
    pub fn state(&self) -> String {
        let mut state = format!("PC: {}\n", self.program_counter);
        state.push_str("Registers:\n");

        for register in 0..32 {
            state.push_str(&format!("${}: {}\n", register, self.registers.get(register)));
        }

        state.push_str(&format!("HI: {}\n", self.registers.hi));
        state.push_str(&format!("LO: {}\n", self.registers.lo));
        state
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Processor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("registers", &self.registers)
            .field("program_counter", &self.program_counter)
            .field("running", &self.running)
            .field("return_code", &self.return_code)
            .finish()
    }
}

/// Add a signed offset to an unsigned value, wrapping on overflow
pub(crate) fn add_unsigned(base: u32, offset: i32) -> u32 {
    base.wrapping_add(offset as u32)
}
