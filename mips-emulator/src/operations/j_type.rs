use crate::processor::Processor;
use mips_types::constants::{OP_J, OP_JAL, REG_RA};
use mips_types::{Instruction, MipsError};

impl Processor {
    /// J-type dispatch. The 26-bit target is used as the new program
    /// counter verbatim; there is no shift and no splice with the upper
    /// program counter bits.
    pub(crate) fn execute_j(&mut self, instruction: Instruction) -> Result<(), MipsError> {
        let address = instruction.pseudo_address();

        match instruction.op_code() {
            OP_J => {
                self.program_counter = address;
            }
            OP_JAL => {
                // The program counter already points past the jal
                self.registers.set(REG_RA, self.program_counter);
                self.program_counter = address;
            }
            op_code => {
                return Err(MipsError::runtime(format!(
                    "Invalid opcode 0x{:02x} for J-type instruction",
                    op_code
                )))
            }
        }

        Ok(())
    }
}
