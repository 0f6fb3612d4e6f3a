use crate::memory::Memory;
use crate::processor::{add_unsigned, Processor};
use mips_types::constants::{
    OP_ANDI, OP_BEQ, OP_BGTZ, OP_BNE, OP_LUI, OP_LW, OP_ORI, OP_SLTI, OP_SW, OP_XORI,
};
use mips_types::{Instruction, MipsError};

impl Processor {
    /// I-type dispatch. The immediate sign-extends for arithmetic and
    /// memory addressing and zero-extends for the bitwise operations.
    pub(crate) fn execute_i(
        &mut self,
        memory: &mut Memory,
        instruction: Instruction,
    ) -> Result<(), MipsError> {
        let rs_value = self.registers.get(instruction.s_register());
        let rt = instruction.t_register();
        let immediate = instruction.immediate();
        let zero_extended = immediate as u16 as u32;

        match instruction.op_code() {
            OP_LW => {
                let address = add_unsigned(rs_value, immediate as i32);
                let value = memory.read_word(address)?;
                self.registers.set(rt, value);
            }
            OP_SW => {
                let address = add_unsigned(rs_value, immediate as i32);
                memory.write_word(address, self.registers.get(rt))?;
            }
            OP_LUI => {
                self.registers.set(rt, zero_extended << 16);
            }
            // Shadowed: the syscall opcode claims 0x0C before I-type decode
            OP_ANDI => {
                self.registers.set(rt, rs_value & zero_extended);
            }
            OP_ORI => {
                self.registers.set(rt, rs_value | zero_extended);
            }
            OP_XORI => {
                self.registers.set(rt, rs_value ^ zero_extended);
            }
            OP_SLTI => {
                let set = (rs_value as i32) < immediate as i32;
                self.registers.set(rt, set as u32);
            }
            OP_BEQ => {
                if rs_value == self.registers.get(rt) {
                    self.branch(immediate);
                }
            }
            OP_BNE => {
                if rs_value != self.registers.get(rt) {
                    self.branch(immediate);
                }
            }
            OP_BGTZ => {
                if (rs_value as i32) > 0 {
                    self.branch(immediate);
                }
            }
            op_code => {
                return Err(MipsError::runtime(format!(
                    "Invalid opcode 0x{:02x} for I-type instruction",
                    op_code
                )))
            }
        }

        Ok(())
    }

    /// Branch offsets are in words, relative to the already-incremented
    /// program counter
    fn branch(&mut self, immediate: i16) {
        self.program_counter = add_unsigned(self.program_counter, (immediate as i32) << 2);
    }
}
