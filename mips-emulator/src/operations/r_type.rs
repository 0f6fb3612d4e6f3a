use crate::memory::Memory;
use crate::processor::Processor;
use mips_types::constants::{
    FUNCTION_ADD, FUNCTION_AND, FUNCTION_OR, FUNCTION_SUB, FUNCTION_SYSCALL,
};
use mips_types::{Instruction, MipsError};

impl Processor {
    /// R-type dispatch: the funct field selects the operation
    pub(crate) fn execute_r(
        &mut self,
        memory: &mut Memory,
        instruction: Instruction,
    ) -> Result<(), MipsError> {
        let rs = self.registers.get(instruction.s_register());
        let rt = self.registers.get(instruction.t_register());
        let rd = instruction.d_register();

        let value = match instruction.function() {
            FUNCTION_ADD => rs.wrapping_add(rt),
            FUNCTION_SUB => rs.wrapping_sub(rt),
            FUNCTION_AND => rs & rt,
            FUNCTION_OR => rs | rt,
            FUNCTION_SYSCALL => return self.op_syscall(memory),
            function => {
                return Err(MipsError::runtime(format!(
                    "Invalid funct 0x{:02x} for R-type instruction",
                    function
                )))
            }
        };

        self.registers.set(rd, value);

        Ok(())
    }
}
