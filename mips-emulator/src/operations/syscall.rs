use crate::memory::Memory;
use crate::processor::Processor;
use log::debug;
use mips_types::constants::{
    REG_A0, REG_V0, SYSCALL_EXIT, SYSCALL_PRINT_CHAR, SYSCALL_PRINT_INT, SYSCALL_PRINT_STR,
    SYSCALL_READ_CHAR, SYSCALL_READ_INT, SYSCALL_READ_STR, SYSCALL_SBRK,
};
use mips_types::MipsError;
use std::io;
use std::io::Write;

impl Processor {
    /// Dispatch a syscall. The code comes from `$v0`; the argument, where
    /// one is taken, from `$a0`.
    pub(crate) fn op_syscall(&mut self, memory: &mut Memory) -> Result<(), MipsError> {
        let operation = self.registers.get(REG_V0);
        debug!("syscall {}", operation);

        match operation {
            SYSCALL_PRINT_INT => self.syscall_print_int()?,
            SYSCALL_PRINT_STR => self.syscall_print_str(memory)?,
            SYSCALL_READ_INT => self.syscall_read_int()?,
            SYSCALL_EXIT => self.syscall_exit(),
            SYSCALL_PRINT_CHAR => self.syscall_print_char()?,
            // Declared but not implemented
            SYSCALL_READ_STR | SYSCALL_SBRK | SYSCALL_READ_CHAR => {}
            code => {
                return Err(MipsError::runtime(format!("Invalid syscall code {}", code)));
            }
        }

        Ok(())
    }

    fn syscall_print_int(&mut self) -> Result<(), MipsError> {
        let value = self.registers.get(REG_A0) as i32;
        write!(self.output, "{}", value)?;
        self.output.flush()?;

        Ok(())
    }

    fn syscall_print_str(&mut self, memory: &Memory) -> Result<(), MipsError> {
        let bytes = memory.read_string(self.registers.get(REG_A0));
        self.output.write_all(&bytes)?;
        self.output.flush()?;

        Ok(())
    }

    fn syscall_read_int(&mut self) -> Result<(), MipsError> {
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let value: i32 = input
            .trim()
            .parse()
            .map_err(|_| MipsError::runtime(format!("Invalid integer input '{}'", input.trim())))?;
        self.registers.set(REG_V0, value as u32);

        Ok(())
    }

    /// Halt the run loop; the driver exits the process with the recorded
    /// code
    fn syscall_exit(&mut self) {
        self.return_code = self.registers.get(REG_A0);
        self.running = false;
    }

    fn syscall_print_char(&mut self) -> Result<(), MipsError> {
        let byte = (self.registers.get(REG_A0) & 0xFF) as u8;
        self.output.write_all(&[byte])?;
        self.output.flush()?;

        Ok(())
    }
}
