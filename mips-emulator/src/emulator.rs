use crate::memory::Memory;
use crate::processor::Processor;
use log::info;
use mips_types::constants::TEXT_OFFSET;
use mips_types::module::{MipsModule, SEGMENT_DATA, SEGMENT_TEXT};
use mips_types::MipsError;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Binds a memory and a processor. The emulator owns both; the processor
/// borrows the memory for each step.
#[derive(Debug, Default)]
pub struct Emulator {
    pub memory: Memory,
    pub cpu: Processor,
}

impl Emulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an object file into memory, reset the processor, and hold at
    /// the entry point
    pub fn prepare_and_hold(&mut self, path: &Path) -> Result<(), MipsError> {
        let file_data = fs::read(path)?;
        let module = MipsModule::parse(&mut Cursor::new(file_data))?;
        info!("Loaded module with header: {:?}", module.header);

        for section in &module.sections {
            match section.header.segment {
                SEGMENT_TEXT => self
                    .memory
                    .load_text_section(&section.data, section.header.offset),
                SEGMENT_DATA => self
                    .memory
                    .load_data_section(&section.data, section.header.offset),
                segment => info!("Skipping unknown segment {}", segment),
            }
        }

        self.cpu.reset();
        self.cpu.set_entry(TEXT_OFFSET);

        Ok(())
    }

    /// Step until the program halts. A fault terminates the loop and
    /// surfaces the error.
    pub fn run(&mut self) -> Result<(), MipsError> {
        while self.cpu.running {
            self.step()?;
        }

        info!("Program exited with code {}", self.cpu.return_code);

        Ok(())
    }

    /// Execute a single processor step
    pub fn step(&mut self) -> Result<(), MipsError> {
        self.cpu.step(&mut self.memory)
    }

    /// Get a human-readable snapshot of the machine state
    pub fn state(&self, show_memory: bool) -> String {
        let mut state = self.cpu.state();

        if show_memory {
            state.push_str("\n\nMemory:\n");

            let mut dump = Vec::new();
            if self.memory.dump(&mut dump).is_ok() {
                state.push_str(&String::from_utf8_lossy(&dump));
            }
        }

        state
    }
}
