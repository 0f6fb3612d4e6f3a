use mips_emulator::Emulator;
use mips_types::MipsError;
use std::io;
use std::io::Write;

/// A small interactive shell around the emulator
pub struct Debugger {
    pub emulator: Emulator,
    pub trace: bool,
}

impl Debugger {
    pub fn new(emulator: Emulator) -> Self {
        Self {
            emulator,
            trace: false,
        }
    }

    /// Run the debugger until the program halts or the user exits
    pub fn run(&mut self) -> Result<(), MipsError> {
        loop {
            eprint!("mips++> ");
            io::stderr().flush()?;

            let mut input = String::new();
            if io::stdin().read_line(&mut input)? == 0 {
                // EOF
                break;
            }

            self.run_command(&input);

            if !self.emulator.cpu.running {
                break;
            }
        }

        eprintln!(
            "Program exited with code {}",
            self.emulator.cpu.return_code
        );

        Ok(())
    }

    /// Run a command
    pub fn run_command(&mut self, command: &str) {
        let command: Vec<&str> = command.trim().split(' ').collect();

        match command.as_slice() {
            ["trace", enabled] => self.set_trace(enabled),
            ["step"] | ["s"] => self.step(),
            ["state"] => eprintln!("{}", self.emulator.state(false)),
            ["memory"] => eprintln!("{}", self.emulator.state(true)),
            ["exit"] | ["quit"] => self.emulator.cpu.running = false,
            [""] => {} // Ignore empty input
            _ => eprintln!("Unknown input"),
        }
    }

    /// Execute the next instruction
    fn step(&mut self) {
        if self.trace {
            if let Ok(instruction) = self
                .emulator
                .cpu
                .load_next_instruction(&self.emulator.memory)
            {
                eprintln!("{}", instruction.stringify());
            }
        }

        if let Err(error) = self.emulator.step() {
            eprintln!("Runtime error: {}", error);
            self.emulator.cpu.running = false;
        }
    }

    /// Set the trace option
    fn set_trace(&mut self, option: &str) {
        match option {
            "on" => {
                self.trace = true;
                eprintln!("Instruction tracing is ON");
            }
            "off" => {
                self.trace = false;
                eprintln!("Instruction tracing is OFF");
            }
            _ => eprintln!("Unknown input"),
        }
    }
}
