use crate::lexer;
use crate::tables;
use log::{debug, trace};
use mips_types::constants::OP_R_TYPE;
use mips_types::module::MipsModule;
use mips_types::{Instruction, MipsError};
use std::fs;
use std::fs::File;
use std::mem;
use std::path::Path;

/// A label collected by the first pass.
///
/// The address is the 0-based source line index, not a text offset; see the
/// repository design notes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub address: u32,
}

/// The two-pass assembler. One instance assembles one source file; the
/// encoded binary is handed to the object writer at the end.
#[derive(Debug, Default)]
pub struct Assembler {
    lines: Vec<String>,
    labels: Vec<Symbol>,
    binary: Vec<u8>,
    text_size: u32,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a source file into an object file
    pub fn assemble(&mut self, source: &Path, output: &Path) -> Result<(), MipsError> {
        self.load_file(source)?;
        self.first_pass();
        self.second_pass()?;

        let module = MipsModule::from_text(mem::take(&mut self.binary));
        let mut output_file = File::create(output)?;
        module.write(&mut output_file)?;
        debug!("Wrote {} text bytes to {}", self.text_size, output.display());

        Ok(())
    }

    /// Load the source file, split into lines
    fn load_file(&mut self, source: &Path) -> Result<(), MipsError> {
        let contents = fs::read_to_string(source)?;
        self.load_source(&contents);

        Ok(())
    }

    /// Load already-read source text. Useful for callers that do not go
    /// through the filesystem.
    pub fn load_source(&mut self, source: &str) {
        self.lines = source.lines().map(str::to_string).collect();
    }

    /// First pass: collect labels. The recorded address is the source line
    /// index.
    fn first_pass(&mut self) {
        debug!("First pass over {} lines", self.lines.len());

        for (index, line) in self.lines.iter().enumerate() {
            let line = line.trim();

            if line.is_empty() || lexer::is_comment(line) {
                continue;
            }

            if lexer::is_label(line) {
                let name = lexer::label_name(line);
                trace!("Label {} -> {}", name, index);
                self.labels.push(Symbol {
                    name: name.to_string(),
                    address: index as u32,
                });
            }
        }
    }

    /// Second pass: encode every instruction line, appending big-endian
    /// words to the binary.
    fn second_pass(&mut self) -> Result<(), MipsError> {
        debug!("Second pass over {} lines", self.lines.len());

        for index in 0..self.lines.len() {
            let line = self.lines[index].trim().to_string();

            if line.is_empty() || lexer::is_comment(&line) || lexer::is_label(&line) {
                continue;
            }

            let tokens = lexer::tokenize(&line);
            let instruction = self.encode_line(&tokens, index)?;
            self.append_instruction(instruction);
        }

        Ok(())
    }

    /// Encode one tokenised instruction line. Diagnostics report 1-based
    /// line numbers.
    fn encode_line(&self, tokens: &[String], index: usize) -> Result<Instruction, MipsError> {
        let line = index + 1;
        let mnemonic = tokens[0].as_str();

        if let Some(function) = tables::r_function(mnemonic) {
            assert_arg_count(tokens, 4, line)?;
            // Source order is `mnemonic rd, rs, rt`
            let rd = parse_register(&tokens[1], line, mnemonic)?;
            let rs = parse_register(&tokens[2], line, mnemonic)?;
            let rt = parse_register(&tokens[3], line, mnemonic)?;

            Ok(Instruction::r_type(OP_R_TYPE, rs, rt, rd, 0, function))
        } else if let Some(op_code) = tables::i_opcode(mnemonic) {
            assert_arg_count(tokens, 4, line)?;
            // Source order is `mnemonic rt, rs, imm`
            let rt = parse_register(&tokens[1], line, mnemonic)?;
            let rs = parse_register(&tokens[2], line, mnemonic)?;
            let immediate = lexer::parse_immediate(&tokens[3]).ok_or_else(|| {
                MipsError::syntax(line, mnemonic, format!("Invalid immediate '{}'", tokens[3]))
            })?;

            Ok(Instruction::i_type(op_code, rs, rt, immediate))
        } else if let Some(op_code) = tables::j_opcode(mnemonic) {
            assert_arg_count(tokens, 2, line)?;
            let address = lexer::parse_address(&tokens[1]).ok_or_else(|| {
                MipsError::syntax(line, mnemonic, format!("Invalid address '{}'", tokens[1]))
            })?;

            Ok(Instruction::j_type(op_code, address))
        } else {
            Err(MipsError::syntax(line, mnemonic, "Unknown instruction"))
        }
    }

    /// Append the instruction to the binary, most significant byte first
    fn append_instruction(&mut self, instruction: Instruction) {
        self.binary.extend_from_slice(&instruction.0.to_be_bytes());
        self.text_size += 4;
    }
}

fn assert_arg_count(tokens: &[String], expected: usize, line: usize) -> Result<(), MipsError> {
    if tokens.len() != expected {
        return Err(MipsError::syntax(
            line,
            &tokens[0],
            format!(
                "Invalid number of arguments (expected {}, got {})",
                expected,
                tokens.len()
            ),
        ));
    }

    Ok(())
}

fn parse_register(token: &str, line: usize, mnemonic: &str) -> Result<u8, MipsError> {
    lexer::parse_register(token)
        .ok_or_else(|| MipsError::syntax(line, mnemonic, format!("Invalid register '{}'", token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mips_types::constants::{FUNCTION_ADD, OP_ADDI, OP_J};

    fn assemble_source(source: &str) -> Result<Vec<u8>, MipsError> {
        let mut assembler = Assembler::new();
        assembler.load_source(source);
        assembler.first_pass();
        assembler.second_pass()?;
        Ok(assembler.binary)
    }

    fn first_word(binary: &[u8]) -> Instruction {
        Instruction(u32::from_be_bytes([
            binary[0], binary[1], binary[2], binary[3],
        ]))
    }

    #[test]
    fn add_encodes_with_source_operand_order() {
        let binary = assemble_source("add $t1, $t2, $t3").unwrap();
        assert_eq!(binary.len(), 4);

        let word = first_word(&binary);
        assert_eq!(word.op_code(), 0x00);
        assert_eq!(word.d_register(), 1);
        assert_eq!(word.s_register(), 2);
        assert_eq!(word.t_register(), 3);
        assert_eq!(word.function(), FUNCTION_ADD);
    }

    #[test]
    fn words_are_appended_big_endian() {
        let binary = assemble_source("j 1").unwrap();

        // j 1 = 0x08000001: MSB first
        assert_eq!(binary, vec![0x08, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn i_type_encodes_rt_rs_imm() {
        let binary = assemble_source("addi $t4, $t5, -2").unwrap();

        let word = first_word(&binary);
        assert_eq!(word.op_code(), OP_ADDI);
        assert_eq!(word.t_register(), 4);
        assert_eq!(word.s_register(), 5);
        assert_eq!(word.immediate(), -2);
    }

    #[test]
    fn j_type_encodes_raw_address() {
        let binary = assemble_source("j 4096").unwrap();

        let word = first_word(&binary);
        assert_eq!(word.op_code(), OP_J);
        assert_eq!(word.pseudo_address(), 4096);
    }

    #[test]
    fn labels_record_source_line_indices() {
        let mut assembler = Assembler::new();
        assembler.load_source("# header\nmain:\nadd $t1, $t2, $t3\nloop:\n");
        assembler.first_pass();

        assert_eq!(
            assembler.labels,
            vec![
                Symbol {
                    name: "main".to_string(),
                    address: 1
                },
                Symbol {
                    name: "loop".to_string(),
                    address: 3
                },
            ]
        );
    }

    #[test]
    fn empty_comment_and_label_lines_emit_nothing() {
        let binary = assemble_source("\n   \n# only a comment\nmain:\n").unwrap();

        assert!(binary.is_empty());
    }

    #[test]
    fn wrong_argument_count_is_a_syntax_error() {
        let error = assemble_source("add $t1, $t2").unwrap_err();

        match error {
            MipsError::Syntax {
                line,
                mnemonic,
                detail,
            } => {
                assert_eq!(line, 1);
                assert_eq!(mnemonic, "add");
                assert!(detail.contains("number of arguments"));
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_register_is_a_syntax_error() {
        let error = assemble_source("add $x1, $t2, $t3").unwrap_err();

        match error {
            MipsError::Syntax { detail, .. } => assert!(detail.contains("Invalid register")),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_immediate_is_a_syntax_error() {
        let error = assemble_source("addi $t1, $t2, 99999").unwrap_err();

        match error {
            MipsError::Syntax { detail, .. } => assert!(detail.contains("Invalid immediate")),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_mnemonic_is_a_syntax_error() {
        let error = assemble_source("frobnicate $t1, $t2, $t3").unwrap_err();

        match error {
            MipsError::Syntax { line, mnemonic, .. } => {
                assert_eq!(line, 1);
                assert_eq!(mnemonic, "frobnicate");
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_jump_address_is_a_syntax_error() {
        let error = assemble_source("j 67108864").unwrap_err();

        match error {
            MipsError::Syntax { detail, .. } => assert!(detail.contains("Invalid address")),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn syntax_errors_report_one_based_lines() {
        let error = assemble_source("add $t1, $t2, $t3\n\nsub $t1").unwrap_err();

        match error {
            MipsError::Syntax { line, .. } => assert_eq!(line, 3),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }
}
