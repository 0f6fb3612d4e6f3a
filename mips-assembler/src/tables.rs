//! Mnemonic tables
//!
//! Three lookup tables classify a mnemonic and give the byte that goes into
//! the encoded word: the funct field for R-types, the opcode field for I and
//! J types.

/// Get the funct code for an R-type mnemonic
pub fn r_function(mnemonic: &str) -> Option<u8> {
    Some(match mnemonic {
        "sll" => 0x00,
        "srl" => 0x02,
        "sra" => 0x03,
        "sllv" => 0x04,
        "srlv" => 0x06,
        "srav" => 0x07,
        "jr" => 0x08,
        "jalr" => 0x09,
        "syscall" => 0x0C,
        "break" => 0x0D,
        "mfhi" => 0x10,
        "mthi" => 0x11,
        "mflo" => 0x12,
        "mtlo" => 0x13,
        "mult" => 0x18,
        "multu" => 0x19,
        "div" => 0x1A,
        "divu" => 0x1B,
        "add" => 0x20,
        "addu" => 0x21,
        "sub" => 0x22,
        "subu" => 0x23,
        "and" => 0x24,
        "or" => 0x25,
        "xor" => 0x26,
        "nor" => 0x27,
        "slt" => 0x2A,
        "sltu" => 0x2B,
        _ => return None,
    })
}

/// Get the opcode for an I-type mnemonic
pub fn i_opcode(mnemonic: &str) -> Option<u8> {
    Some(match mnemonic {
        "bgez" | "bgezal" | "bltz" | "bltzal" => 0x01,
        "beq" => 0x04,
        "bne" => 0x05,
        "blez" => 0x06,
        "bgtz" => 0x07,
        "addi" => 0x08,
        "addiu" => 0x09,
        "slti" => 0x0A,
        "sltiu" => 0x0B,
        "andi" => 0x0C,
        "ori" => 0x0D,
        "xori" => 0x0E,
        "lui" => 0x0F,
        "lb" => 0x20,
        "lh" => 0x21,
        "lw" => 0x23,
        "lbu" => 0x24,
        "lhu" => 0x25,
        "sb" => 0x28,
        "sh" => 0x29,
        "sw" => 0x2B,
        "lwc1" => 0x31,
        "swc1" => 0x39,
        _ => return None,
    })
}

/// Get the opcode for a J-type mnemonic
pub fn j_opcode(mnemonic: &str) -> Option<u8> {
    Some(match mnemonic {
        "j" => 0x02,
        "jal" => 0x03,
        _ => return None,
    })
}
