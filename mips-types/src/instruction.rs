use crate::constants::{
    FUNCTION_ADD, FUNCTION_AND, FUNCTION_OR, FUNCTION_SUB, FUNCTION_SYSCALL, OP_BEQ, OP_BGTZ,
    OP_BNE, OP_J, OP_JAL, OP_LUI, OP_LW, OP_ORI, OP_R_TYPE, OP_SLTI, OP_SW, OP_SYSCALL, OP_XORI,
};

/// A MIPS instruction word
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Instruction(pub u32);

impl Instruction {
    /// Pack an R-type instruction. Inputs are masked to their field widths.
    pub fn r_type(op_code: u8, rs: u8, rt: u8, rd: u8, shift: u8, function: u8) -> Self {
        debug_assert!(rs < 32 && rt < 32 && rd < 32 && shift < 32);

        Instruction(
            ((op_code as u32 & 0x3F) << 26)
                | ((rs as u32 & 0x1F) << 21)
                | ((rt as u32 & 0x1F) << 16)
                | ((rd as u32 & 0x1F) << 11)
                | ((shift as u32 & 0x1F) << 6)
                | (function as u32 & 0x3F),
        )
    }

    /// Pack an I-type instruction
    pub fn i_type(op_code: u8, rs: u8, rt: u8, immediate: i16) -> Self {
        debug_assert!(rs < 32 && rt < 32);

        Instruction(
            ((op_code as u32 & 0x3F) << 26)
                | ((rs as u32 & 0x1F) << 21)
                | ((rt as u32 & 0x1F) << 16)
                | (immediate as u16 as u32),
        )
    }

    /// Pack a J-type instruction
    pub fn j_type(op_code: u8, pseudo_address: u32) -> Self {
        debug_assert!(pseudo_address < (1 << 26));

        Instruction(((op_code as u32 & 0x3F) << 26) | (pseudo_address & 0x03FF_FFFF))
    }

    /// Get the operation code
    pub fn op_code(&self) -> u8 {
        ((self.0 & 0xFC00_0000) >> 26) as u8
    }

    /// Get the s register (for R and I type instructions)
    pub fn s_register(&self) -> u8 {
        ((self.0 & 0x03E0_0000) >> 21) as u8
    }

    /// Get the t register (for R and I type instructions)
    pub fn t_register(&self) -> u8 {
        ((self.0 & 0x001F_0000) >> 16) as u8
    }

    /// Get the d register (for R type instructions)
    pub fn d_register(&self) -> u8 {
        ((self.0 & 0x0000_F800) >> 11) as u8
    }

    /// Get the shift amount (for R type instructions)
    pub fn shift_amount(&self) -> u8 {
        ((self.0 & 0x0000_07C0) >> 6) as u8
    }

    /// Get the ALU function (for R type instructions)
    pub fn function(&self) -> u8 {
        (self.0 & 0x0000_003F) as u8
    }

    /// Get the immediate value (for I type instructions)
    pub fn immediate(&self) -> i16 {
        (self.0 & 0x0000_FFFF) as i16
    }

    /// Get the pseudo address (for J type instructions)
    pub fn pseudo_address(&self) -> u32 {
        self.0 & 0x03FF_FFFF
    }

    /// Decode and format the instruction for tracing. Registers are shown by
    /// index, matching the assembler's `$t<digit>` numbering.
    pub fn stringify(&self) -> String {
        match self.op_code() {
            OP_R_TYPE => {
                let (rd, rs, rt) = (self.d_register(), self.s_register(), self.t_register());
                match self.function() {
                    FUNCTION_ADD => format!("add ${}, ${}, ${}", rd, rs, rt),
                    FUNCTION_SUB => format!("sub ${}, ${}, ${}", rd, rs, rt),
                    FUNCTION_AND => format!("and ${}, ${}, ${}", rd, rs, rt),
                    FUNCTION_OR => format!("or ${}, ${}, ${}", rd, rs, rt),
                    FUNCTION_SYSCALL => "syscall".to_string(),
                    function => format!("unknown r-type (funct 0x{:02x})", function),
                }
            }
            OP_SYSCALL => "syscall".to_string(),
            OP_J => format!("j 0x{:x}", self.pseudo_address()),
            OP_JAL => format!("jal 0x{:x}", self.pseudo_address()),
            OP_BEQ => format!(
                "beq ${}, ${}, {}",
                self.s_register(),
                self.t_register(),
                self.immediate()
            ),
            OP_BNE => format!(
                "bne ${}, ${}, {}",
                self.s_register(),
                self.t_register(),
                self.immediate()
            ),
            OP_BGTZ => format!("bgtz ${}, {}", self.s_register(), self.immediate()),
            OP_LUI => format!(
                "lui ${}, 0x{:x}",
                self.t_register(),
                self.immediate() as u16
            ),
            OP_ORI => format!(
                "ori ${}, ${}, 0x{:x}",
                self.t_register(),
                self.s_register(),
                self.immediate() as u16
            ),
            OP_XORI => format!(
                "xori ${}, ${}, 0x{:x}",
                self.t_register(),
                self.s_register(),
                self.immediate() as u16
            ),
            OP_SLTI => format!(
                "slti ${}, ${}, {}",
                self.t_register(),
                self.s_register(),
                self.immediate()
            ),
            OP_LW => format!(
                "lw ${}, {}(${})",
                self.t_register(),
                self.immediate(),
                self.s_register()
            ),
            OP_SW => format!(
                "sw ${}, {}(${})",
                self.t_register(),
                self.immediate(),
                self.s_register()
            ),
            op_code => format!("unknown (opcode 0x{:02x})", op_code),
        }
    }
}
