use std::io;
use thiserror::Error;

/// The toolchain's error value. The CLI driver maps each variant to its
/// stderr prefix and exit code; the core only constructs and propagates.
#[derive(Debug, Error)]
pub enum MipsError {
    /// Source, object, or output file could not be opened or read
    #[error("{0}")]
    File(#[from] io::Error),

    /// The assembler rejected a source line
    #[error("{detail} at line {line} (instruction '{mnemonic}')")]
    Syntax {
        line: usize,
        mnemonic: String,
        detail: String,
    },

    /// The CPU or memory faulted during execution
    #[error("{detail}")]
    Runtime { detail: String },
}

impl MipsError {
    pub fn syntax(line: usize, mnemonic: impl Into<String>, detail: impl Into<String>) -> Self {
        MipsError::Syntax {
            line,
            mnemonic: mnemonic.into(),
            detail: detail.into(),
        }
    }

    pub fn runtime(detail: impl Into<String>) -> Self {
        MipsError::Runtime {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_message_names_line_and_mnemonic() {
        let error = MipsError::syntax(3, "add", "Invalid number of arguments");

        assert_eq!(
            error.to_string(),
            "Invalid number of arguments at line 3 (instruction 'add')"
        );
    }

    #[test]
    fn runtime_message_is_the_detail() {
        let error = MipsError::runtime("Invalid syscall code 99");

        assert_eq!(error.to_string(), "Invalid syscall code 99");
    }
}
