use thiserror::Error;

/// Program image rejected by the loader. Memory is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum LoadError {
    /// Program does not fit between `0x200` and the end of memory.
    #[error("program is {size} bytes, at most {max} bytes fit in program memory")]
    ProgramTooLarge {
        /// Length of the rejected program in bytes.
        size: usize,
        /// Largest accepted program length in bytes.
        max: usize,
    },
}

/// Subroutine-discipline violations raised while executing a program. Every
/// fault halts the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ExecutionFault {
    /// `2nnn` executed with every stack slot in use.
    #[error("call stack overflow")]
    StackOverflow,
    /// `00EE` executed with an empty stack.
    #[error("call stack underflow")]
    StackUnderflow,
}

/// Host supplied a key index outside the 16-key pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum KeyError {
    /// Key indices run from `0x0` to `0xF`.
    #[error("key index {0:#x} is outside the 16-key pad")]
    KeyIndexOutOfRange(u8),
}

#[cfg(test)]
mod tests {
    use super::{ExecutionFault, KeyError, LoadError};

    #[test]
    fn messages_name_the_violation() {
        let err = LoadError::ProgramTooLarge {
            size: 3585,
            max: 3584,
        };
        assert_eq!(
            err.to_string(),
            "program is 3585 bytes, at most 3584 bytes fit in program memory"
        );
        assert_eq!(
            KeyError::KeyIndexOutOfRange(0x10).to_string(),
            "key index 0x10 is outside the 16-key pad"
        );
        assert_eq!(ExecutionFault::StackOverflow.to_string(), "call stack overflow");
        assert_eq!(ExecutionFault::StackUnderflow.to_string(), "call stack underflow");
    }
}
