use crate::ExecutionFault;

/// Number of return addresses the call stack can hold.
pub const STACK_CAPACITY: usize = 12;

/// Bounded subroutine return-address stack with an explicit depth counter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CallStack {
    slots: [u16; STACK_CAPACITY],
    depth: usize,
}

impl CallStack {
    /// Number of return addresses currently held.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` when no return address is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// Returns `true` when every slot is in use.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.depth == STACK_CAPACITY
    }

    /// Pushes a return address.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionFault::StackOverflow`] when the stack is full; the
    /// stack is unchanged.
    pub fn push(&mut self, addr: u16) -> Result<(), ExecutionFault> {
        let slot = self
            .slots
            .get_mut(self.depth)
            .ok_or(ExecutionFault::StackOverflow)?;
        *slot = addr;
        self.depth += 1;
        Ok(())
    }

    /// Pops the most recent return address.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionFault::StackUnderflow`] when the stack is empty.
    pub fn pop(&mut self) -> Result<u16, ExecutionFault> {
        let top = self
            .depth
            .checked_sub(1)
            .ok_or(ExecutionFault::StackUnderflow)?;
        self.depth = top;
        Ok(self.slots[top])
    }

    /// Return addresses from the bottom of the stack to the top.
    #[must_use]
    pub fn frames(&self) -> &[u16] {
        &self.slots[..self.depth]
    }
}

#[cfg(test)]
mod tests {
    use super::{CallStack, STACK_CAPACITY};
    use crate::ExecutionFault;

    #[test]
    fn push_pop_is_last_in_first_out() {
        let mut stack = CallStack::default();
        stack.push(0x202).expect("room");
        stack.push(0x304).expect("room");

        assert_eq!(stack.frames(), &[0x202, 0x304]);
        assert_eq!(stack.pop(), Ok(0x304));
        assert_eq!(stack.pop(), Ok(0x202));
        assert!(stack.is_empty());
    }

    #[test]
    fn push_beyond_capacity_overflows_without_mutation() {
        let mut stack = CallStack::default();
        for n in 0..STACK_CAPACITY {
            stack.push(u16::try_from(n).expect("small")).expect("room");
        }
        assert!(stack.is_full());
        let before = stack.clone();

        assert_eq!(stack.push(0xFFF), Err(ExecutionFault::StackOverflow));
        assert_eq!(stack, before);
    }

    #[test]
    fn pop_on_empty_underflows() {
        let mut stack = CallStack::default();
        assert_eq!(stack.pop(), Err(ExecutionFault::StackUnderflow));
        assert_eq!(stack.depth(), 0);
    }
}
