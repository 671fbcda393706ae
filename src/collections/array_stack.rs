use core::fmt;

pub type ArrayStackResult<T> = Result<T, ArrayStackError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayStackError {
    NoCapacity,
}

impl fmt::Display for ArrayStackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCapacity => f.write_str("stack is full"),
        }
    }
}

/// a fixed-capacity LIFO stack over an array of `N` slots. slots `0..len` are
/// live and the top of the stack is slot `len - 1`
pub struct ArrayStack<T, const N: usize> {
    slots: [Option<T>; N],
    len: usize,
}

impl<T, const N: usize> ArrayStack<T, N> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// the most recently pushed element, or None if the stack is empty
    pub fn top(&self) -> Option<&T> {
        let top = self.len.checked_sub(1)?;
        self.slots[top].as_ref()
    }

    /// push onto the top of the stack, or fail if every slot is in use
    pub fn try_push_back(&mut self, data: T) -> ArrayStackResult<()> {
        if self.is_full() {
            return Err(ArrayStackError::NoCapacity);
        }
        self.slots[self.len] = Some(data);
        self.len += 1;
        Ok(())
    }

    /// push onto the top of the stack. a full stack is left unchanged and
    /// `data` is dropped
    pub fn push_back(&mut self, data: T) {
        if self.try_push_back(data).is_err() {
            tracing::trace!(capacity = N, "push_back on a full stack ignored");
        }
    }

    /// remove and return the top element, or None if the stack is empty
    pub fn pop_back(&mut self) -> Option<T> {
        let top = self.len.checked_sub(1)?;
        self.len = top;
        self.slots[top].take()
    }
}

impl<T, const N: usize> Default for ArrayStack<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for ArrayStack<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.slots[..self.len].iter().flatten())
            .finish()
    }
}


#[cfg(all(not(miri), test))]
mod proptests {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use proptest_derive::Arbitrary;

    use super::*;

    #[derive(Arbitrary, Debug)]
    enum Operation {
        PushBack(i64),
        PopBack,
    }

    const CAPACITY: usize = 6;

    proptest! {
        #[test]
        fn matches_a_bounded_vec(ops in vec(any::<Operation>(), 0..256)) {
            let mut reference = Vec::new();
            let mut stack = ArrayStack::<i64, CAPACITY>::new();

            for op in ops {
                match op {
                    Operation::PushBack(v) => {
                        if reference.len() < CAPACITY {
                            reference.push(v);
                        }
                        stack.push_back(v);
                    }
                    Operation::PopBack => {
                        prop_assert_eq!(stack.pop_back(), reference.pop());
                    }
                }
                prop_assert_eq!(stack.len(), reference.len());
                prop_assert_eq!(stack.top(), reference.last());
            }
        }
    }
}
