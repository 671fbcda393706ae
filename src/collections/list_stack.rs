use core::fmt;

use super::doubly_linked_list::DoublyLinkedList;
use super::release::{NoRelease, ReleaseHook};

/// an unbounded LIFO stack that owns a [`DoublyLinkedList`] and only reaches
/// its back end
pub struct ListStack<T, H: ReleaseHook<T> = NoRelease> {
    list: DoublyLinkedList<T, H>,
}

impl<T> ListStack<T> {
    pub const fn new() -> Self {
        Self {
            list: DoublyLinkedList::new(),
        }
    }
}

impl<T, H: ReleaseHook<T>> ListStack<T, H> {
    /// create a stack whose backing list reports destroyed nodes to `hook`
    pub const fn with_hook(hook: H) -> Self {
        Self {
            list: DoublyLinkedList::with_hook(hook),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// the most recently pushed element
    pub fn top(&self) -> Option<&T> {
        self.list.back()
    }

    pub fn push_back(&mut self, data: T) {
        self.list.push_back(data);
    }

    /// remove and return the top element, or None if the stack is empty
    pub fn pop_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> Default for ListStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, H: ReleaseHook<T>> fmt::Debug for ListStack<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.list, f)
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
        PushBack(u32),
        PopBack,
    }

    proptest! {
        #[test]
        fn matches_a_vec(ops in vec(any::<Operation>(), 0..512)) {
            let mut reference = Vec::new();
            let mut stack = ListStack::new();

            for op in ops {
                match op {
                    Operation::PushBack(v) => {
                        reference.push(v);
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
