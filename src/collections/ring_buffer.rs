use core::fmt;

pub type RingBufferResult<T> = Result<T, RingBufferError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingBufferError {
    NoCapacity,
}

impl fmt::Display for RingBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCapacity => f.write_str("ring buffer is full"),
        }
    }
}

/// a fixed-capacity FIFO queue over a circular array of `N` slots.
///
/// the live elements occupy `len` consecutive slots (mod `N`) starting at
/// `front`. `back` names the newest element's slot; it stays put on the first
/// push into an empty queue so that `front == back` whenever at most one
/// element is live.
pub struct RingBufferQueue<T, const N: usize> {
    slots: [Option<T>; N],
    front: usize,
    back: usize,
    len: usize,
}

impl<T, const N: usize> RingBufferQueue<T, N> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            front: 0,
            back: 0,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn free_space(&self) -> usize {
        N - self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// the oldest element, next in line for `pop_front`
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.front].as_ref()
    }

    /// the most recently pushed element
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.back].as_ref()
    }

    /// append to the back of the queue, or fail if every slot is in use
    pub fn try_push_back(&mut self, data: T) -> RingBufferResult<()> {
        if self.is_full() {
            return Err(RingBufferError::NoCapacity);
        }

        if !self.is_empty() {
            self.back = (self.back + 1) % N;
        }
        self.slots[self.back] = Some(data);
        self.len += 1;

        Ok(())
    }

    /// append to the back of the queue. a full queue is left unchanged and
    /// `data` is dropped
    pub fn push_back(&mut self, data: T) {
        if self.try_push_back(data).is_err() {
            tracing::trace!(capacity = N, "push_back on a full queue ignored");
        }
    }

    /// remove and return the oldest element, or None if the queue is empty
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let t = self.slots[self.front].take();
        self.len -= 1;
        if !self.is_empty() {
            self.front = (self.front + 1) % N;
        }
        t
    }
}

impl<T, const N: usize> Default for RingBufferQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for RingBufferQueue<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let live = (0..self.len).filter_map(|i| self.slots[(self.front + i) % N].as_ref());
        f.debug_list().entries(live).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct MyTestStruct {
        i: i32,
        name: &'static str,
    }

    #[test]
    fn capacity_returns_const_size() {
        const N: usize = 8;
        let rb = RingBufferQueue::<u32, N>::new();
        assert_eq!(rb.capacity(), N);
        assert_eq!(rb.free_space(), N);
    }

    #[test]
    fn front_on_empty_queue_returns_none() {
        let rb = RingBufferQueue::<u32, 8>::new();
        assert_eq!(rb.front(), None);
        assert_eq!(rb.back(), None);
    }

    #[test]
    fn pop_on_empty_queue_returns_none() {
        let mut rb = RingBufferQueue::<u32, 8>::new();
        assert_eq!(rb.pop_front(), None);
    }

    #[test]
    fn can_pop_from_queue() {
        let mut rb = RingBufferQueue::<u32, 8>::new();
        rb.try_push_back(73).expect("failed to push");
        assert_eq!(rb.front(), Some(&73));
        assert_eq!(rb.back(), Some(&73));
        assert_eq!(rb.pop_front(), Some(73));
    }

    #[test]
    fn is_empty_is_only_true_when_no_elements() {
        let mut rb = RingBufferQueue::<u32, 8>::new();
        assert!(rb.is_empty());
        rb.push_back(73);
        assert!(!rb.is_empty());
        assert_eq!(rb.pop_front(), Some(73));
        assert!(rb.is_empty());
    }

    #[test]
    fn push_and_pop_track_len() {
        let mut rb = RingBufferQueue::<u32, 8>::new();
        rb.push_back(73);
        rb.push_back(42);
        assert_eq!(rb.len(), 2);
        assert_eq!(rb.free_space(), 6);
        rb.pop_front().expect("failed to pop");
        assert_eq!(rb.len(), 1);
    }

    #[test]
    fn try_push_when_full_results_in_err() {
        const N: usize = 2;
        let mut rb = RingBufferQueue::<u32, N>::new();
        for _ in 0..N {
            rb.try_push_back(73).expect("failed to push");
        }
        assert_eq!(rb.try_push_back(73), Err(RingBufferError::NoCapacity));
    }

    #[test]
    fn push_when_full_is_ignored() {
        let mut rb = RingBufferQueue::<char, 3>::new();
        rb.push_back('a');
        rb.push_back('b');
        rb.push_back('c');
        assert!(rb.is_full());
        rb.push_back('d');
        assert_eq!(rb.len(), 3);
        assert_eq!(rb.back(), Some(&'c'));

        assert_eq!(rb.pop_front(), Some('a'));
        assert!(!rb.is_full());
        rb.push_back('d');
        assert_eq!(format!("{:?}", rb), "['b', 'c', 'd']");
        assert_eq!(rb.pop_front(), Some('b'));
        assert_eq!(rb.pop_front(), Some('c'));
        assert_eq!(rb.pop_front(), Some('d'));
        assert_eq!(rb.pop_front(), None);
    }

    #[test]
    fn zero_capacity_queue_is_empty_and_full() {
        let mut rb = RingBufferQueue::<u32, 0>::new();
        assert!(rb.is_empty());
        assert!(rb.is_full());
        rb.push_back(1);
        assert_eq!(rb.try_push_back(1), Err(RingBufferError::NoCapacity));
        assert_eq!(rb.pop_front(), None);
    }

    #[test]
    fn indices_wrap_many_times() {
        let mut rb = RingBufferQueue::<usize, 3>::new();
        for i in 0..100 {
            rb.push_back(i);
            rb.push_back(i + 1000);
            assert_eq!(rb.pop_front(), Some(i));
            assert_eq!(rb.pop_front(), Some(i + 1000));
            assert!(rb.is_empty());
        }
    }

    #[test]
    fn smoke_test() {
        let mut rb = RingBufferQueue::<MyTestStruct, 3>::new();
        let ms1 = MyTestStruct {
            i: 1,
            name: "peter",
        };
        let ms2 = MyTestStruct {
            i: 2,
            name: "paul",
        };
        let ms3 = MyTestStruct {
            i: 3,
            name: "mary",
        };
        let ms4 = MyTestStruct { i: 4, name: "john" };
        rb.try_push_back(ms1.clone()).expect("failed to push");
        rb.try_push_back(ms2.clone()).expect("failed to push");
        rb.try_push_back(ms3.clone()).expect("failed to push");
        rb.try_push_back(ms4.clone())
            .expect_err("should be full capacity");

        assert_eq!(rb.front().expect("failed to peek"), &ms1);
        assert_eq!(rb.pop_front().expect("failed to pop"), ms1);

        rb.try_push_back(ms4.clone()).expect("should have capacity");

        assert_eq!(rb.pop_front().expect("failed to pop"), ms2);
        assert_eq!(rb.pop_front().expect("failed to pop"), ms3);
        assert_eq!(rb.pop_front().expect("failed to pop"), ms4);
        assert_eq!(rb.pop_front(), None);
    }
}

#[cfg(all(not(miri), test))]
mod proptests {
    use std::collections::VecDeque;

    use proptest::collection::vec;
    use proptest::prelude::*;
    use proptest_derive::Arbitrary;

    use super::*;

    #[derive(Arbitrary, Debug)]
    enum Operation {
        PushBack(u16),
        PopFront,
    }

    const CAPACITY: usize = 5;

    proptest! {
        #[test]
        fn matches_a_bounded_vec_deque(ops in vec(any::<Operation>(), 0..256)) {
            let mut reference = VecDeque::new();
            let mut queue = RingBufferQueue::<u16, CAPACITY>::new();

            for op in ops {
                match op {
                    Operation::PushBack(v) => {
                        if reference.len() < CAPACITY {
                            reference.push_back(v);
                        }
                        queue.push_back(v);
                    }
                    Operation::PopFront => {
                        prop_assert_eq!(queue.pop_front(), reference.pop_front());
                    }
                }
                prop_assert_eq!(queue.len(), reference.len());
                prop_assert_eq!(queue.is_full(), reference.len() == CAPACITY);
                prop_assert_eq!(queue.front(), reference.front());
                prop_assert_eq!(queue.back(), reference.back());
            }
        }
    }
}
