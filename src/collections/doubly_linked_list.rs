use core::fmt;
use core::iter::FusedIterator;

use super::arena::{Arena, NodeIndex};
use super::release::{NoRelease, ReleaseHook, Released};

/// an owning, doubly-linked list with positional insert and erase.
///
/// nodes live in an arena owned by the list and link to each other by index,
/// so the `prev` links are plain back references and never keep a node alive.
/// the list keeps two boundary roles: a fixed head sentinel whose `next` is
/// the first node, and a movable reference to the last node.
///
/// positional operations walk from whichever end is closer: forward from the
/// first node when `position < len / 2`, otherwise backward from the last
/// node.
///
/// no operation fails. popping or erasing where there is nothing to remove
/// returns `None`, and inserting past the end appends.
pub struct DoublyLinkedList<T, H: ReleaseHook<T> = NoRelease> {
    nodes: Arena<Node<T>>,
    /// the head sentinel, always present and never carrying data
    head: Sentinel,
    /// the last real node, or None if the list is empty
    last: Option<NodeIndex>,
    /// the number of non-sentinel nodes in the list
    len: usize,
    hook: H,
}

/// the fixed head of the chain. it only ever points forward
#[derive(Clone, Copy, Debug, Default)]
struct Sentinel {
    next: Option<NodeIndex>,
}

struct Node<T> {
    data: T,
    next: Option<NodeIndex>,
    prev: Option<NodeIndex>,
}

impl<T> Node<T> {
    const fn new(data: T, prev: Option<NodeIndex>, next: Option<NodeIndex>) -> Self {
        Self { data, next, prev }
    }
}

impl<T> DoublyLinkedList<T> {
    /// create a new, empty list that releases nodes silently
    pub const fn new() -> Self {
        Self::with_hook(NoRelease)
    }
}

impl<T, H: ReleaseHook<T>> DoublyLinkedList<T, H> {
    /// create a new, empty list that reports every destroyed node to `hook`
    pub const fn with_hook(hook: H) -> Self {
        Self {
            nodes: Arena::new(),
            head: Sentinel { next: None },
            last: None,
            len: 0,
            hook,
        }
    }

    /// get the length of the list, not including the sentinel
    pub fn len(&self) -> usize {
        self.len
    }

    /// returns true if the list has no real nodes
    pub fn is_empty(&self) -> bool {
        self.head.next.is_none()
    }

    /// the first element of the list, or None if the list is empty
    pub fn front(&self) -> Option<&T> {
        self.head.next.map(|i| &self.nodes[i].data)
    }

    /// the last element of the list, or None if the list is empty
    pub fn back(&self) -> Option<&T> {
        self.last.map(|i| &self.nodes[i].data)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        let i = self.head.next?;
        Some(&mut self.nodes[i].data)
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        let i = self.last?;
        Some(&mut self.nodes[i].data)
    }

    /// borrow the element at `position`, or None if `position >= len`
    pub fn get(&self, position: usize) -> Option<&T> {
        self.locate(position).map(|i| &self.nodes[i].data)
    }

    /// mutably borrow the element at `position`, or None if `position >= len`
    pub fn get_mut(&mut self, position: usize) -> Option<&mut T> {
        let i = self.locate(position)?;
        Some(&mut self.nodes[i].data)
    }

    /// push an element to the front of the list
    pub fn push_front(&mut self, data: T) {
        let old_first = self.head.next;
        let n = self.nodes.insert(Node::new(data, None, old_first));
        match old_first {
            Some(first) => self.nodes[first].prev = Some(n),
            None => self.last = Some(n),
        }
        self.head.next = Some(n);
        self.len += 1;
    }

    /// push an element to the back of the list
    pub fn push_back(&mut self, data: T) {
        let old_last = self.last;
        let n = self.nodes.insert(Node::new(data, old_last, None));
        match old_last {
            Some(last) => self.nodes[last].next = Some(n),
            None => self.head.next = Some(n),
        }
        self.last = Some(n);
        self.len += 1;
    }

    /// insert an element so that it ends up at `position`.
    ///
    /// position 0 is a `push_front`. any position at or beyond the current
    /// length is a `push_back`; out of range positions are clamped, not
    /// rejected.
    pub fn insert(&mut self, position: usize, data: T) {
        if position == 0 {
            self.push_front(data);
        } else if position >= self.len {
            self.push_back(data);
        } else {
            match self.locate(position) {
                Some(at) => self.link_before(at, data),
                None => unreachable!("no node at position {} of {}", position, self.len),
            }
        }
    }

    /// remove the first element and return it, or None if the list is empty
    pub fn pop_front(&mut self) -> Option<T> {
        let first = self.head.next?;
        Some(self.unlink(first))
    }

    /// remove the last element and return it, or None if the list is empty
    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.last?;
        Some(self.unlink(last))
    }

    /// remove the element at `position` and return it. returns None, leaving
    /// the list untouched, if the list is empty or `position >= len`
    pub fn erase(&mut self, position: usize) -> Option<T> {
        if self.is_empty() || position >= self.len {
            return None;
        }
        if position == 0 {
            return self.pop_front();
        }
        match self.locate(position) {
            Some(at) => Some(self.unlink(at)),
            None => unreachable!("no node at position {} of {}", position, self.len),
        }
    }

    /// remove every element, front to back
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
        self.nodes.clear();
    }

    /// return an iterator over the elements, front to back
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head.next,
            back: self.last,
            remaining: self.len,
        }
    }

    /// return a cursor for this list, starting at the ghost position between
    /// the last and the first element
    pub fn cursor(&mut self) -> Cursor<'_, T, H> {
        Cursor {
            list: self,
            curr: None,
        }
    }

    /// find the node at `position`, walking from the nearer end
    fn locate(&self, position: usize) -> Option<NodeIndex> {
        if position >= self.len {
            return None;
        }

        if position < self.len / 2 {
            let mut curr = self.head.next?;
            for _ in 0..position {
                curr = self.nodes[curr].next?;
            }
            Some(curr)
        } else {
            let mut curr = self.last?;
            for _ in 0..self.len - position - 1 {
                curr = self.nodes[curr].prev?;
            }
            Some(curr)
        }
    }

    // Before: (at.prev) <-> (at)
    // After: (at.prev) <-> (n) <-> (at)
    fn link_before(&mut self, at: NodeIndex, data: T) {
        let prev = self.nodes[at].prev;
        let n = self.nodes.insert(Node::new(data, prev, Some(at)));
        match prev {
            Some(p) => self.nodes[p].next = Some(n),
            None => self.head.next = Some(n),
        }
        self.nodes[at].prev = Some(n);
        self.len += 1;
    }

    /// detach the node, leaving its neighbours (or the boundary roles) linked
    /// to each other, and destroy it
    fn unlink(&mut self, at: NodeIndex) -> T {
        let node = self.nodes.remove(at);
        match node.prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.head.next = node.next,
        }
        match node.next {
            Some(n) => self.nodes[n].prev = node.prev,
            None => self.last = node.prev,
        }
        self.len -= 1;
        debug_assert_eq!(self.len, self.nodes.len());
        self.release(node)
    }

    fn release(&mut self, node: Node<T>) -> T {
        self.hook.on_release(Released::Data(&node.data));
        node.data
    }
}

impl<T, H: ReleaseHook<T>> Drop for DoublyLinkedList<T, H> {
    fn drop(&mut self) {
        self.clear();
        self.hook.on_release(Released::Head);
        self.hook.on_release(Released::Tail);
    }
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, H: ReleaseHook<T>> fmt::Debug for DoublyLinkedList<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, H: ReleaseHook<T>> PartialEq for DoublyLinkedList<T, H> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, H: ReleaseHook<T>> Eq for DoublyLinkedList<T, H> {}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, H: ReleaseHook<T>> Extend<T> for DoublyLinkedList<T, H> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for data in iter {
            self.push_back(data);
        }
    }
}

impl<'a, T, H: ReleaseHook<T>> IntoIterator for &'a DoublyLinkedList<T, H> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, H: ReleaseHook<T>> IntoIterator for DoublyLinkedList<T, H> {
    type Item = T;
    type IntoIter = IntoIter<T, H>;

    fn into_iter(self) -> IntoIter<T, H> {
        IntoIter { list: self }
    }
}

pub struct Iter<'a, T> {
    nodes: &'a Arena<Node<T>>,
    front: Option<NodeIndex>,
    back: Option<NodeIndex>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.front?];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.back?];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.data)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// an owning iterator, destroying nodes as they are yielded
pub struct IntoIter<T, H: ReleaseHook<T> = NoRelease> {
    list: DoublyLinkedList<T, H>,
}

impl<T, H: ReleaseHook<T>> Iterator for IntoIter<T, H> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, H: ReleaseHook<T>> DoubleEndedIterator for IntoIter<T, H> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, H: ReleaseHook<T>> ExactSizeIterator for IntoIter<T, H> {}

impl<T, H: ReleaseHook<T>> FusedIterator for IntoIter<T, H> {}

/// a mutable cursor over a [`DoublyLinkedList`].
///
/// besides every element, the cursor can rest on a ghost position that sits
/// between the last and the first element. moving past either end lands on
/// the ghost, and moving again wraps around.
pub struct Cursor<'a, T, H: ReleaseHook<T> = NoRelease> {
    list: &'a mut DoublyLinkedList<T, H>,
    /// None is the ghost position
    curr: Option<NodeIndex>,
}

impl<'a, T, H: ReleaseHook<T>> Cursor<'a, T, H> {
    /// get the current element or None if the cursor is on the ghost position
    pub fn current(&self) -> Option<&T> {
        self.curr.map(|i| &self.list.nodes[i].data)
    }

    /// get the current element or None if the cursor is on the ghost position
    pub fn current_mut(&mut self) -> Option<&mut T> {
        let i = self.curr?;
        Some(&mut self.list.nodes[i].data)
    }

    /// move the cursor forward one element
    pub fn move_next(&mut self) {
        self.curr = match self.curr {
            None => self.list.head.next,
            Some(i) => self.list.nodes[i].next,
        };
    }

    /// move the cursor backward one element
    pub fn move_prev(&mut self) {
        self.curr = match self.curr {
            None => self.list.last,
            Some(i) => self.list.nodes[i].prev,
        };
    }

    /// if the cursor is on the ghost position, do nothing and return None.
    ///
    /// otherwise remove the current element, reducing the length of the list
    /// by 1, advance the cursor forward and return the removed element.
    pub fn remove_current(&mut self) -> Option<T> {
        let at = self.curr?;
        self.curr = self.list.nodes[at].next;
        Some(self.list.unlink(at))
    }

    /// insert an element before the current one. on the ghost position this
    /// appends to the list. the cursor does not move
    pub fn insert_before(&mut self, data: T) {
        match self.curr {
            Some(at) => self.list.link_before(at, data),
            None => self.list.push_back(data),
        }
    }

    /// insert an element after the current one. on the ghost position this
    /// prepends to the list. the cursor does not move
    pub fn insert_after(&mut self, data: T) {
        match self.curr {
            None => self.list.push_front(data),
            Some(at) => match self.list.nodes[at].next {
                Some(next) => self.list.link_before(next, data),
                None => self.list.push_back(data),
            },
        }
    }
}


#[cfg(test)]
mod iter_test {
    use super::*;

    #[test]
    fn basic_iter_test() {
        let ll: DoublyLinkedList<_> = [10, 20, 30].into_iter().collect();
        let mut iter = ll.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(&10));
        assert_eq!(iter.next(), Some(&20));
        assert_eq!(iter.next(), Some(&30));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iter_on_empty_list_terminates() {
        let ll = DoublyLinkedList::<u8>::new();
        assert!(ll.iter().next().is_none());
        assert!(ll.iter().next_back().is_none());
    }

    #[test]
    fn iter_runs_backward() {
        let ll: DoublyLinkedList<_> = (0..5).collect();
        let reversed: Vec<_> = ll.iter().rev().copied().collect();
        assert_eq!(reversed, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn iter_ends_meet_in_the_middle() {
        let ll: DoublyLinkedList<_> = (0..4).collect();
        let mut iter = ll.iter();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn into_iter_yields_owned_elements() {
        let ll: DoublyLinkedList<_> = ["peter", "paul", "mary"]
            .into_iter()
            .map(String::from)
            .collect();
        let mut iter = ll.into_iter();
        assert_eq!(iter.next_back().as_deref(), Some("mary"));
        assert_eq!(iter.next().as_deref(), Some("peter"));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next().as_deref(), Some("paul"));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iterating_by_reference_in_a_for_loop() {
        let ll: DoublyLinkedList<_> = (1..=4).collect();
        let mut sum = 0;
        for v in &ll {
            sum += v;
        }
        assert_eq!(sum, 10);
    }
}


// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use std::collections::VecDeque;

    use proptest::prelude::*;
    use proptest::test_runner::Config;
    use proptest_state_machine::{ReferenceStateMachine, StateMachineTest};

    use super::*;

    proptest_state_machine::prop_state_machine! {
        #![proptest_config(Config {
            failure_persistence: None,
            .. Config::default()
        })]

        #[test]
        fn doubly_linked_list_state_machine_test(
            sequential
            100..500
            =>
            DoublyLinkedList<u32>
        );
    }

    #[derive(Clone, Debug)]
    pub enum Transition {
        PushFront(u32),
        PopFront,
        PushBack(u32),
        PopBack,
        Insert(usize, u32),
        Erase(usize),
    }

    pub struct DoublyLinkedListStateMachine;

    impl ReferenceStateMachine for DoublyLinkedListStateMachine {
        type State = VecDeque<u32>;
        type Transition = Transition;

        fn init_state() -> BoxedStrategy<Self::State> {
            Just(VecDeque::new()).boxed()
        }

        fn transitions(state: &Self::State) -> BoxedStrategy<Self::Transition> {
            // positions run a little past the end to hit the clamp and the
            // out of range erase
            let positions = 0..state.len() + 3;
            prop_oneof![
                1 => Just(Transition::PopFront),
                2 => any::<u32>().prop_map(Transition::PushFront),
                1 => Just(Transition::PopBack),
                2 => any::<u32>().prop_map(Transition::PushBack),
                2 => (positions.clone(), any::<u32>())
                    .prop_map(|(p, v)| Transition::Insert(p, v)),
                1 => positions.prop_map(Transition::Erase),
            ]
            .boxed()
        }

        fn apply(mut state: Self::State, transition: &Self::Transition) -> Self::State {
            match transition {
                Transition::PopFront => {
                    state.pop_front();
                }
                Transition::PushFront(value) => state.push_front(*value),
                Transition::PopBack => {
                    state.pop_back();
                }
                Transition::PushBack(value) => state.push_back(*value),
                Transition::Insert(position, value) => {
                    let position = (*position).min(state.len());
                    state.insert(position, *value);
                }
                Transition::Erase(position) => {
                    state.remove(*position);
                }
            }
            state
        }
    }

    impl StateMachineTest for DoublyLinkedList<u32> {
        type SystemUnderTest = Self;
        type Reference = DoublyLinkedListStateMachine;

        fn init_test(
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) -> Self::SystemUnderTest {
            Self::new()
        }

        fn apply(
            mut state: Self::SystemUnderTest,
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
            transition: Transition,
        ) -> Self::SystemUnderTest {
            match transition {
                Transition::PushFront(value) => state.push_front(value),
                Transition::PopFront => {
                    state.pop_front();
                }
                Transition::PushBack(value) => state.push_back(value),
                Transition::PopBack => {
                    state.pop_back();
                }
                Transition::Insert(position, value) => state.insert(position, value),
                Transition::Erase(position) => {
                    let len = state.len();
                    let erased = state.erase(position);
                    assert_eq!(erased.is_some(), position < len);
                }
            }
            state
        }

        fn check_invariants(
            state: &Self::SystemUnderTest,
            ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) {
            assert_eq!(state.len(), ref_state.len());
            assert_eq!(state.is_empty(), ref_state.is_empty());
            assert_eq!(state.front(), ref_state.front());
            assert_eq!(state.back(), ref_state.back());
            assert!(state.iter().eq(ref_state.iter()));
            assert!(state.iter().rev().eq(ref_state.iter().rev()));
        }
    }

    #[test]
    #[ignore]
    fn longform_random_positions() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let mut reference = Vec::new();
        let mut list = DoublyLinkedList::new();

        for _ in 0..100_000 {
            let position = rng.gen_range(0..=reference.len() + 1);
            if rng.gen_bool(0.6) {
                let value: u32 = rng.gen();
                reference.insert(position.min(reference.len()), value);
                list.insert(position, value);
            } else {
                let expected = (position < reference.len()).then(|| reference.remove(position));
                assert_eq!(list.erase(position), expected);
            }
            assert_eq!(list.len(), reference.len());
        }

        assert!(list.iter().eq(reference.iter()));
    }
}
