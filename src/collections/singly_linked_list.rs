use core::fmt;
use core::iter::FusedIterator;

use super::arena::{Arena, NodeIndex};
use super::release::{NoRelease, ReleaseHook, Released};

/// an owning, singly-linked list with a head sentinel and a reference to the
/// last node, so both ends accept pushes in constant time. insertion and
/// removal in the middle are keyed by value
pub struct SinglyLinkedList<T, H: ReleaseHook<T> = NoRelease> {
    nodes: Arena<Node<T>>,
    /// `next` of the head sentinel
    first: Option<NodeIndex>,
    last: Option<NodeIndex>,
    len: usize,
    hook: H,
}

struct Node<T> {
    data: T,
    next: Option<NodeIndex>,
}

impl<T> SinglyLinkedList<T> {
    pub const fn new() -> Self {
        Self::with_hook(NoRelease)
    }
}

impl<T, H: ReleaseHook<T>> SinglyLinkedList<T, H> {
    pub const fn with_hook(hook: H) -> Self {
        Self {
            nodes: Arena::new(),
            first: None,
            last: None,
            len: 0,
            hook,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    pub fn front(&self) -> Option<&T> {
        self.first.map(|i| &self.nodes[i].data)
    }

    pub fn back(&self) -> Option<&T> {
        self.last.map(|i| &self.nodes[i].data)
    }

    pub fn push_front(&mut self, data: T) {
        let n = self.nodes.insert(Node {
            data,
            next: self.first,
        });
        if self.last.is_none() {
            self.last = Some(n);
        }
        self.first = Some(n);
        self.len += 1;
    }

    pub fn push_back(&mut self, data: T) {
        let n = self.nodes.insert(Node { data, next: None });
        match self.last {
            Some(last) => self.nodes[last].next = Some(n),
            None => self.first = Some(n),
        }
        self.last = Some(n);
        self.len += 1;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            curr: self.first,
            remaining: self.len,
        }
    }

    /// remove every element, front to back
    pub fn clear(&mut self) {
        while let Some(first) = self.first {
            self.unlink_after(None, first);
        }
        self.nodes.clear();
    }

    /// detach `at`, whose predecessor is `prev` (None for the head sentinel),
    /// and destroy it
    fn unlink_after(&mut self, prev: Option<NodeIndex>, at: NodeIndex) -> T {
        let node = self.nodes.remove(at);
        match prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.first = node.next,
        }
        if node.next.is_none() {
            self.last = prev;
        }
        self.len -= 1;
        self.hook.on_release(Released::Data(&node.data));
        node.data
    }
}

impl<T: PartialEq, H: ReleaseHook<T>> SinglyLinkedList<T, H> {
    /// the first node carrying `target` along with its predecessor
    fn find(&self, target: &T) -> Option<(Option<NodeIndex>, NodeIndex)> {
        let mut prev = None;
        let mut curr = self.first;
        while let Some(i) = curr {
            if self.nodes[i].data == *target {
                return Some((prev, i));
            }
            prev = Some(i);
            curr = self.nodes[i].next;
        }
        None
    }

    /// insert `data` right after the first element equal to `target`.
    /// returns false, leaving the list unchanged, if no element matches
    pub fn insert_after(&mut self, target: &T, data: T) -> bool {
        let Some((_, at)) = self.find(target) else {
            return false;
        };
        let next = self.nodes[at].next;
        let n = self.nodes.insert(Node { data, next });
        self.nodes[at].next = Some(n);
        if next.is_none() {
            self.last = Some(n);
        }
        self.len += 1;
        true
    }

    /// remove the first element equal to `target` and return it, or None if
    /// no element matches
    pub fn remove(&mut self, target: &T) -> Option<T> {
        let (prev, at) = self.find(target)?;
        Some(self.unlink_after(prev, at))
    }
}

impl<T, H: ReleaseHook<T>> Drop for SinglyLinkedList<T, H> {
    fn drop(&mut self) {
        self.clear();
        self.hook.on_release(Released::Head);
        self.hook.on_release(Released::Tail);
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, H: ReleaseHook<T>> fmt::Debug for SinglyLinkedList<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for data in iter {
            list.push_back(data);
        }
        list
    }
}

impl<'a, T, H: ReleaseHook<T>> IntoIterator for &'a SinglyLinkedList<T, H> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

pub struct Iter<'a, T> {
    nodes: &'a Arena<Node<T>>,
    curr: Option<NodeIndex>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let nodes = self.nodes;
        let node = &nodes[self.curr?];
        self.curr = node.next;
        self.remaining -= 1;
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}


#[cfg(all(not(miri), test))]
mod proptests {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use proptest_derive::Arbitrary;

    use super::*;

    // values are folded into a small range so that targets of insert_after
    // and remove actually match now and then
    #[derive(Arbitrary, Debug)]
    enum Operation {
        PushFront(u8),
        PushBack(u8),
        InsertAfter(u8, u8),
        Remove(u8),
    }

    proptest! {
        #[test]
        fn matches_a_vec(ops in vec(any::<Operation>(), 0..256)) {
            let mut reference: Vec<u8> = Vec::new();
            let mut list = SinglyLinkedList::new();

            for op in ops {
                match op {
                    Operation::PushFront(v) => {
                        reference.insert(0, v % 8);
                        list.push_front(v % 8);
                    }
                    Operation::PushBack(v) => {
                        reference.push(v % 8);
                        list.push_back(v % 8);
                    }
                    Operation::InsertAfter(target, v) => {
                        let target = target % 8;
                        let found = reference.iter().position(|x| *x == target);
                        if let Some(i) = found {
                            reference.insert(i + 1, v % 8);
                        }
                        prop_assert_eq!(list.insert_after(&target, v % 8), found.is_some());
                    }
                    Operation::Remove(target) => {
                        let target = target % 8;
                        let found = reference.iter().position(|x| *x == target);
                        let expected = found.map(|i| reference.remove(i));
                        prop_assert_eq!(list.remove(&target), expected);
                    }
                }
                prop_assert_eq!(list.len(), reference.len());
                prop_assert_eq!(list.front(), reference.first());
                prop_assert_eq!(list.back(), reference.last());
                prop_assert!(list.iter().eq(reference.iter()));
            }
        }
    }
}
