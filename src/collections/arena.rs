use core::ops::{Index, IndexMut};

cfg_if::cfg_if! {
    if #[cfg(feature = "no-std")] {
        use alloc::vec::Vec;
    } else {
        use std::vec::Vec;
    }
}

/// a stable handle to a node stored in an [`Arena`]. handles stay valid until
/// the node they name is removed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIndex(usize);

enum Slot<N> {
    Occupied(N),
    Vacant { next_free: Option<usize> },
}

/// backing store for list nodes. links between nodes are `NodeIndex`es rather
/// than pointers, so a back link can never keep a node alive on its own.
/// vacated slots are threaded onto a free list and reused by later inserts
pub(crate) struct Arena<N> {
    slots: Vec<Slot<N>>,
    free_head: Option<usize>,
    len: usize,
}

impl<N> Arena<N> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// the number of occupied slots
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// store `node`, reusing a vacant slot when one exists
    pub(crate) fn insert(&mut self, node: N) -> NodeIndex {
        self.len += 1;
        match self.free_head {
            Some(i) => {
                let slot = core::mem::replace(&mut self.slots[i], Slot::Occupied(node));
                match slot {
                    Slot::Vacant { next_free } => self.free_head = next_free,
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                }
                NodeIndex(i)
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeIndex(self.slots.len() - 1)
            }
        }
    }

    /// take the node out of its slot, handing the slot to the free list. the
    /// handle must not be used again afterwards
    pub(crate) fn remove(&mut self, index: NodeIndex) -> N {
        let slot = &mut self.slots[index.0];
        if let Slot::Vacant { .. } = slot {
            unreachable!("removed a node that was already vacant");
        }
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match core::mem::replace(slot, vacant) {
            Slot::Occupied(node) => {
                self.free_head = Some(index.0);
                self.len -= 1;
                node
            }
            Slot::Vacant { .. } => unreachable!("removed a node that was already vacant"),
        }
    }

    /// drop every slot, keeping the allocation
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

impl<N> Index<NodeIndex> for Arena<N> {
    type Output = N;

    fn index(&self, index: NodeIndex) -> &N {
        match &self.slots[index.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("dangling node index {:?}", index),
        }
    }
}

impl<N> IndexMut<NodeIndex> for Arena<N> {
    fn index_mut(&mut self, index: NodeIndex) -> &mut N {
        match &mut self.slots[index.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("dangling node index {:?}", index),
        }
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}
