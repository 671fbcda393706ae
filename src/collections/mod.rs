mod arena;

pub mod array_stack;
pub mod doubly_linked_list;
pub mod list_stack;
pub mod release;
pub mod ring_buffer;
pub mod singly_linked_list;

pub use array_stack::{ArrayStack, ArrayStackError, ArrayStackResult};
pub use doubly_linked_list::DoublyLinkedList;
pub use list_stack::ListStack;
pub use release::{NoRelease, ReleaseHook, Released, TraceRelease};
pub use ring_buffer::{RingBufferError, RingBufferQueue, RingBufferResult};
pub use singly_linked_list::SinglyLinkedList;
