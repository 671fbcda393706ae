use core::fmt::Debug;

/// what a list container is destroying, handed to a [`ReleaseHook`]
#[derive(Debug, PartialEq, Eq)]
pub enum Released<'a, T> {
    /// a real node, carrying its payload just before it leaves the list
    Data(&'a T),
    /// the head sentinel, released when the list is dropped
    Head,
    /// the tail sentinel, released last when the list is dropped
    Tail,
}

/// observes node destruction inside the list containers.
///
/// nodes are released synchronously at the point they become unreachable:
/// on pops, erases, removals and `clear`, and on drop for whatever remains
/// (front to back, then `Head`, then `Tail`).
///
/// this order differs from a chain whose last node is kept alive by a strong
/// tail link, which reports the head, every node but the last, the tail, and
/// only then the last node.
///
/// any `FnMut(Released<'_, T>)` closure is a hook.
pub trait ReleaseHook<T> {
    fn on_release(&mut self, released: Released<'_, T>);
}

/// the default hook; releases nodes silently
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoRelease;

impl<T> ReleaseHook<T> for NoRelease {
    #[inline]
    fn on_release(&mut self, _released: Released<'_, T>) {}
}

/// emits a `tracing` event at trace level for every released node
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceRelease;

impl<T: Debug> ReleaseHook<T> for TraceRelease {
    fn on_release(&mut self, released: Released<'_, T>) {
        match released {
            Released::Data(data) => tracing::trace!(?data, "{:?} released", data),
            Released::Head => tracing::trace!("head released"),
            Released::Tail => tracing::trace!("tail released"),
        }
    }
}

impl<T, F> ReleaseHook<T> for F
where
    F: FnMut(Released<'_, T>),
{
    #[inline]
    fn on_release(&mut self, released: Released<'_, T>) {
        self(released)
    }
}

/// route `tracing` output through the test harness for the current thread
#[cfg(test)]
pub(crate) fn trace_init() -> impl Drop {
    use tracing_subscriber::prelude::*;
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .with_timer(())
        .set_default()
}
