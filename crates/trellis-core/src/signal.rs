//! Signal/slot notifications for Trellis.
//!
//! Every grid notification (`cell_selected`, `repaint_requested`, pointer
//! capture) is a [`Signal`]. Emitting runs each connected closure
//! synchronously, in connection order, before `emit` returns. There is no
//! queued or cross-thread delivery. [`ConnectionGuard`] ties a connection to
//! a scope.
//!
//! # Reentrancy
//!
//! The slot list is snapshotted before invocation, so a slot may connect or
//! disconnect slots on the same signal (or emit it again) without deadlocking.
//! Changes made during an emission take effect on the next emission.
//!
//! # Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let cell_selected = Signal::<(usize, usize)>::new();
//!
//! let conn_id = cell_selected.connect(|(row, col)| {
//!     println!("selected {row},{col}");
//! });
//!
//! cell_selected.emit((1, 2));
//! cell_selected.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Handle to one connected slot, returned by [`Signal::connect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Connected slots keyed by id. The sequence number keeps emission in
/// connection order even after freed keys are reused.
type SlotTable<Args> = Mutex<SlotMap<ConnectionId, (u64, Slot<Args>)>>;

/// A notification source that calls every connected closure with `&Args`.
///
/// Use `()` for notifications without a payload.
///
/// The slot table sits behind a `parking_lot::Mutex`, which makes the signal
/// `Send + Sync`; slots still run on whichever thread calls [`emit`](Self::emit).
pub struct Signal<Args> {
    connections: Arc<SlotTable<Args>>,
    next_seq: AtomicU64,
    blocked: AtomicBool,
}

static_assertions::assert_impl_all!(Signal<u32>: Send, Sync);

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(SlotMap::with_key())),
            next_seq: AtomicU64::new(0),
            blocked: AtomicBool::new(false),
        }
    }

    /// Attach `slot`. Keep the returned id to detach it again.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.connections.lock().insert((seq, Arc::new(slot)))
    }

    /// Attach `slot` for as long as the returned guard lives.
    ///
    /// The guard holds the slot table weakly and may outlive the signal.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        ConnectionGuard {
            connections: Arc::downgrade(&self.connections),
            id: self.connect(slot),
        }
    }

    /// Detach one slot. `false` if `id` was not connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Suppress (`true`) or restore (`false`) emission.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Call every slot with `args` in connection order.
    ///
    /// Returns how many slots ran; a blocked signal runs none.
    #[tracing::instrument(skip_all, target = "trellis_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) -> usize {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "emit suppressed while blocked");
            return 0;
        }

        // Snapshot, then unlock: slots may touch this signal.
        let mut snapshot: Vec<(u64, Slot<Args>)> =
            self.connections.lock().values().cloned().collect();
        snapshot.sort_unstable_by_key(|(seq, _)| *seq);
        tracing::trace!(target: targets::SIGNAL, slots = snapshot.len(), "emit");

        for (_, slot) in &snapshot {
            slot(&args);
        }
        snapshot.len()
    }
}

/// Disconnects its slot on drop. Returned by [`Signal::connect_scoped`].
///
/// ```
/// use std::sync::Arc;
/// use parking_lot::Mutex;
/// use trellis_core::Signal;
///
/// let repaint = Signal::<()>::new();
/// let repaints = Arc::new(Mutex::new(0));
/// {
///     let sink = repaints.clone();
///     let _guard = repaint.connect_scoped(move |_| *sink.lock() += 1);
///     repaint.emit(());
/// }
/// repaint.emit(());
/// assert_eq!(*repaints.lock(), 1);
/// ```
pub struct ConnectionGuard<Args> {
    connections: Weak<SlotTable<Args>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(connections) = self.connections.upgrade() {
            connections.lock().remove(self.id);
        }
    }
}
