//! Route buffer - defers navigation actions until the UI is ready
//!
//! Notification responses arrive on whatever thread the platform chooses,
//! often before the UI has registered a handler. Actions are queued until a
//! handler exists and are then delivered in arrival order.
//!
//! # Locking
//! The mutex guards only the handler slot and the queue. Handlers are always
//! invoked through the [`RouteExecutor`], after the lock is released, so a
//! handler may call back into the buffer without deadlocking.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use weekender_domain::RouteAction;

use super::ports::{RouteExecutor, RouteHandler};

#[derive(Default)]
struct BufferState {
    handler: Option<RouteHandler>,
    pending: VecDeque<RouteAction>,
    /// A `set_handler` call is delivering drained actions; new emits queue
    /// behind them.
    flushing: bool,
}

/// Thread-safe queue of route actions awaiting a handler.
pub struct RouteBuffer {
    state: Mutex<BufferState>,
    executor: Arc<dyn RouteExecutor>,
}

impl RouteBuffer {
    pub fn new(executor: Arc<dyn RouteExecutor>) -> Self {
        Self { state: Mutex::new(BufferState::default()), executor }
    }

    /// Deliver `action` to the handler, or queue it if none is registered.
    pub fn emit(&self, action: RouteAction) {
        let handler = {
            let mut state = self.state.lock();
            match state.handler.clone() {
                Some(handler) if !state.flushing => handler,
                _ => {
                    debug!(route = ?action, queued = state.pending.len() + 1, "route action buffered");
                    state.pending.push_back(action);
                    return;
                }
            }
        };

        self.executor.execute(Box::new(move || handler(action)));
    }

    /// Register the handler and flush anything queued before it arrived.
    ///
    /// Each flushed batch goes to whichever handler is registered when the
    /// batch is drained, so a replacement made mid-flush receives everything
    /// emitted after it.
    pub fn set_handler(&self, mut handler: RouteHandler) {
        let mut drained = {
            let mut state = self.state.lock();
            state.handler = Some(handler.clone());
            if state.pending.is_empty() {
                return;
            }
            state.flushing = true;
            state.pending.drain(..).collect::<Vec<_>>()
        };

        loop {
            debug!(count = drained.len(), "flushing buffered route actions");
            let batch_handler = handler.clone();
            self.executor.execute(Box::new(move || {
                for action in drained {
                    batch_handler(action);
                }
            }));

            let mut state = self.state.lock();
            if state.pending.is_empty() {
                state.flushing = false;
                return;
            }
            drained = state.pending.drain(..).collect();
            handler = state.handler.clone().unwrap_or(handler);
        }
    }

    /// Number of actions waiting for a handler.
    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn has_handler(&self) -> bool {
        self.state.lock().handler.is_some()
    }
}
