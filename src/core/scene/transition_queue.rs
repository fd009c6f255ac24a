//=========================================================================
// Transition Queue
//=========================================================================
//
// Channel of pending scene transitions.
//
// Producers outside the active scene (other threads, input handlers) send
// target keys through a `TransitionSender`. The scene manager owns the
// receiving end and drains it during `update()`, so it stays the only
// writer of the active scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::SceneKey;

//=== TransitionSender ====================================================

/// Cloneable handle for requesting scene transitions.
#[derive(Debug)]
pub struct TransitionSender<S: SceneKey> {
    sender: Sender<S>,
}

impl<S: SceneKey> Clone for TransitionSender<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: SceneKey> TransitionSender<S> {
    /// Requests a transition to `key`, applied on the next manager update.
    ///
    /// Returns `false` if the request was dropped because the manager is gone
    /// or a bounded queue is full.
    pub fn request(&self, key: S) -> bool {
        match self.sender.try_send(key) {
            Ok(()) => true,
            Err(TrySendError::Full(key)) => {
                warn!(target: "scene", "Transition queue full, dropping request for {:?}", key);
                false
            }
            Err(TrySendError::Disconnected(key)) => {
                warn!(target: "scene", "Scene manager gone, dropping request for {:?}", key);
                false
            }
        }
    }
}

//=== TransitionQueue =====================================================

/// Receiving end of the transition channel.
///
/// Keeps its own sender so new handles can be issued at any time.
pub struct TransitionQueue<S: SceneKey> {
    sender: Sender<S>,
    receiver: Receiver<S>,
}

impl<S: SceneKey> TransitionQueue<S> {
    /// Creates an unbounded queue.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Creates a queue holding at most `capacity` pending requests.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn bounded(capacity: usize) -> Self {
        assert!(capacity > 0, "Transition capacity must be positive");
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Issues a new sender for this queue.
    pub fn sender(&self) -> TransitionSender<S> {
        TransitionSender {
            sender: self.sender.clone(),
        }
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Removes the oldest pending request.
    pub fn pop(&self) -> Option<S> {
        self.receiver.try_recv().ok()
    }

    /// Takes every pending request in FIFO order.
    pub fn drain(&self) -> Vec<S> {
        self.receiver.try_iter().collect()
    }
}

impl<S: SceneKey> Default for TransitionQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
