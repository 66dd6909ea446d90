//! Producer → dispatcher delivery queue

use crossbeam_channel::{unbounded, Receiver, Sender};

/// Wake-up signals carried from producers to the dispatcher.
pub(crate) enum Signal {
    /// A populated pool slot is ready for delivery.
    Record(usize),
    /// Drain everything queued so far, then acknowledge.
    Flush(Sender<()>),
}

/// Consumer side of the multi-producer FIFO.
///
/// Producers hold plain channel senders and never block: the channel is
/// unbounded, bounded in practice by the record pool's recycling. Enqueue
/// order is global delivery order across all producers.
pub(crate) struct DeliveryQueue {
    receiver: Receiver<Signal>,
}

impl DeliveryQueue {
    /// Create the queue, returning the producer handle and consumer side.
    pub fn channel() -> (Sender<Signal>, DeliveryQueue) {
        let (sender, receiver) = unbounded();
        (sender, DeliveryQueue { receiver })
    }

    /// Block until a signal arrives. Returns `None` only once every
    /// producer handle is dropped *and* the backlog is fully drained, so a
    /// stop request can never skip queued records.
    pub fn wait(&self) -> Option<Signal> {
        self.receiver.recv().ok()
    }

    /// Non-blocking pop used to drain the backlog after a wake-up.
    pub fn try_next(&self) -> Option<Signal> {
        self.receiver.try_recv().ok()
    }
}
