use std::io::Write;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use tracing::debug;

use crate::direct::write_all_frame;
use crate::error::{Result, TransportError};
use crate::traits::FrameSink;

/// A sink that transmits in the background, one frame at a time.
///
/// A worker thread owns the writer. [`start_send`] copies the frame into a
/// single slot, marks it in flight, and returns immediately; the worker
/// drains the slot and clears the in-flight flag only once the write has
/// completed. While a frame is in flight the sink reports not-ready and
/// rejects new frames with [`TransportError::Busy`].
///
/// A write failure is terminal: the error is logged and the sink shuts
/// down, rejecting all further frames with [`TransportError::Shutdown`].
/// Dropping the sink signals the worker and joins it.
///
/// [`start_send`]: FrameSink::start_send
pub struct SpooledSink {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

struct Shared {
    slot: Mutex<Slot>,
    wakeup: Condvar,
}

struct Slot {
    pending: Option<Vec<u8>>,
    in_flight: bool,
    shutdown: bool,
}

impl SpooledSink {
    /// Spawn a worker thread that transmits frames through `writer`.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        let shared = Arc::new(Shared {
            slot: Mutex::new(Slot {
                pending: None,
                in_flight: false,
                shutdown: false,
            }),
            wakeup: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::Builder::new()
            .name("plotwire-spool".into())
            .spawn(move || run_worker(writer, worker_shared));

        match worker {
            Ok(handle) => Self {
                shared,
                worker: Some(handle),
            },
            Err(err) => {
                // No worker means nothing will ever drain the slot.
                debug!(error = %err, "failed to spawn spool worker");
                lock_slot(&shared.slot).shutdown = true;
                Self {
                    shared,
                    worker: None,
                }
            }
        }
    }

    /// Whether the sink has permanently shut down.
    pub fn is_shutdown(&self) -> bool {
        lock_slot(&self.shared.slot).shutdown
    }
}

impl FrameSink for SpooledSink {
    fn is_ready(&self) -> bool {
        let slot = lock_slot(&self.shared.slot);
        !slot.in_flight && !slot.shutdown
    }

    fn start_send(&mut self, frame: &[u8]) -> Result<()> {
        let mut slot = lock_slot(&self.shared.slot);
        if slot.shutdown {
            return Err(TransportError::Shutdown);
        }
        if slot.in_flight {
            return Err(TransportError::Busy);
        }

        slot.pending = Some(frame.to_vec());
        slot.in_flight = true;
        drop(slot);
        self.shared.wakeup.notify_one();
        Ok(())
    }
}

impl Drop for SpooledSink {
    fn drop(&mut self) {
        lock_slot(&self.shared.slot).shutdown = true;
        self.shared.wakeup.notify_one();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker<W: Write>(mut writer: W, shared: Arc<Shared>) {
    loop {
        let frame = {
            let mut slot = lock_slot(&shared.slot);
            loop {
                if let Some(frame) = slot.pending.take() {
                    break frame;
                }
                if slot.shutdown {
                    return;
                }
                slot = shared
                    .wakeup
                    .wait(slot)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };

        let outcome = write_all_frame(&mut writer, &frame);

        let mut slot = lock_slot(&shared.slot);
        slot.in_flight = false;
        if let Err(err) = outcome {
            debug!(error = %err, "background write failed, shutting sink down");
            slot.shutdown = true;
            return;
        }
    }
}

fn lock_slot(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
