//! Background keypad scan.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use super::keypad::KeypadBank;
use crate::error::Result;
use crate::input::CardInput;
use crate::utils::KEYPAD_POLL_INTERVAL;

/// Thread re-scanning every unit's keypad so short presses are latched
/// between game polls. Dropping the poller stops and joins the thread.
pub struct KeypadPoller {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl KeypadPoller {
    pub fn spawn(bank: Arc<Mutex<KeypadBank>>, input: Arc<dyn CardInput>) -> Result<Self> {
        let (stop, rx) = mpsc::channel::<()>();
        let units = bank.lock().len();

        let handle = thread::Builder::new()
            .name("icca-keypad".into())
            .spawn(move || {
                log::debug!(target: "icca", "keypad poller started for {} unit(s)", units);
                loop {
                    match rx.recv_timeout(KEYPAD_POLL_INTERVAL) {
                        Err(RecvTimeoutError::Timeout) => {
                            // keys are read under the lock, see KeypadBank::sample
                            bank.lock().sample_all(input.as_ref());
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                log::debug!(target: "icca", "keypad poller stopped");
            })?;

        Ok(Self {
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the thread and wait for it to exit.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!(target: "icca", "keypad poller panicked");
            }
        }
    }
}

impl Drop for KeypadPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
