// libacio/src/transport/port.rs

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use super::traits::ByteStream;

/// Virtual serial handle over a shared byte stream.
///
/// Implements `std::io::Read` and `std::io::Write` the way a COM port
/// handle behaves towards the game: writes are always accepted in full,
/// reads return whatever is queued right now and never block (0 bytes when
/// nothing is pending). Clones share the same underlying stream.
pub struct BusPort<S: ByteStream> {
    inner: Arc<Mutex<S>>,
}

impl<S: ByteStream> Clone for BusPort<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ByteStream> BusPort<S> {
    pub fn new(stream: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(stream)),
        }
    }

    pub fn bytes_available(&self) -> usize {
        self.inner.lock().bytes_available()
    }

    /// Run `f` with exclusive access to the underlying stream.
    pub fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<S: ByteStream> io::Read for BusPort<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.inner.lock().read_available(buf))
    }
}

impl<S: ByteStream> io::Write for BusPort<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().write_all(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
