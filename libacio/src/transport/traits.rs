// libacio/src/transport/traits.rs

/// Byte-stream endpoint of the emulated bus. Whatever physically moves bytes
/// between the game and the emulator (a virtual serial handle, a hooked
/// vendor function table) talks to the bus through this trait.
pub trait ByteStream {
    /// Feed one byte written by the game.
    fn write(&mut self, byte: u8);

    /// Take the next byte queued for the game, if any.
    fn read(&mut self) -> Option<u8>;

    /// Number of bytes queued for the game.
    fn bytes_available(&self) -> usize;

    /// Feed a whole buffer. Default implementation writes byte by byte.
    fn write_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write(b);
        }
    }

    /// Fill `buf` with as many queued bytes as are available without
    /// waiting. Returns the number of bytes copied.
    fn read_available(&mut self, buf: &mut [u8]) -> usize {
        let mut n = 0;
        while n < buf.len() {
            match self.read() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }
}
