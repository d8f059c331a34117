// Byte cursors borrowed by a single encode/decode/mutate call.

use std::io;

/// Little-endian input: a borrowed byte slice plus a read offset.
pub type ReadCursor<'a> = io::Cursor<&'a [u8]>;

/// Little-endian output: a borrowed mutable byte slice plus a write offset.
pub type WriteCursor<'a> = io::Cursor<&'a mut [u8]>;

/// Offset bookkeeping shared by read and write cursors.
pub trait Remaining {
    /// Bytes between the current offset and the end of the buffer.
    fn remaining(&self) -> usize;

    /// Current offset from the start of the buffer.
    fn offset(&self) -> usize;

    /// Moves the offset forward without touching the bytes.
    fn skip(&mut self, bytes: usize);
}

impl<B: AsRef<[u8]>> Remaining for io::Cursor<B> {
    fn remaining(&self) -> usize {
        let len = self.get_ref().as_ref().len() as u64;
        len.saturating_sub(self.position()) as usize
    }

    fn offset(&self) -> usize {
        self.position() as usize
    }

    fn skip(&mut self, bytes: usize) {
        let next = self.position() + bytes as u64;
        self.set_position(next);
    }
}
