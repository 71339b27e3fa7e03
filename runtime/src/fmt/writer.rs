use core::fmt;

use crate::devices::Uart;

/// Capacity of a sink that never truncates.
pub const UNBOUNDED: usize = usize::MAX;

/// Where formatted bytes go.
pub enum Sink<'a> {
    /// One byte at a time to the UART data register.
    Device(Uart),
    /// Into a caller buffer, truncating and NUL-terminating.
    Buffer(&'a mut [u8]),
}

/// Byte sink that counts every byte offered, stored or not.
pub struct Writer<'a> {
    sink: Sink<'a>,
    capacity: usize,
    position: usize,
}

impl<'a> Writer<'a> {
    pub fn device(uart: Uart) -> Self {
        Self {
            sink: Sink::Device(uart),
            capacity: UNBOUNDED,
            position: 0,
        }
    }

    /// A buffer sink whose capacity is the whole of `dst`.
    pub fn buffer(dst: &'a mut [u8]) -> Self {
        let capacity = dst.len();
        Self::bounded(dst, capacity)
    }

    /// A buffer sink limited to `capacity` bytes, terminator included.
    /// The capacity never exceeds the length of `dst`.
    pub fn bounded(dst: &'a mut [u8], capacity: usize) -> Self {
        Self {
            capacity: capacity.min(dst.len()),
            sink: Sink::Buffer(dst),
            position: 0,
        }
    }

    pub fn put(&mut self, c: u8) {
        match &mut self.sink {
            Sink::Device(uart) => uart.putc(c),
            Sink::Buffer(dst) => {
                // The last slot is kept for the terminator.
                if self.position < self.capacity.saturating_sub(1) {
                    if let Some(slot) = dst.get_mut(self.position) {
                        *slot = c;
                    }
                }
            }
        }
        self.position += 1;
    }

    /// Bytes offered so far, including any that were truncated.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Terminates a buffer sink and returns the logical length.
    pub fn finish(self) -> usize {
        if let Sink::Buffer(dst) = self.sink {
            if self.capacity > 0 {
                let end = self.position.min(self.capacity - 1);
                if let Some(slot) = dst.get_mut(end) {
                    *slot = 0;
                }
            }
        }
        self.position
    }
}

impl fmt::Write for Writer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        s.bytes().for_each(|c| self.put(c));
        Ok(())
    }
}
