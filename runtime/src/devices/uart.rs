use core::{fmt::Write, ptr};

/// Transmit-only UART.
///
/// Register layout relative to the base address:
///   0x00: data (write one byte to transmit it)
///   0x04: status (reserved, read but ignored)
#[derive(Debug, Clone, Copy)]
pub struct Uart {
    data: *mut u8,
    status: *const u32,
}

impl Uart {
    pub const DATA_REG: usize = 0x00;
    pub const STATUS_REG: usize = 0x04;

    pub const fn bind(base: usize) -> Self {
        Self {
            data: (base + Self::DATA_REG) as *mut u8,
            status: (base + Self::STATUS_REG) as *const u32,
        }
    }

    pub fn init(&self) {
        // Status is read but not acted on yet; transmission never stalls.
        unsafe { ptr::read_volatile(self.status) };
    }

    pub fn putc(&self, c: u8) {
        unsafe { ptr::write_volatile(self.data, c) };
    }

    /// Writes a NUL-terminated string without a trailing newline.
    pub fn write_bytes(&self, s: &[u8]) {
        s.iter().take_while(|&&c| c != 0).for_each(|&c| self.putc(c));
    }

    /// Writes `s` followed by a newline.
    pub fn puts(&self, s: &[u8]) {
        self.write_bytes(s);
        self.putc(b'\n');
    }
}

impl Write for Uart {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        s.bytes().for_each(|c| self.putc(c));
        Ok(())
    }
}
