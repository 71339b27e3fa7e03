use core::ptr;

/// Free-running microsecond counter.
///
/// Register layout relative to the base address:
///   0x00: 64-bit counter, read-only
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    counter: *const u64,
}

/// A timer reading in microseconds since an unspecified epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Instant(u64);

impl Timer {
    pub const COUNTER_REG: usize = 0x00;

    pub const fn bind(base: usize) -> Self {
        Self {
            counter: (base + Self::COUNTER_REG) as *const u64,
        }
    }

    /// Reads the counter with a single aligned 64-bit load.
    pub fn now_us(&self) -> u64 {
        unsafe { ptr::read_volatile(self.counter) }
    }

    pub fn now(&self) -> Instant {
        Instant(self.now_us())
    }
}

impl Instant {
    pub const fn from_micros(us: u64) -> Self {
        Self(us)
    }

    pub const fn as_micros(self) -> u64 {
        self.0
    }

    /// Microseconds from `earlier` to `self`; zero if the counter went backwards.
    pub fn duration_since(self, earlier: Instant) -> u64 {
        elapsed_us(earlier.0, self.0)
    }
}

/// Microseconds between two raw reads, saturating at zero on wraparound.
pub fn elapsed_us(t1: u64, t2: u64) -> u64 {
    t2.saturating_sub(t1)
}
