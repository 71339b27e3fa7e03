//! Polling drivers for the memory-mapped peripherals.

mod timer;
mod uart;

pub use timer::{Instant, Timer, elapsed_us};
pub use uart::Uart;

use crate::config;

/// The UART configured as the console.
pub fn console() -> Uart {
    Uart::bind(config::UART_BASE)
}

/// The configured microsecond timer.
pub fn timer() -> Timer {
    Timer::bind(config::TIMER_BASE)
}
