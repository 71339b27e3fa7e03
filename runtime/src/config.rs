//! Machine constants generated from `device.toml` at build time.
//!
//! Override the device file with `RUNTIME_DEVICE_CONFIG` and the argument
//! string handed to `main` with `RUNTIME_MAINARGS`.

include!(concat!(env!("OUT_DIR"), "/device_config.rs"));

/// One past the last byte of main memory.
pub const MEMORY_END: usize = MEMORY_BASE + MEMORY_SIZE;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_size_is_power_of_two() {
        assert!(MEMORY_SIZE.is_power_of_two());
        assert!(MEMORY_END > MEMORY_BASE);
    }

    #[test]
    fn device_windows_do_not_overlap_memory() {
        for (base, size) in [(UART_BASE, UART_SIZE), (TIMER_BASE, TIMER_SIZE)] {
            assert!(base + size <= MEMORY_BASE || base >= MEMORY_END);
        }
        assert!(UART_BASE + UART_SIZE <= TIMER_BASE || TIMER_BASE + TIMER_SIZE <= UART_BASE);
    }
}
