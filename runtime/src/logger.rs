//! `log` backend that prints records on the console UART.

use core::fmt::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::{config, devices::Uart};

pub struct UartLogger {
    base: usize,
}

impl UartLogger {
    pub const fn new(base: usize) -> Self {
        Self { base }
    }

    fn uart(&self) -> Uart {
        Uart::bind(self.base)
    }
}

impl Log for UartLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut uart = self.uart();
        writeln!(uart, "[{}] {}: {}", record.level(), record.target(), record.args()).ok();
    }

    fn flush(&self) {}
}

static LOGGER: UartLogger = UartLogger::new(config::UART_BASE);

/// Routes `log` records at `level` and above to the console.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn writes_record_to_uart() {
        let mut reg: u64 = 0;
        let base = &raw mut reg;
        let logger = UartLogger::new(base as usize);
        log::set_max_level(LevelFilter::Trace);
        logger.log(
            &Record::builder()
                .level(Level::Error)
                .target("runtime")
                .args(format_args!("boom"))
                .build(),
        );
        assert_eq!(unsafe { core::ptr::read_volatile(base as *const u8) }, b'\n');
    }

    #[test]
    fn enabled_follows_max_level() {
        let logger = UartLogger::new(0);
        let info = Metadata::builder().level(Level::Info).build();
        log::set_max_level(LevelFilter::Trace);
        assert!(logger.enabled(&info));
    }
}
