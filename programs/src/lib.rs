//! Self-test programs run on the emulator under the runtime.

#![no_std]

use core::{fmt::Write, panic::PanicInfo};

#[panic_handler]
fn panic(info: &PanicInfo<'_>) -> ! {
    writeln!(runtime::console(), "{info}").ok(); // Do not panic in panic
    runtime::halt(1)
}
