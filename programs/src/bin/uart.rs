#![no_std]
#![no_main]

use programs as _;
use runtime::Runtime;

runtime::entry!(main);

fn main(rt: &mut Runtime, _args: &str) -> i32 {
    rt.uart.puts(b"Hello from MMIO UART!");
    rt.uart.puts(b"MMIO write test passed!");
    0
}
