#![no_std]
#![no_main]

use core::hint::black_box;

use programs as _;
use runtime::{Runtime, printf};

runtime::entry!(main);

/// Two seconds.
const THRESHOLD_US: u64 = 2_000_000;

fn main(rt: &mut Runtime, _args: &str) -> i32 {
    let t1 = rt.timer.now();
    for i in 0..50_000u64 {
        black_box(i);
    }
    let t2 = rt.timer.now();
    let dt = t2.duration_since(t1);

    printf!("t1: %lu, t2: %lu\n", t1.as_micros(), t2.as_micros());
    printf!("dt: %u\n", dt as u32);
    if dt > 0 && dt < THRESHOLD_US { 0 } else { 1 }
}
