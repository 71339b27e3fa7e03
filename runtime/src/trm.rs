//! Entry and termination protocol.
//!
//! On the target, `_start` points the stack at the top of memory and calls
//! into [`run`], which hands a [`Runtime`] to the program registered with
//! [`entry!`](crate::entry). Whatever `main` returns is reported to the host
//! by [`halt`]: the low byte goes in `a0` and the hart executes `ebreak`.

use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};

use crate::{
    config,
    devices::{self, Timer, Uart},
    heap::Arena,
    stdlib::Rng,
};

/// A half-open address range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub start: usize,
    pub end: usize,
}

impl Area {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The free memory between the end of the image and the end of RAM.
    pub const fn heap(heap_start: usize) -> Self {
        Self::new(heap_start, config::MEMORY_END)
    }

    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process exit status as seen by the host: one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub u8);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

impl From<i32> for ExitCode {
    fn from(code: i32) -> Self {
        ExitCode(code as u8)
    }
}

/// Everything a program owns for the duration of the run.
pub struct Runtime {
    pub heap: Arena<'static>,
    pub rng: Rng,
    /// Memory left free by the loaded image.
    pub area: Area,
    pub uart: Uart,
    pub timer: Timer,
}

static TAKEN: AtomicBool = AtomicBool::new(false);

static mut ARENA: [u8; config::HEAP_SIZE] = [0; config::HEAP_SIZE];

impl Runtime {
    pub fn new(heap: &'static mut [u8], area: Area) -> Self {
        Self {
            heap: Arena::new(heap),
            rng: Rng::default(),
            area,
            uart: devices::console(),
            timer: devices::timer(),
        }
    }

    /// Builds the process context over the static heap arena.
    ///
    /// Returns `None` on every call after the first.
    pub fn take(area: Area) -> Option<Self> {
        if TAKEN.swap(true, Ordering::AcqRel) {
            return None;
        }
        // SAFETY: `TAKEN` guards the arena so this borrow is the only one.
        let heap = unsafe { &mut *(&raw mut ARENA) };
        Some(Self::new(heap, area))
    }
}

/// Runs `main` to completion and reports its result through [`halt`].
pub fn run(rt: &mut Runtime, main: fn(&mut Runtime, &str) -> i32, args: &str) -> ! {
    if rt.area.is_empty() {
        warn!("no free memory between the image and {:#x}", rt.area.end);
    }
    debug!(
        "heap area [{:#x}, {:#x}), arena {} bytes",
        rt.area.start,
        rt.area.end,
        rt.heap.capacity()
    );
    let code = main(rt, args);
    debug!("main returned {code}");
    halt(code)
}

/// Terminates the program with `code`. Nothing runs afterwards.
pub fn halt(code: i32) -> ! {
    trap(ExitCode::from(code))
}

/// Halts with exit code 1 unless `cond` holds.
pub fn check(cond: bool) {
    if !cond {
        halt(1);
    }
}

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
fn trap(code: ExitCode) -> ! {
    // SAFETY: the host intercepts `ebreak` and stops the hart.
    unsafe {
        core::arch::asm!("ebreak", in("a0") code.0 as usize);
    }
    loop {
        core::hint::spin_loop();
    }
}

#[cfg(not(any(target_arch = "riscv32", target_arch = "riscv64")))]
fn trap(code: ExitCode) -> ! {
    panic!("trap: exit code {}", code.0)
}

/// Registers `$main` as the program entry point.
///
/// `$main` must have the signature `fn(&mut Runtime, &str) -> i32`.
#[macro_export]
macro_rules! entry {
    ($main:path) => {
        #[unsafe(export_name = "__runtime_main")]
        pub fn __runtime_main(rt: &mut $crate::Runtime, args: &str) -> i32 {
            let main: fn(&mut $crate::Runtime, &str) -> i32 = $main;
            main(rt, args)
        }
    };
}

#[cfg(all(target_arch = "riscv64", target_os = "none"))]
mod start {
    use super::{Area, Runtime, halt, run};
    use crate::{config, devices, logger};

    core::arch::global_asm!(
        ".section .text.entry",
        ".globl _start",
        "_start:",
        "    la sp, _stack_top",
        "    call _trm_init",
    );

    unsafe extern "C" {
        static _heap_start: u8;
    }

    unsafe extern "Rust" {
        fn __runtime_main(rt: &mut Runtime, args: &str) -> i32;
    }

    fn main(rt: &mut Runtime, args: &str) -> i32 {
        // SAFETY: provided by `entry!` in the program crate.
        unsafe { __runtime_main(rt, args) }
    }

    #[unsafe(no_mangle)]
    extern "C" fn _trm_init() -> ! {
        devices::console().init();
        logger::init(config::LOG_LEVEL).ok();

        let heap = Area::heap(&raw const _heap_start as usize);
        let Some(mut rt) = Runtime::take(heap) else {
            halt(1)
        };
        run(&mut rt, main, config::MAINARGS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_keeps_low_byte() {
        assert_eq!(ExitCode::from(0), ExitCode::SUCCESS);
        assert_eq!(ExitCode::from(1), ExitCode::FAILURE);
        assert_eq!(ExitCode::from(256), ExitCode(0));
        assert_eq!(ExitCode::from(-1), ExitCode(255));
        assert_eq!(ExitCode::from(300), ExitCode(44));
    }

    #[test]
    fn area_bounds() {
        let area = Area::new(0x1000, 0x2000);
        assert_eq!(area.len(), 0x1000);
        assert!(!area.is_empty());
        assert!(Area::new(0x2000, 0x1000).is_empty());

        let heap = Area::heap(config::MEMORY_BASE + 0x4000);
        assert_eq!(heap.end, config::MEMORY_END);
        assert_eq!(heap.len(), config::MEMORY_SIZE - 0x4000);
    }

    #[test]
    fn runtime_is_taken_once() {
        let rt = Runtime::take(Area::heap(config::MEMORY_BASE));
        assert!(rt.is_some());
        assert!(Runtime::take(Area::heap(config::MEMORY_BASE)).is_none());

        let mut rt = rt.unwrap();
        assert_eq!(rt.heap.capacity(), config::HEAP_SIZE);
        assert!(rt.heap.allocate(config::HEAP_SIZE).is_some());
        assert!(rt.heap.allocate(1).is_none());
    }

    #[test]
    #[should_panic(expected = "exit code 3")]
    fn halt_reports_code() {
        halt(3);
    }

    #[test]
    #[should_panic(expected = "exit code 255")]
    fn halt_truncates_negative_code() {
        halt(-1);
    }

    #[test]
    #[should_panic(expected = "exit code 1")]
    fn failed_check_halts() {
        let sum = 1 + 1;
        check(sum == 3);
    }

    #[test]
    fn passing_check_returns() {
        check(true);
    }

    #[test]
    #[should_panic(expected = "exit code 7")]
    fn run_reports_main_result() {
        static mut STORAGE: [u8; 16] = [0; 16];
        let heap = unsafe { &mut *(&raw mut STORAGE) };
        let mut rt = Runtime::new(heap, Area::new(0, 16));
        fn main(rt: &mut Runtime, args: &str) -> i32 {
            assert_eq!(args, "--fast");
            rt.heap.allocate(16).map_or(0, |b| b.len() as i32 - 9)
        }
        run(&mut rt, main, "--fast");
    }

    #[test]
    #[should_panic(expected = "exit code 0")]
    fn run_with_empty_area_still_calls_main() {
        static mut STORAGE: [u8; 4] = [0; 4];
        let heap = unsafe { &mut *(&raw mut STORAGE) };
        let area = Area::heap(config::MEMORY_END);
        assert!(area.is_empty());
        let mut rt = Runtime::new(heap, area);
        fn main(rt: &mut Runtime, _args: &str) -> i32 {
            rt.heap.remaining() as i32 - 4
        }
        run(&mut rt, main, "");
    }
}
