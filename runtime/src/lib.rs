#![cfg_attr(not(test), no_std)]
//! Freestanding runtime for bare-metal RISC-V guest programs.
//!
//! Provides the C-library contracts guest code expects (memory and string
//! primitives, a bump allocator, the printf family), drivers for the UART and
//! timer, and the entry/termination protocol that reports the exit code to
//! the emulator.

pub mod config;
pub mod devices;
pub mod fmt;
pub mod heap;
pub mod logger;
pub mod mem;
pub mod stdlib;
pub mod string;
pub mod trm;

pub use devices::{Timer, Uart, console, timer};
pub use fmt::{Arg, vprintf, vsnprintf, vsprintf};
pub use heap::Arena;
pub use stdlib::Rng;
pub use trm::{Area, ExitCode, Runtime, check, halt};
