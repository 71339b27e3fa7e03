//! The printf family.
//!
//! Supported conversions are `%d`, `%u`, `%x`, `%s`, `%c` and `%%`, with the
//! `l`, `ll` and `z` length modifiers selecting 64-bit arguments. Any other
//! conversion is echoed verbatim. Every entry point returns the number of
//! characters the full output has, whether or not it all fit.
//!
//! ```ignore
//! let mut buf = [0u8; 10];
//! let n = snprintf!(buf, 10, "Very long string %d", 999);
//! assert_eq!(n, 20); // buf holds "Very long" and a NUL
//! ```

mod scan;
mod writer;

pub use writer::{Sink, UNBOUNDED, Writer};

use crate::devices::Uart;

/// One printf argument.
///
/// Conversions read arguments the way C's `va_arg` would: `%d` on an
/// [`Arg::Uint`] reinterprets the bits, `%c` takes the low byte of an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    Int(i64),
    Uint(u64),
    Char(u8),
    /// `None` is the null pointer, printed as nothing.
    Str(Option<&'a [u8]>),
}

macro_rules! arg_from {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl From<$ty> for Arg<'_> {
                fn from(v: $ty) -> Self {
                    Arg::$variant(v as _)
                }
            }
        )*
    };
}

arg_from!(Int: i8, i16, i32, i64, isize);
arg_from!(Uint: u8, u16, u32, u64, usize);

/// Characters outside ASCII are passed as `?`.
impl From<char> for Arg<'_> {
    fn from(c: char) -> Self {
        Arg::Char(if c.is_ascii() { c as u8 } else { b'?' })
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(s: &'a [u8]) -> Self {
        Arg::Str(Some(s))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    fn from(s: &'a [u8; N]) -> Self {
        Arg::Str(Some(s))
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(Some(s.as_bytes()))
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    fn from(s: Option<&'a str>) -> Self {
        Arg::Str(s.map(str::as_bytes))
    }
}

/// Formats straight to `uart`.
pub fn vprintf(uart: &Uart, format: &[u8], args: &[Arg<'_>]) -> usize {
    let mut w = Writer::device(*uart);
    scan::format(&mut w, format, args);
    w.finish()
}

/// Formats into `dst` and NUL-terminates it.
///
/// The output is bounded by the length of `dst`: text that does not fit is
/// truncated exactly as [`vsnprintf`] would with `size == dst.len()`.
pub fn vsprintf(dst: &mut [u8], format: &[u8], args: &[Arg<'_>]) -> usize {
    let mut w = Writer::buffer(dst);
    scan::format(&mut w, format, args);
    w.finish()
}

/// Formats at most `size - 1` characters into `dst` followed by a NUL.
///
/// With `size == 0` nothing is written. `size` is clamped to `dst.len()`.
pub fn vsnprintf(dst: &mut [u8], size: usize, format: &[u8], args: &[Arg<'_>]) -> usize {
    let mut w = Writer::bounded(dst, size);
    scan::format(&mut w, format, args);
    w.finish()
}

/// `printf!(format, args...)` to the console UART.
#[macro_export]
macro_rules! printf {
    ($format:expr $(, $arg:expr)* $(,)?) => {
        $crate::fmt::vprintf(
            &$crate::devices::console(),
            ::core::convert::AsRef::<[u8]>::as_ref(&$format),
            &[$($crate::fmt::Arg::from($arg)),*],
        )
    };
}

/// `sprintf!(dst, format, args...)` into a byte buffer.
#[macro_export]
macro_rules! sprintf {
    ($dst:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::fmt::vsprintf(
            ::core::convert::AsMut::<[u8]>::as_mut(&mut $dst),
            ::core::convert::AsRef::<[u8]>::as_ref(&$format),
            &[$($crate::fmt::Arg::from($arg)),*],
        )
    };
}

/// `snprintf!(dst, size, format, args...)` into a byte buffer.
#[macro_export]
macro_rules! snprintf {
    ($dst:expr, $size:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::fmt::vsnprintf(
            ::core::convert::AsMut::<[u8]>::as_mut(&mut $dst),
            $size,
            ::core::convert::AsRef::<[u8]>::as_ref(&$format),
            &[$($crate::fmt::Arg::from($arg)),*],
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::{strcmp, strlen};

    #[test]
    fn sprintf_sums() {
        let mut buf = [0u8; 128];
        let n = sprintf!(buf, "%d + %d = %d\n", 1, 1, 2);
        assert_eq!(n, 10);
        assert_eq!(strcmp(&buf, b"1 + 1 = 2\n"), 0);

        sprintf!(buf, "%d + %d = %d\n", 2, 10, 12);
        assert_eq!(strcmp(&buf, b"2 + 10 = 12\n"), 0);

        sprintf!(buf, "%s", "Hello world!\n");
        assert_eq!(strcmp(&buf, b"Hello world!\n"), 0);
    }

    #[test]
    fn snprintf_reports_untruncated_length() {
        let mut small = [0u8; 10];
        let n = snprintf!(small, 10, "Very long string %d", 999);
        assert_eq!(n, 20);
        assert_eq!(strlen(&small), 9);
        assert_eq!(&small, b"Very long\0");
    }

    #[test]
    fn snprintf_zero_size_leaves_buffer_alone() {
        let mut buf = [0xAAu8; 4];
        assert_eq!(snprintf!(buf, 0, "Limited: %d %s", 123, "test"), 17);
        assert_eq!(buf, [0xAA; 4]);

        let mut empty: [u8; 0] = [];
        assert_eq!(vsnprintf(&mut empty, 0, b"%d", &[Arg::Int(-5)]), 2);
    }

    #[test]
    fn sprintf_is_bounded_by_destination() {
        let mut buf = [0u8; 4];
        assert_eq!(sprintf!(buf, "%d", 12345), 5);
        assert_eq!(&buf, b"123\0");
    }

    #[test]
    fn long_and_hex_arguments() {
        let mut buf = [0u8; 100];
        assert_eq!(sprintf!(buf, "Long: %ld", 1234567890i64), 16);
        assert_eq!(sprintf!(buf, "ULong: %lu", 4294967295u64), 17);
        assert_eq!(sprintf!(buf, "HexLong: %lx", 0xDEADBEEFu64), 17);
        assert_eq!(&buf[..strlen(&buf)], b"HexLong: deadbeef");

        assert_eq!(sprintf!(buf, "%lx", 0xDEADBEEFu64), 8);
        assert_eq!(&buf[..9], b"deadbeef\0");
    }

    #[test]
    fn unknown_specifier_echoes() {
        let mut buf = [0u8; 8];
        assert_eq!(sprintf!(buf, "%q"), 2);
        assert_eq!(&buf[..3], b"%q\0");
    }

    #[test]
    fn argument_conversions() {
        assert_eq!(Arg::from('x'), Arg::Char(b'x'));
        assert_eq!(Arg::from('\x7f'), Arg::Char(0x7f));
        assert_eq!(Arg::from(-3i8), Arg::Int(-3));
        assert_eq!(Arg::from(7usize), Arg::Uint(7));
        assert_eq!(Arg::from(None::<&str>), Arg::Str(None));
        assert_eq!(Arg::from(b"ab"), Arg::Str(Some(&b"ab"[..])));
    }

    #[test]
    fn non_ascii_chars_become_question_marks() {
        assert_eq!(Arg::from('é'), Arg::Char(b'?'));
        assert_eq!(Arg::from('\u{ff}'), Arg::Char(b'?'));
        assert_eq!(Arg::from('€'), Arg::Char(b'?'));

        let mut buf = [0u8; 8];
        assert_eq!(sprintf!(buf, "[%c]", 'é'), 3);
        assert_eq!(&buf[..4], b"[?]\0");
    }

    #[test]
    fn format_accepts_byte_strings_and_slices() {
        let mut buf = [0u8; 32];
        let fmt = b"%s=%u";
        let n = sprintf!(&mut buf[..], fmt, b"k", 3u32);
        assert_eq!(n, 3);
        assert_eq!(&buf[..4], b"k=3\0");
    }

    #[test]
    fn printf_counts_device_output() {
        let mut reg: u64 = 0;
        let base = &raw mut reg;
        let uart = Uart::bind(base as usize);
        assert_eq!(vprintf(&uart, b"Number: %d, Hex: %x", &[Arg::Int(42), Arg::Int(255)]), 19);
        assert_eq!(unsafe { core::ptr::read_volatile(base as *const u8) }, b'f');
    }
}
