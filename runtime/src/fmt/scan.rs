//! Format string scanner shared by every printf entry point.

use core::slice;

use super::{Arg, Writer};

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Argument width selected by a length modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Length {
    /// `int` / `unsigned int`, 32 bits.
    Int,
    /// `l`, `ll` or `z`: 64 bits.
    Long,
}

/// Cursor over the argument list, one value per conversion.
///
/// Missing arguments read as zero or as a null string.
struct Args<'a, 'b> {
    rest: slice::Iter<'b, Arg<'a>>,
}

impl<'a> Args<'a, '_> {
    fn signed(&mut self, length: Length) -> i64 {
        let raw = match self.rest.next() {
            Some(&Arg::Int(v)) => v,
            Some(&Arg::Uint(v)) => v as i64,
            Some(&Arg::Char(c)) => i64::from(c),
            Some(Arg::Str(_)) | None => 0,
        };
        match length {
            Length::Int => i64::from(raw as i32),
            Length::Long => raw,
        }
    }

    fn unsigned(&mut self, length: Length) -> u64 {
        let raw = match self.rest.next() {
            Some(&Arg::Int(v)) => v as u64,
            Some(&Arg::Uint(v)) => v,
            Some(&Arg::Char(c)) => u64::from(c),
            Some(Arg::Str(_)) | None => 0,
        };
        match length {
            Length::Int => u64::from(raw as u32),
            Length::Long => raw,
        }
    }

    fn char(&mut self) -> u8 {
        match self.rest.next() {
            Some(&Arg::Char(c)) => c,
            Some(&Arg::Int(v)) => v as u8,
            Some(&Arg::Uint(v)) => v as u8,
            Some(Arg::Str(_)) | None => 0,
        }
    }

    fn str(&mut self) -> Option<&'a [u8]> {
        match self.rest.next() {
            Some(&Arg::Str(s)) => s,
            _ => None,
        }
    }
}

/// Copies `format` into `w`, expanding each conversion from `args`.
///
/// Scanning stops at the first NUL in `format`.
pub(crate) fn format(w: &mut Writer<'_>, format: &[u8], args: &[Arg<'_>]) {
    let mut args = Args { rest: args.iter() };
    let mut rest = format;
    while let Some((&c, tail)) = rest.split_first() {
        rest = match c {
            0 => break,
            b'%' => conversion(w, tail, &mut args),
            _ => {
                w.put(c);
                tail
            }
        };
    }
}

/// Expands one conversion; `spec` starts just after the `%`. Returns the
/// format text that follows it.
fn conversion<'f>(w: &mut Writer<'_>, spec: &'f [u8], args: &mut Args<'_, '_>) -> &'f [u8] {
    let (length, rest) = length_modifier(spec);
    let modifier = &spec[..spec.len() - rest.len()];

    let (kind, rest) = match rest.split_first() {
        Some((&kind, tail)) if kind != 0 => (kind, tail),
        _ => {
            // A '%' dangling at the end of the format is printed as-is.
            w.put(b'%');
            modifier.iter().for_each(|&c| w.put(c));
            return rest;
        }
    };

    match kind {
        b'd' => signed(w, args.signed(length)),
        b'u' => unsigned(w, args.unsigned(length), 10),
        b'x' => unsigned(w, args.unsigned(length), 16),
        b's' => string(w, args.str()),
        b'c' => w.put(args.char()),
        b'%' => w.put(b'%'),
        _ => {
            // Unknown conversion: echo it verbatim.
            w.put(b'%');
            modifier.iter().for_each(|&c| w.put(c));
            w.put(kind);
        }
    }
    rest
}

fn length_modifier(spec: &[u8]) -> (Length, &[u8]) {
    match spec {
        [b'l', b'l', rest @ ..] => (Length::Long, rest),
        [b'l' | b'z', rest @ ..] => (Length::Long, rest),
        _ => (Length::Int, spec),
    }
}

fn signed(w: &mut Writer<'_>, n: i64) {
    if n < 0 {
        w.put(b'-');
    }
    unsigned(w, n.unsigned_abs(), 10);
}

/// Emits `m` most significant digit first by recursing on `m / base`.
fn unsigned(w: &mut Writer<'_>, m: u64, base: u64) {
    if m >= base {
        unsigned(w, m / base, base);
    }
    w.put(DIGITS[(m % base) as usize]);
}

fn string(w: &mut Writer<'_>, s: Option<&[u8]>) {
    if let Some(s) = s {
        s.iter().take_while(|&&c| c != 0).for_each(|&c| w.put(c));
    }
}
