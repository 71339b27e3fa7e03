//! NUL-terminated string primitives.
//!
//! Strings are byte slices terminated by the first NUL; a slice with no NUL
//! ends at its last byte. Destinations must have room for the result and its
//! terminator, as in C.

/// Byte `i` of `s`, reading past the end as NUL.
fn at(s: &[u8], i: usize) -> u8 {
    s.get(i).copied().unwrap_or(0)
}

pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

pub fn strcpy<'a>(dst: &'a mut [u8], src: &[u8]) -> &'a mut [u8] {
    let len = strlen(src);
    dst[..len].copy_from_slice(&src[..len]);
    dst[len] = 0;
    dst
}

/// Copies at most `n` bytes and pads the rest of the `n` bytes with NUL. The
/// result is not terminated when `src` is `n` bytes or longer.
pub fn strncpy<'a>(dst: &'a mut [u8], src: &[u8], n: usize) -> &'a mut [u8] {
    let len = strlen(src).min(n);
    dst[..len].copy_from_slice(&src[..len]);
    for b in &mut dst[len..n] {
        *b = 0;
    }
    dst
}

pub fn strcat<'a>(dst: &'a mut [u8], src: &[u8]) -> &'a mut [u8] {
    let end = strlen(dst);
    strcpy(&mut dst[end..], src);
    dst
}

pub fn strcmp(s1: &[u8], s2: &[u8]) -> i32 {
    let mut i = 0;
    while at(s1, i) != 0 && at(s1, i) == at(s2, i) {
        i += 1;
    }
    i32::from(at(s1, i)) - i32::from(at(s2, i))
}

pub fn strncmp(s1: &[u8], s2: &[u8], n: usize) -> i32 {
    let mut i = 0;
    while i < n && at(s1, i) != 0 && at(s1, i) == at(s2, i) {
        i += 1;
    }
    if i == n {
        return 0;
    }
    i32::from(at(s1, i)) - i32::from(at(s2, i))
}
