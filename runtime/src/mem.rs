//! Memory primitives with their C contracts, expressed over byte slices.
//!
//! `n` is the byte count the C function would take; the slices must be at
//! least that long.

pub fn memset(dst: &mut [u8], c: u8, n: usize) -> &mut [u8] {
    for b in &mut dst[..n] {
        *b = c;
    }
    dst
}

pub fn memcpy<'a>(dst: &'a mut [u8], src: &[u8], n: usize) -> &'a mut [u8] {
    for (d, s) in dst[..n].iter_mut().zip(&src[..n]) {
        *d = *s;
    }
    dst
}

/// Copies `n` bytes inside `buf` from offset `src` to offset `dst` as if
/// through a temporary, so the ranges may overlap.
pub fn memmove(buf: &mut [u8], dst: usize, src: usize, n: usize) -> &mut [u8] {
    assert!(dst + n <= buf.len() && src + n <= buf.len());
    if dst < src {
        for i in 0..n {
            buf[dst + i] = buf[src + i];
        }
    } else {
        // Copy backward so an overlapping tail is read before it is overwritten.
        for i in (0..n).rev() {
            buf[dst + i] = buf[src + i];
        }
    }
    buf
}

pub fn memcmp(s1: &[u8], s2: &[u8], n: usize) -> i32 {
    s1[..n]
        .iter()
        .zip(&s2[..n])
        .find(|(a, b)| a != b)
        .map_or(0, |(a, b)| i32::from(*a) - i32::from(*b))
}
