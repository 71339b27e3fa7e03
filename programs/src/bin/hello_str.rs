#![no_std]
#![no_main]

use programs as _;
use runtime::{Runtime, check, printf, sprintf, string::strcmp};

runtime::entry!(main);

fn main(_rt: &mut Runtime, _args: &str) -> i32 {
    let mut buf = [0u8; 128];

    sprintf!(buf, "%s", "Hello world!\n");
    printf!("output: %s", &buf);
    check(strcmp(&buf, b"Hello world!\n\0") == 0);

    sprintf!(buf, "%d + %d = %d\n", 1, 1, 2);
    printf!("output: %s", &buf);
    check(strcmp(&buf, b"1 + 1 = 2\n\0") == 0);

    sprintf!(buf, "%d + %d = %d\n", 2, 10, 12);
    printf!("output: %s", &buf);
    check(strcmp(&buf, b"2 + 10 = 12\n\0") == 0);

    0
}
