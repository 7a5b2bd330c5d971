// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Exercises the instruction decode logic.
use super::*;

const INDX: &[u8; 16] = b"\0\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0a\x0b\x0c\x0d\x0e\x0f";

/// runs some arbitrary operations on a brand new CPU, one tick per word,
/// with every register holding its own index.
/// returns the CPU for inspection
fn run_ops(ops: &[u8]) -> CPU {
    let mut cpu = CPU::default();
    cpu.load_program_bytes(ops).unwrap();
    cpu.v = *INDX;
    cpu.flags.quirks = Quirks::from(false);
    for _ in 0..ops.len() / 2 {
        cpu.tick().unwrap(); // will panic on a fault
    }
    cpu
}

/// runs one arbitrary operation on a brand new CPU
fn run_single_op(op: &[u8]) -> CPU {
    run_ops(op)
}

/// gets vX and the flag register
fn vx_vf(cpu: CPU, x: usize) -> [u8; 2] {
    [cpu.v[x], cpu.v[0xf]]
}

#[rustfmt::skip]
mod sys {
    use super::*;
    #[test]                 fn cls()       { assert!(run_single_op(b"\x00\xe0").flags.redraw); }
    #[test]                 fn ret()       { assert_eq!(0x202, run_ops(b"\x22\x04\x12\x02\x00\xee").pc); }
    #[test] #[should_panic] fn ret_empty() { run_single_op(b"\x00\xee"); }
    #[test] #[should_panic] fn u0420()     { run_single_op(b"\x04\x20"); }
}
#[rustfmt::skip]
mod jump {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\x12\x30").pc); }
    #[test] fn unaligned() { assert_eq!(0x231, run_single_op(b"\x12\x31").pc); }
}
#[rustfmt::skip]
mod call {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\x22\x30").pc); }
    #[test] fn unaligned() { assert_eq!(0x231, run_single_op(b"\x22\x31").pc); }
    #[test] fn pushes()    { assert_eq!(&[0x200u16], run_single_op(b"\x22\x30").stack()); }
}
#[rustfmt::skip]
mod skeb {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(b"\x30\x00").pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(b"\x30\x01").pc); }
}
#[rustfmt::skip]
mod sneb {
    use super::*;
    #[test] fn skip()   { assert_eq!(0x204, run_single_op(b"\x40\x01").pc); }
    #[test] fn noskip() { assert_eq!(0x202, run_single_op(b"\x40\x00").pc); }
}
#[rustfmt::skip]
mod se {
    use super::*;
    #[test]                 fn skip()   { assert_eq!(0x204, run_single_op(b"\x50\x00").pc); }
    #[test]                 fn noskip() { assert_eq!(0x202, run_single_op(b"\x50\x10").pc); }
    #[test] #[should_panic] fn u500f()  { run_single_op(b"\x50\x0f"); }
}
#[rustfmt::skip]
mod movb {
    use super::*;
    #[test] fn movb() { assert_eq!(0x23, run_single_op(b"\x61\x23").v[1]); }
}
#[rustfmt::skip]
mod addb {
    use super::*;
    #[test] fn addb()  { assert_eq!(0x02, run_single_op(b"\x71\x01").v[1]); }
    #[test] fn wraps() { assert_eq!(0x00, run_single_op(b"\x7f\xf1").v[0xf]); }
}
#[rustfmt::skip]
mod alu {
    use super::*;
    #[test] fn mov()  { assert_eq!(0x01, run_single_op(b"\x80\x10").v[0]); }
    #[test] fn or()   { assert_eq!(0x03, run_single_op(b"\x81\x21").v[1]); }
    #[test] fn and()  { assert_eq!(0x00, run_single_op(b"\x81\x22").v[1]); }
    #[test] fn xor()  { assert_eq!(0x03, run_single_op(b"\x81\x23").v[1]); }
    #[test] fn add()  { assert_eq!([0x03, 0x00], vx_vf(run_single_op(b"\x81\x24"), 1)); }
    #[test] fn sub()  { assert_eq!([0xff, 0x00], vx_vf(run_single_op(b"\x81\x25"), 1)); }
    #[test] fn shr()  { assert_eq!([0x01, 0x00], vx_vf(run_single_op(b"\x82\x16"), 2)); }
    #[test] fn bsub() { assert_eq!([0x01, 0x01], vx_vf(run_single_op(b"\x81\x27"), 1)); }
    #[test] fn shl()  { assert_eq!([0x02, 0x00], vx_vf(run_single_op(b"\x81\x2e"), 1)); }
    #[test] #[should_panic] fn u800f() { run_single_op(b"\x80\x0f"); }
}
#[rustfmt::skip]
mod sne {
    use super::*;
    #[test]                 fn skip()   { assert_eq!(0x204, run_single_op(b"\x90\x10").pc); }
    #[test]                 fn noskip() { assert_eq!(0x202, run_single_op(b"\x90\x00").pc); }
    #[test] #[should_panic] fn u900f()  { run_single_op(b"\x90\x0f"); }
}
#[rustfmt::skip]
mod movi {
    use super::*;
    #[test] fn movi() { assert_eq!(0x123, run_single_op(b"\xa1\x23").i); }
}
#[rustfmt::skip]
mod jmpr {
    use super::*;
    #[test] fn jmpr()   { assert_eq!(0x123, run_single_op(b"\xb1\x23").pc); }
    #[test] fn offset() { assert_eq!(0x305, run_ops(b"\x60\x05\xb3\x00").pc); }
}
#[rustfmt::skip]
mod rand {
    use super::*;
    #[test] fn masked() { assert_eq!(0x00, run_single_op(b"\xc5\x00").v[5]); }
}
#[rustfmt::skip]
mod draw {
    use super::*;
    #[test] fn draws()   { assert!(!run_single_op(b"\xd0\x05").screen.is_blank()); }
    #[test] fn erases()  { assert!(run_ops(b"\xd0\x05\xd0\x05").screen.is_blank()); }
    #[test] fn collide() { assert_eq!(0x01, run_ops(b"\xd0\x05\xd0\x05").v[0xf]); }
}
#[rustfmt::skip]
mod keys {
    use super::*;
    #[test]                 fn sek()   { assert_eq!(0x202, run_single_op(b"\xe0\x9e").pc); }
    #[test]                 fn snek()  { assert_eq!(0x204, run_single_op(b"\xe0\xa1").pc); }
    #[test] #[should_panic] fn ue00f() { run_single_op(b"\xe0\x0f"); }
}
#[rustfmt::skip]
mod io {
    use super::*;
    #[test] fn getdt() { assert_eq!(0x00, run_single_op(b"\xf1\x07").v[1]); }
    #[test] fn waitk() { assert_eq!(0x200, run_single_op(b"\xf1\x0a").pc); }
    #[test] fn setdt() { assert_eq!(0x05, run_single_op(b"\xf5\x15").delay); }
    #[test] fn movst() { assert_eq!(0x05, run_single_op(b"\xf5\x18").sound); }
    #[test] fn addi()  { assert_eq!(0x05, run_single_op(b"\xf5\x1e").i); }
    #[test] fn font()  { assert_eq!(0x19, run_single_op(b"\xf5\x29").i); }
    #[test] fn bcd()   { assert_eq!(&[0, 0, 5], run_single_op(b"\xf5\x33").mem.grab(0..3).unwrap()); }
    #[test] fn dmao()  { assert_eq!(&[0, 1, 2, 3], run_single_op(b"\xf3\x55").mem.grab(0..4).unwrap()); }
    #[test] fn dmai()  { assert_eq!(&[0xf0, 0x90, 0x90, 0x90], &run_single_op(b"\xf3\x65").v[..4]); }
    #[test] #[should_panic] fn uf00f() { run_single_op(b"\xf0\x0f"); }
}
