//! # General-Purpose Register Tests

use mipsim_core::core::arch::gpr::Gpr;

#[test]
fn zero_register_is_hardwired() {
    let mut regs = Gpr::new();
    regs.write(0, 99);
    assert_eq!(regs.read(0), 0);
}

#[test]
fn write_then_read() {
    let mut regs = Gpr::new();
    for i in 1..32 {
        regs.write(i, -(i as i32));
    }
    for i in 1..32 {
        assert_eq!(regs.read(i), -(i as i32));
    }
    assert_eq!(regs.snapshot()[31], -31);
}

#[test]
fn dump_names_registers() {
    let mut regs = Gpr::new();
    regs.write(8, 5);
    let dump = regs.dump();
    assert!(dump.contains("t0"), "{dump}");
    assert!(dump.contains('5'), "{dump}");
}
