//! # Instruction Model Tests
//!
//! Verifies mnemonic parsing, operand-shape classes and literal parsing.

use mipsim_core::isa::instruction::parse_literal;
use mipsim_core::isa::{InstClass, Mnemonic};
use rstest::rstest;

#[rstest]
#[case("add", Mnemonic::Add, InstClass::ArithReg)]
#[case("sub", Mnemonic::Sub, InstClass::ArithReg)]
#[case("mul", Mnemonic::Mul, InstClass::ArithReg)]
#[case("slt", Mnemonic::Slt, InstClass::ArithReg)]
#[case("addi", Mnemonic::Addi, InstClass::ArithImm)]
#[case("beq", Mnemonic::Beq, InstClass::Branch)]
#[case("bne", Mnemonic::Bne, InstClass::Branch)]
#[case("j", Mnemonic::J, InstClass::Jump)]
#[case("lw", Mnemonic::Lw, InstClass::Memory)]
#[case("sw", Mnemonic::Sw, InstClass::Memory)]
fn mnemonic_parse_and_class(#[case] text: &str, #[case] m: Mnemonic, #[case] class: InstClass) {
    assert_eq!(text.parse::<Mnemonic>(), Ok(m));
    assert_eq!(m.class(), class);
    assert_eq!(m.to_string(), text);
}

#[test]
fn unknown_mnemonics_rejected() {
    for text in ["ADD", "addu", "jal", "nop", ""] {
        assert!(text.parse::<Mnemonic>().is_err(), "{text:?}");
    }
}

#[test]
fn operand_counts() {
    assert_eq!(InstClass::ArithReg.operand_count(), 3);
    assert_eq!(InstClass::ArithImm.operand_count(), 3);
    assert_eq!(InstClass::Branch.operand_count(), 3);
    assert_eq!(InstClass::Memory.operand_count(), 2);
    assert_eq!(InstClass::Jump.operand_count(), 1);
}

#[test]
fn only_beq_bne_are_conditional() {
    let conditional: Vec<_> = Mnemonic::ALL
        .into_iter()
        .filter(|m| m.is_conditional_branch())
        .collect();
    assert_eq!(conditional, vec![Mnemonic::Beq, Mnemonic::Bne]);
}

#[rstest]
#[case("0", Some(0))]
#[case("-5", Some(-5))]
#[case("+7", Some(7))]
#[case("2147483647", Some(i32::MAX))]
#[case("2147483648", None)]
#[case("0x10", None)]
#[case("12a", None)]
#[case("", None)]
fn literal_parsing(#[case] text: &str, #[case] expected: Option<i32>) {
    assert_eq!(parse_literal(text), expected);
}
