use hack_asm::decoder::Decoder;
use hack_asm::disasm::fmt_instruction;
use hack_asm::instructions::{Comp, Dest, Instruction, Jump, Operand, COMP_TABLE, JUMPS};
use hack_asm::isa::hack::{encode_a, encode_c, HackDecoder};

const DESTS: [&str; 8] = ["", "M", "D", "MD", "A", "AM", "AD", "AMD"];
const JUMP_NAMES: [&str; 8] = ["", "JGT", "JEQ", "JGE", "JLT", "JNE", "JLE", "JMP"];

#[test]
fn every_c_combination_decodes_to_its_mnemonics() {
    let dec = HackDecoder::new();
    let mut seen = std::collections::HashSet::new();
    for c in COMP_TABLE {
        for d in DESTS {
            for j in JUMP_NAMES {
                let dest = Dest::from_mnemonic(d).unwrap();
                let comp = Comp::from_mnemonic(c.mnemonic).unwrap();
                let jump = Jump::from_mnemonic(j).unwrap();
                let word = encode_c(dest, comp, jump);
                assert!(seen.insert(word), "duplicate encoding for {d}={};{j}", c.mnemonic);
                assert_eq!(word.bits() >> 13, 0b111);

                let Some(Instruction::C { dest: d2, comp: c2, jump: j2 }) = dec.decode(word) else {
                    panic!("{word} did not decode to a C-instruction");
                };
                assert_eq!(d2.mnemonic(), d);
                assert_eq!(c2.mnemonic(), c.mnemonic);
                assert_eq!(j2.mnemonic(), j);
            }
        }
    }
    assert_eq!(seen.len(), 28 * 8 * 8);
}

#[test]
fn every_address_encodes_msb_first() {
    for v in 0..=0x7FFFu32 {
        let w = encode_a(v).unwrap();
        assert_eq!(w.bits() & 0x8000, 0);
        assert_eq!(u32::from(w.bits() & 0x7FFF), v);
        let s = w.to_string();
        assert_eq!(s.len(), 16);
        assert!(s.starts_with('0'));
        assert_eq!(u32::from_str_radix(&s[1..], 2).unwrap(), v);
    }
}

#[test]
fn m_family_sets_a_bit() {
    for c in COMP_TABLE {
        assert_eq!(c.comp.reads_memory(), c.mnemonic.contains('M'), "{}", c.mnemonic);
    }
}

#[test]
fn jumps_table_is_in_field_order() {
    for (bits, j) in JUMPS.iter().enumerate() {
        assert_eq!(j.bits() as usize, bits);
        assert_eq!(Jump::from_bits(bits as u16), *j);
    }
}

#[test]
fn formatted_instructions_parse_back() {
    for text in ["@0", "@sym", "M=D", "D;JGT", "AMD=D|M;JLE", "0;JMP", "A=!A"] {
        let i = Instruction::parse(text, 1).unwrap();
        assert_eq!(fmt_instruction(&i), text);
    }
    assert_eq!(
        Instruction::parse("@00012", 1).unwrap(),
        Instruction::A(Operand::Literal(12))
    );
}
