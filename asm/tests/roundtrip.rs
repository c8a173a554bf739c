use chip8_asm::{assemble, assemble_line, disassemble, listing};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_disassembly_assembles_back_to_the_same_word(word in any::<u16>()) {
        if let Ok(text) = disassemble(word) {
            prop_assert_eq!(assemble_line(&text).unwrap(), word);
        }
    }

    #[test]
    fn test_listings_reassemble_to_the_same_rom(words in proptest::collection::vec(any::<u16>(), 0..128)) {
        let rom: Vec<u8> = words.iter().flat_map(|word| word.to_be_bytes()).collect();
        let source: Vec<String> = listing(&rom, 0x200).into_iter().map(|line| line.text).collect();
        prop_assert_eq!(assemble(&source.join("\n")).unwrap(), rom);
    }
}

#[test]
fn test_counts_decodable_words() {
    let decodable = (0..=u16::MAX).filter(|&word| disassemble(word).is_ok()).count();
    assert_eq!(decodable, 43_698);
}

#[test]
fn test_assembly_normalizes_through_disassembly() {
    let cases = [
        ("  ld   va,0x2b ; c", "LD VA, #2B"),
        ("shr v1, v0", "SHR V1"),
        ("shl v1, v2", "SHL V1, V2"),
        ("drw v0 , v1 , 5", "DRW V0, V1, #5"),
        ("jp $228", "JP #228"),
        ("jp v0, 291", "JP V0, #123"),
        ("ld [i], v12", "LD [I], VC"),
        ("dw #00e0", "CLS"),
    ];
    for (source, canonical) in cases {
        let word = assemble_line(source).unwrap();
        assert_eq!(disassemble(word).unwrap(), canonical, "{}", source);
    }
}

#[test]
fn test_programs_normalize_through_a_listing() {
    let source = "start: ld v0, 0\nloop: add v0, 1\nse v0, #0A\njp loop\njp start";
    let rom = assemble(source).unwrap();
    let text: Vec<String> = listing(&rom, 0x200).into_iter().map(|line| line.text).collect();
    assert_eq!(
        text,
        ["LD V0, #00", "ADD V0, #01", "SE V0, #0A", "JP #202", "JP #200"]
    );
    assert_eq!(assemble(&text.join("\n")).unwrap(), rom);
}
