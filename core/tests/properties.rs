use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, STACK_DEPTH};
use chip8_core::Chip8;
use proptest::prelude::*;

/// A machine running `program` from 0x200 with a fixed random seed
fn machine(program: &[u16]) -> Chip8 {
    let rom: Vec<u8> = program.iter().flat_map(|op| op.to_be_bytes()).collect();
    let mut chip8 = Chip8::with_seed(0);
    chip8.load_bytes(&rom).unwrap();
    chip8
}

fn run(chip8: &mut Chip8, cycles: usize) {
    for _ in 0..cycles {
        chip8.cycle();
    }
}

fn lit_pixels(chip8: &Chip8) -> usize {
    chip8.frame_buffer().iter().flatten().filter(|&&p| p == 1).count()
}

proptest! {
    #[test]
    fn load_immediate_touches_only_its_register(r in 0u16..16, k in any::<u8>()) {
        let mut chip8 = machine(&[0x6000 | r << 8 | u16::from(k)]);
        chip8.cycle();
        for (index, &value) in chip8.state().v.iter().enumerate() {
            let expected = if index == usize::from(r) { k } else { 0 };
            prop_assert_eq!(value, expected);
        }
    }

    #[test]
    fn register_add_wraps_and_flags_carry(x in 0u16..15, y in 0u16..15, a in any::<u8>(), b in any::<u8>()) {
        prop_assume!(x != y);
        let mut chip8 = machine(&[
            0x6000 | x << 8 | u16::from(a),
            0x6000 | y << 8 | u16::from(b),
            0x8004 | x << 8 | y << 4,
        ]);
        run(&mut chip8, 3);
        let sum = u16::from(a) + u16::from(b);
        prop_assert_eq!(chip8.state().v[usize::from(x)], (sum % 256) as u8);
        prop_assert_eq!(chip8.state().v[0xF], u8::from(sum > 255));
    }

    #[test]
    fn register_sub_flags_not_borrow(a in any::<u8>(), b in any::<u8>()) {
        let mut chip8 = machine(&[0x6000 | u16::from(a), 0x6100 | u16::from(b), 0x8015]);
        run(&mut chip8, 3);
        prop_assert_eq!(chip8.state().v[0x0], a.wrapping_sub(b));
        prop_assert_eq!(chip8.state().v[0xF], u8::from(a >= b));
    }

    #[test]
    fn shifts_flag_the_bit_shifted_out(a in any::<u8>()) {
        let mut chip8 = machine(&[0x6000 | u16::from(a), 0x8006]);
        run(&mut chip8, 2);
        prop_assert_eq!(chip8.state().v[0x0], a >> 1);
        prop_assert_eq!(chip8.state().v[0xF], a & 0x1);

        let mut chip8 = machine(&[0x6000 | u16::from(a), 0x800E]);
        run(&mut chip8, 2);
        prop_assert_eq!(chip8.state().v[0x0], a << 1);
        prop_assert_eq!(chip8.state().v[0xF], a >> 7);
    }

    #[test]
    fn bcd_digits_recompose(a in any::<u8>()) {
        // V0 = a; I = 0x300; bcd V0; V2..V0 = mem[I..]
        let mut chip8 = machine(&[0x6000 | u16::from(a), 0xA300, 0xF033, 0xF265]);
        run(&mut chip8, 4);
        let v = chip8.state().v;
        prop_assert!(v[0] <= 2 && v[1] <= 9 && v[2] <= 9);
        prop_assert_eq!(u16::from(v[0]) * 100 + u16::from(v[1]) * 10 + u16::from(v[2]), u16::from(a));
    }

    #[test]
    fn drawing_twice_restores_the_display(x in any::<u8>(), y in any::<u8>(), digit in 0u8..16) {
        // V0 = x; V1 = y; V2 = digit; I = glyph(V2); draw; draw
        let mut chip8 = machine(&[
            0x6000 | u16::from(x),
            0x6100 | u16::from(y),
            0x6200 | u16::from(digit),
            0xF229,
            0xD015,
            0xD015,
        ]);
        run(&mut chip8, 5);
        prop_assert!(lit_pixels(&chip8) > 0);
        prop_assert_eq!(chip8.state().v[0xF], 0);
        chip8.cycle();
        prop_assert_eq!(lit_pixels(&chip8), 0);
        prop_assert_eq!(chip8.state().v[0xF], 1);
    }

    #[test]
    fn cls_blanks_any_display(x in any::<u8>(), y in any::<u8>()) {
        // draw 15 rows of the font then clear
        let mut chip8 = machine(&[
            0xA050,
            0x6000 | u16::from(x),
            0x6100 | u16::from(y),
            0xD01F,
            0x00E0,
        ]);
        run(&mut chip8, 4);
        prop_assert!(lit_pixels(&chip8) > 0);
        chip8.cycle();
        prop_assert_eq!(lit_pixels(&chip8), 0);
    }

    #[test]
    fn random_bytes_respect_the_mask(mask in any::<u8>()) {
        let mut chip8 = machine(&[0xC000 | u16::from(mask)]);
        chip8.cycle();
        prop_assert_eq!(chip8.state().v[0x0] & !mask, 0);
    }
}

#[test]
fn load_immediate_scenario() {
    let mut chip8 = machine(&[0x6A02]);
    chip8.cycle();
    assert_eq!(chip8.state().v[0xA], 0x02);
    assert_eq!(chip8.state().pc, 0x202);
}

#[test]
fn full_display_is_cleared_by_one_cls() {
    // tile the display with solid 8x8 sprites, then cls
    let mut program = vec![0xA300];
    for tile in 0..(DISPLAY_WIDTH / 8) * (DISPLAY_HEIGHT / 8) {
        let (x, y) = ((tile % 8) * 8, (tile / 8) * 8);
        program.extend([0x6000 | x as u16, 0x6100 | y as u16, 0xD018]);
    }
    program.push(0x00E0);
    let mut rom: Vec<u8> = program.iter().flat_map(|op| op.to_be_bytes()).collect();
    rom.resize(0x100, 0);
    rom.extend([0xFF; 8]);
    let mut chip8 = Chip8::with_seed(0);
    chip8.load_bytes(&rom).unwrap();

    run(&mut chip8, program.len() - 1);
    assert_eq!(lit_pixels(&chip8), DISPLAY_WIDTH * DISPLAY_HEIGHT);
    chip8.cycle();
    assert_eq!(lit_pixels(&chip8), 0);
}

#[test]
fn add_with_carry_scenario() {
    let mut chip8 = machine(&[0x60FF, 0x6101, 0x8014]);
    run(&mut chip8, 3);
    assert_eq!(chip8.state().v[0x0], 0x00);
    assert_eq!(chip8.state().v[0xF], 0x01);
}

#[test]
fn key_wait_scenario() {
    let mut chip8 = machine(&[0xF50A]);
    chip8.cycle();
    assert_eq!(chip8.state().pc, 0x200);
    assert_eq!(chip8.awaiting_key(), Some(0x5));
    chip8.cycle();
    assert_eq!(chip8.state().pc, 0x200);
    chip8.key_press(0x7);
    chip8.cycle();
    assert_eq!(chip8.state().v[0x5], 0x7);
    assert_eq!(chip8.state().pc, 0x202);
}

#[test]
fn call_return_round_trip() {
    // 0x200: call 0x204; 0x202: jump 0x202; 0x204: ret
    let mut chip8 = machine(&[0x2204, 0x1202, 0x00EE]);
    chip8.cycle();
    assert_eq!(chip8.state().stack.depth(), 1);
    chip8.cycle();
    assert_eq!(chip8.state().pc, 0x202);
    assert_eq!(chip8.state().stack.depth(), 0);
}

#[test]
fn seventeenth_nested_call_restarts_from_zero() {
    // each subroutine calls the next one two bytes further on
    let program: Vec<u16> = (0..=STACK_DEPTH as u16).map(|n| 0x2202 + n * 2).collect();
    let mut chip8 = machine(&program);
    for depth in 1..=STACK_DEPTH {
        chip8.cycle();
        assert_eq!(chip8.state().stack.depth(), depth);
    }
    chip8.cycle();
    assert_eq!(chip8.state().stack.depth(), STACK_DEPTH);
    assert_eq!(chip8.state().pc, 0x000);
}
