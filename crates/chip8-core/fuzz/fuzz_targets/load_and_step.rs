#![no_main]

use chip8_core::{Decoder, Machine, MachineConfig, FONT, FONT_START, STACK_CAPACITY};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let keys = u16::from_be_bytes([data[0], data[1]]);
    let steps = usize::from(data[2]) * 4;
    let program = &data[3..];

    for pair in program.chunks_exact(2) {
        let _ = Decoder::decode(u16::from_be_bytes([pair[0], pair[1]]));
    }

    let mut machine = Machine::with_config(MachineConfig {
        rng_seed: Some(u64::from(keys)),
        ..MachineConfig::default()
    });
    if machine.load(program).is_err() {
        return;
    }
    machine.set_keypad_mask(keys);

    for step in 0..steps {
        let _ = machine.step();
        if step % 12 == 0 {
            machine.tick_timers();
        }
    }

    assert!(machine.stack().depth() <= STACK_CAPACITY);
    let font_start = usize::from(FONT_START);
    assert_eq!(
        &machine.memory().as_bytes()[font_start..font_start + FONT.len()],
        &FONT[..]
    );
});
