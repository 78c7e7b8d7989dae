//! Runs a small embedded program for a number of 60 Hz frames and prints the
//! framebuffer as text.
//!
//! ```text
//! cargo run -p chip8-core --example headless_frames -- 120
//! ```

use chip8_core::{CycleOutcome, Framebuffer, Machine, MachineConfig};
use log as _;
use proptest as _;
use rand as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

/// Draws "C8", waits one second on the delay timer, then parks.
const ROM: [u16; 16] = [
    0x00E0, // clear
    0x600C, // V0 = 0xC
    0xF029, // I = glyph(V0)
    0x6108, // V1 = 8
    0x6204, // V2 = 4
    0xD125, // draw at (V1, V2)
    0x6008, // V0 = 0x8
    0xF029, // I = glyph(V0)
    0x6110, // V1 = 16
    0xD125, // draw at (V1, V2)
    0x6A3C, // VA = 60
    0xFA15, // delay = VA
    0xFB07, // VB = delay
    0x3B00, // skip when VB == 0
    0x1218, // back to VB = delay
    0x121E, // park
];

fn render(fb: &Framebuffer) -> String {
    let mut out = String::with_capacity((fb.width() + 1) * fb.height());
    for row in fb.rows() {
        out.extend(row.iter().map(|&lit| if lit { '#' } else { '.' }));
        out.push('\n');
    }
    out
}

fn main() {
    let frames: u32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(90);

    let rom: Vec<u8> = ROM.iter().flat_map(|word| word.to_be_bytes()).collect();
    let mut machine = Machine::with_config(MachineConfig {
        rng_seed: Some(0),
        ..MachineConfig::default()
    });
    if let Err(err) = machine.load(&rom) {
        eprintln!("load failed: {err}");
        std::process::exit(1);
    }

    let mut executed = 0_u32;
    for _ in 0..frames {
        let frame = machine.run_frame();
        executed += frame.steps;
        if let Some(CycleOutcome::Fault { cause, pc }) = frame.last {
            eprintln!("{cause} at {pc:#05X}");
            break;
        }
    }

    print!("{}", render(machine.framebuffer()));
    println!(
        "frames={frames} steps={executed} pc={:#05X} delay={}",
        machine.registers().pc(),
        machine.timers().delay
    );
}
