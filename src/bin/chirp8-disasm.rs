// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Disassembles a Chip-8 ROM, one word per line

use chirp8::{error::Result, *};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{fs::read, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Load a ROM to disassemble", free, required)]
    pub file: PathBuf,
    #[options(help = "Start disassembling at offset...")]
    pub offset: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let options = Arguments::parse_args_default_or_exit();
    let contents = read(&options.file)?;
    let disassembler = Dis::default();
    let words = contents.get(options.offset..).unwrap_or_default();
    let mut chunks = words.chunks_exact(2);
    for (addr, insn) in (&mut chunks).enumerate() {
        let insn = u16::from_be_bytes([insn[0], insn[1]]);
        println!(
            "{:03x}: {} {:04x}",
            2 * addr + ENTRY_POINT as usize + options.offset,
            disassembler.once(insn),
            insn.bright_black(),
        );
    }
    if let [odd] = chunks.remainder() {
        println!(
            "{:03x}: {} {:02x}",
            ENTRY_POINT as usize + options.offset + words.len() - 1,
            "trailing byte".bright_black(),
            odd.bright_black(),
        );
    }
    Ok(())
}
