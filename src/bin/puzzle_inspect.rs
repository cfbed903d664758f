use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::debug;

use blocksworld_gen::encoding::Encoding;
use blocksworld_gen::puzzle::Puzzle;

/// Reads a puzzle file back and prints both configurations as stacks, bottom to top.
#[derive(Parser, Debug)]
#[clap(name = "puzzle_inspect")]
struct Opts {
    #[clap(value_parser)]
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();

    let puzzle = Puzzle::load(&opts.file)
        .with_context(|| format!("Failed to read {}", opts.file.display()))?;
    debug!("Loaded {} blocks from {}", puzzle.num_blocks(), opts.file.display());

    println!("{} blocks", puzzle.num_blocks());
    print_side("Start", puzzle.start())?;
    print_side("Goal", puzzle.goal())?;
    println!("{} blocks already on their goal support", puzzle.blocks_in_place());
    Ok(())
}

fn print_side(label: &str, encoding: &Encoding) -> anyhow::Result<()> {
    let config = encoding.to_configuration()?;
    println!("{label} ({} stacks):", config.stacks.len());
    for stack in &config.stacks {
        let blocks: Vec<String> = stack.iter().map(|b| b.to_string()).collect();
        println!("  {}", blocks.join(" "));
    }
    Ok(())
}
