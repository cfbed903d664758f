//! Generates a random blocksworld puzzle and writes it to a file.
//!
//! Accepts the historical single-dash flags `-ss` and `-sg` as well as their long forms.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use blocksworld_gen::puzzle_generator::{PuzzleGenerator, PuzzleGeneratorOptions};

#[derive(Parser, Debug)]
#[clap(name = "problem_gen")]
#[clap(about = "Create a Blocksworld puzzle with b blocks and write it to file f.")]
struct Opts {
  /// Number of blocks in the puzzle.
  #[clap(short = 'b', long = "blocks", default_value = "9",
      value_parser = clap::value_parser!(u64).range(1..))]
  blocks: u64,

  /// Name of the new puzzle file.
  #[clap(short = 'f', long = "file", default_value = "generatedProblem.txt", value_parser)]
  file: PathBuf,

  /// Number of stacks in the start puzzle (also -ss).
  #[clap(long = "start-stacks", value_parser = clap::value_parser!(u64).range(1..))]
  start_stacks: Option<u64>,

  /// Number of stacks in the goal state (also -sg).
  #[clap(long = "goal-stacks", value_parser = clap::value_parser!(u64).range(1..))]
  goal_stacks: Option<u64>,

  /// Seed for a reproducible puzzle.
  #[clap(long, value_parser)]
  seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
  env_logger::init();
  let opts = Opts::parse_from(normalize_args(std::env::args_os()));

  let mut rng = match opts.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  };

  let options = PuzzleGeneratorOptions {
    blocks: opts.blocks as usize,
    start_stacks: opts.start_stacks.map(|s| s as usize),
    goal_stacks: opts.goal_stacks.map(|s| s as usize),
  };
  let puzzle = PuzzleGenerator::generate(&mut rng, &options)
      .context("Failed to generate puzzle")?;

  puzzle.save(&opts.file)
      .with_context(|| format!("Failed to write {}", opts.file.display()))?;
  info!("Wrote {}-block puzzle to {}", puzzle.num_blocks(), opts.file.display());
  Ok(())
}

/// clap short flags are a single character, so rewrite `-ss`/`-sg` (and their `-ss=N` forms)
/// to the long flags before parsing.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
  args.into_iter()
      .map(|arg| {
        let rewritten = arg.to_str().and_then(|s| {
          let (flag, value) = match s.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (s, None),
          };
          let long = match flag {
            "-ss" => "--start-stacks",
            "-sg" => "--goal-stacks",
            _ => return None,
          };
          Some(match value {
            Some(value) => format!("{long}={value}"),
            None => long.to_string(),
          })
        });
        rewritten.map(OsString::from).unwrap_or(arg)
      })
      .collect()
}
