use log::debug;
use rand::Rng;
use thiserror::Error;

use crate::encoding::{Encoding, EncodingError};
use crate::puzzle::Puzzle;
use crate::stack_partitioner::{partition, random_stack_count, PartitionError};

pub const DEFAULT_BLOCKS: usize = 9;

pub struct PuzzleGeneratorOptions {
  pub blocks: usize,

  /// Stack count for the start configuration, randomised when `None`.
  pub start_stacks: Option<usize>,

  /// Stack count for the goal configuration, randomised when `None`.
  pub goal_stacks: Option<usize>,
}

impl Default for PuzzleGeneratorOptions {
  fn default() -> Self {
    Self { blocks: DEFAULT_BLOCKS, start_stacks: None, goal_stacks: None }
  }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeneratorError {
  #[error(transparent)]
  Partition(#[from] PartitionError),

  #[error(transparent)]
  Encoding(#[from] EncodingError),
}

pub struct PuzzleGenerator;

impl PuzzleGenerator {
  /// Draws a start and then a goal configuration from `rng`, in that order, so a seeded
  /// source always produces the same puzzle.
  pub fn generate(
      rng: &mut impl Rng,
      options: &PuzzleGeneratorOptions,
  ) -> Result<Puzzle, GeneratorError> {
    let start = Self::generate_side(rng, options.blocks, options.start_stacks, "start")?;
    let goal = Self::generate_side(rng, options.blocks, options.goal_stacks, "goal")?;
    Ok(Puzzle::new(start, goal)?)
  }

  fn generate_side(
      rng: &mut impl Rng,
      blocks: usize,
      stacks: Option<usize>,
      side: &str,
  ) -> Result<Encoding, GeneratorError> {
    let stacks = match stacks {
      Some(stacks) => stacks,
      None => random_stack_count(rng, blocks),
    };
    debug!("Generating {side} configuration: {blocks} blocks on {stacks} stacks");

    let config = partition(rng, blocks, stacks)?;
    Ok(Encoding::from_configuration(&config, blocks)?)
  }
}
