use derive_new::new;
use log::debug;
use rand::Rng;
use thiserror::Error;

/// A complete assignment of blocks to ordered stacks, each listed bottom to top.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
  pub stacks: Vec<Vec<usize>>,
}

impl Configuration {
  pub fn num_blocks(&self) -> usize {
    self.stacks.iter().map(|s| s.len()).sum()
  }

  /// Non-empty stacks sorted by their bottom block, for comparing configurations that differ
  /// only in stack order or empty stacks.
  pub fn canonical(&self) -> Configuration {
    let mut stacks: Vec<Vec<usize>> = self.stacks.iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect();
    stacks.sort_by_key(|s| s[0]);
    Configuration { stacks }
  }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PartitionError {
  #[error("a puzzle needs at least one block")]
  NoBlocks,

  #[error("cannot place {0} blocks onto zero stacks")]
  NoStacks(usize),
}

/// Randomly distributes blocks `0..blocks` across `stacks` ordered stacks.
///
/// Each round picks a stack uniformly, then pulls a uniformly chosen block out of the
/// unplaced pool and puts it on top of that stack.  Assignment and ordering fall out of the
/// same draws, which means the result is *not* uniform over all possible configurations.
/// Puzzle statistics depend on this exact draw order so leave it alone.
///
/// Stack counts above `blocks` are accepted and simply leave some stacks empty.
pub fn partition(
    rng: &mut impl Rng,
    blocks: usize,
    stacks: usize,
) -> Result<Configuration, PartitionError> {
  if blocks == 0 {
    return Err(PartitionError::NoBlocks);
  }
  if stacks == 0 {
    return Err(PartitionError::NoStacks(blocks));
  }

  let mut pool: Vec<usize> = (0 .. blocks).collect();
  let mut grid: Vec<Vec<usize>> = vec![Vec::new(); stacks];
  for _ in 0 .. blocks {
    let stack_index = rng.gen_range(0 .. stacks);
    let block = pool.remove(rng.gen_range(0 .. pool.len()));
    grid[stack_index].push(block);
  }

  Ok(Configuration::new(grid))
}

/// Picks a stack count for a side whose count was not given: uniform over
/// `1 .. floor(sqrt(blocks))`, upper bound exclusive.
///
/// For `blocks < 4` that range is empty, in which case a single stack is used.
pub fn random_stack_count(rng: &mut impl Rng, blocks: usize) -> usize {
  let upper = integer_sqrt(blocks);
  if upper <= 1 {
    debug!("No stack range for {blocks} blocks, using a single stack");
    return 1;
  }
  rng.gen_range(1 .. upper)
}

fn integer_sqrt(n: usize) -> usize {
  let mut root = (n as f64).sqrt() as usize;
  // Float rounding can be off by one for large n.
  while root * root > n {
    root -= 1;
  }
  while (root + 1) * (root + 1) <= n {
    root += 1;
  }
  root
}
