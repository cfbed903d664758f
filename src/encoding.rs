//! Flat "what is each block on" representation of a [`Configuration`].
//!
//! Entry `b` holds [`TABLE`] when block `b` sits on the table, otherwise `k + 1` where `k` is
//! the block directly beneath it.  Zero is reserved for the table, hence the offset.

use thiserror::Error;

use crate::stack_partitioner::Configuration;

/// Encoded value meaning "on the table".
pub const TABLE: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding(Vec<usize>);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodingError {
  #[error("block {block} is on {value}, but there are only {blocks} blocks")]
  OutOfRange { block: usize, value: usize, blocks: usize },

  #[error("blocks {first} and {second} are both on block {below}")]
  DoubleStacked { below: usize, first: usize, second: usize },

  #[error("block {0} never reaches the table")]
  Cycle(usize),

  #[error("expected {expected} entries, got {actual}")]
  LengthMismatch { expected: usize, actual: usize },

  #[error("configuration does not place block {0} exactly once")]
  IncompleteConfiguration(usize),
}

impl Encoding {
  /// Wraps raw entries after checking they describe a physically possible stacking.
  pub fn new(entries: Vec<usize>) -> Result<Self, EncodingError> {
    let encoding = Self(entries);
    encoding.validate()?;
    Ok(encoding)
  }

  /// Flattens `config` over `blocks` blocks.
  pub fn from_configuration(config: &Configuration, blocks: usize) -> Result<Self, EncodingError> {
    let mut entries: Vec<Option<usize>> = vec![None; blocks];
    for stack in &config.stacks {
      for (j, &block) in stack.iter().enumerate() {
        let slot = entries.get_mut(block).ok_or(EncodingError::OutOfRange {
          block,
          value: block,
          blocks,
        })?;
        if slot.is_some() {
          return Err(EncodingError::IncompleteConfiguration(block));
        }
        *slot = Some(if j == 0 { TABLE } else { stack[j - 1] + 1 });
      }
    }

    let entries = entries.into_iter()
        .enumerate()
        .map(|(block, entry)| entry.ok_or(EncodingError::IncompleteConfiguration(block)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Self(entries))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn as_slice(&self) -> &[usize] {
    &self.0
  }

  /// The block `block` rests on, or `None` for the table.
  ///
  /// # Panics
  ///
  /// Panics if `block` is not below [`Encoding::len`].
  pub fn below(&self, block: usize) -> Option<usize> {
    match self.0[block] {
      TABLE => None,
      value => Some(value - 1),
    }
  }

  /// For every block, the block directly on top of it and the block directly beneath it.
  pub fn adjacencies(&self) -> (Vec<Option<usize>>, Vec<Option<usize>>) {
    let mut above = vec![None; self.len()];
    let mut below = vec![None; self.len()];
    for block in 0 .. self.len() {
      if let Some(under) = self.below(block) {
        below[block] = Some(under);
        above[under] = Some(block);
      }
    }
    (above, below)
  }

  pub fn validate(&self) -> Result<(), EncodingError> {
    self.above_checked().and_then(|above| self.check_reachable(&above))
  }

  /// Inverse of [`Encoding::from_configuration`].  Stacks come back ordered by their bottom
  /// block; empty stacks cannot be recovered.
  pub fn to_configuration(&self) -> Result<Configuration, EncodingError> {
    let above = self.above_checked()?;
    self.check_reachable(&above)?;

    let mut stacks = Vec::new();
    for bottom in (0 .. self.len()).filter(|&b| self.0[b] == TABLE) {
      let mut stack = vec![bottom];
      let mut top = bottom;
      while let Some(next) = above[top] {
        stack.push(next);
        top = next;
      }
      stacks.push(stack);
    }
    Ok(Configuration::new(stacks))
  }

  fn above_checked(&self) -> Result<Vec<Option<usize>>, EncodingError> {
    let blocks = self.len();
    let mut above: Vec<Option<usize>> = vec![None; blocks];
    for (block, &value) in self.0.iter().enumerate() {
      if value == TABLE {
        continue;
      }
      if value > blocks {
        return Err(EncodingError::OutOfRange { block, value, blocks });
      }
      let below = value - 1;
      if let Some(first) = above[below] {
        return Err(EncodingError::DoubleStacked { below, first, second: block });
      }
      above[below] = Some(block);
    }
    Ok(above)
  }

  /// Every block must be reachable by climbing up from some table block, otherwise the
  /// remaining ones form a loop.
  fn check_reachable(&self, above: &[Option<usize>]) -> Result<(), EncodingError> {
    let mut reached = vec![false; self.len()];
    for bottom in (0 .. self.len()).filter(|&b| self.0[b] == TABLE) {
      let mut current = Some(bottom);
      while let Some(block) = current {
        reached[block] = true;
        current = above[block];
      }
    }
    match reached.iter().position(|r| !r) {
      Some(block) => Err(EncodingError::Cycle(block)),
      None => Ok(()),
    }
  }
}
