//! Text format shared with the planner:
//!
//! ```text
//! <blocks>
//! What each block is on:
//! <start[0]>
//! ...
//! Goal:
//! <goal[0]>
//! ...
//! ```

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::encoding::{Encoding, EncodingError};

pub const START_HEADER: &str = "What each block is on:";
pub const GOAL_HEADER: &str = "Goal:";

/// A start and goal encoding over the same number of blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
  start: Encoding,
  goal: Encoding,
}

#[derive(Error, Debug)]
pub enum ParseError {
  #[error("missing block count")]
  MissingBlockCount,

  #[error("invalid block count {0:?}")]
  InvalidBlockCount(String),

  #[error("expected {expected:?} on line {line}")]
  MissingHeader { expected: &'static str, line: usize },

  #[error("missing value for block {block} on line {line}")]
  MissingValue { block: usize, line: usize },

  #[error("invalid value {value:?} on line {line}")]
  InvalidValue { value: String, line: usize },

  #[error("unexpected content on line {0}")]
  TrailingContent(usize),

  #[error("{section} state is not a valid stacking: {source}")]
  Encoding { section: &'static str, source: EncodingError },

  #[error(transparent)]
  Io(#[from] io::Error),
}

impl Puzzle {
  pub fn new(start: Encoding, goal: Encoding) -> Result<Self, EncodingError> {
    if start.len() != goal.len() {
      return Err(EncodingError::LengthMismatch { expected: start.len(), actual: goal.len() });
    }
    Ok(Self { start, goal })
  }

  pub fn start(&self) -> &Encoding {
    &self.start
  }

  pub fn goal(&self) -> &Encoding {
    &self.goal
  }

  pub fn num_blocks(&self) -> usize {
    self.start.len()
  }

  pub fn write_to(&self, writer: &mut impl Write) -> io::Result<()> {
    write_encodings(writer, self.start.as_slice(), self.goal.as_slice())
  }

  /// Creates or truncates `path` and writes the puzzle into it.  A failure part way through
  /// can leave a partial file behind.
  pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    self.write_to(&mut writer)?;
    writer.flush()
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ParseError> {
    fs::read_to_string(path)?.parse()
  }

  /// Number of blocks whose start support already matches the goal.
  pub fn blocks_in_place(&self) -> usize {
    self.start.as_slice().iter()
        .zip(self.goal.as_slice())
        .filter(|(s, g)| s == g)
        .count()
  }
}

/// Writes a start and goal encoding in puzzle-file form.  Entries are written as given, so
/// this also works for hand-built encodings that were never validated.
pub fn write_encodings(writer: &mut impl Write, start: &[usize], goal: &[usize]) -> io::Result<()> {
  if start.len() != goal.len() {
    return Err(io::Error::new(
      io::ErrorKind::InvalidInput,
      format!("start has {} blocks but goal has {}", start.len(), goal.len())));
  }

  writeln!(writer, "{}", start.len())?;
  writeln!(writer, "{START_HEADER}")?;
  for value in start {
    writeln!(writer, "{value}")?;
  }
  writeln!(writer, "{GOAL_HEADER}")?;
  for value in goal {
    writeln!(writer, "{value}")?;
  }
  Ok(())
}

impl fmt::Display for Puzzle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut buf = Vec::new();
    self.write_to(&mut buf).map_err(|_| fmt::Error)?;
    f.write_str(&String::from_utf8_lossy(&buf))
  }
}

impl FromStr for Puzzle {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut lines = LineCursor::new(s);

    let (_, count) = lines.next().ok_or(ParseError::MissingBlockCount)?;
    let blocks: usize = count.parse()
        .map_err(|_| ParseError::InvalidBlockCount(count.to_string()))?;

    lines.expect_header(START_HEADER)?;
    let start = lines.read_values(blocks)?;
    lines.expect_header(GOAL_HEADER)?;
    let goal = lines.read_values(blocks)?;

    if let Some((line, _)) = lines.find(|(_, text)| !text.is_empty()) {
      return Err(ParseError::TrailingContent(line));
    }

    let start = Encoding::new(start)
        .map_err(|source| ParseError::Encoding { section: "start", source })?;
    let goal = Encoding::new(goal)
        .map_err(|source| ParseError::Encoding { section: "goal", source })?;
    Puzzle::new(start, goal).map_err(|source| ParseError::Encoding { section: "goal", source })
  }
}

/// Trimmed lines paired with their 1-based line number.
struct LineCursor<'a> {
  inner: std::iter::Enumerate<std::str::Lines<'a>>,
  line: usize,
}

impl<'a> LineCursor<'a> {
  fn new(s: &'a str) -> Self {
    Self { inner: s.lines().enumerate(), line: 0 }
  }

  fn expect_header(&mut self, expected: &'static str) -> Result<(), ParseError> {
    match self.next() {
      Some((_, text)) if text == expected => Ok(()),
      _ => Err(ParseError::MissingHeader { expected, line: self.line }),
    }
  }

  fn read_values(&mut self, blocks: usize) -> Result<Vec<usize>, ParseError> {
    // The count comes from the file, so grow as values actually show up.
    let mut values = Vec::new();
    for block in 0 .. blocks {
      let (line, text) = self.next()
          .ok_or(ParseError::MissingValue { block, line: self.line + 1 })?;
      let value = text.parse()
          .map_err(|_| ParseError::InvalidValue { value: text.to_string(), line })?;
      values.push(value);
    }
    Ok(values)
  }
}

impl<'a> Iterator for LineCursor<'a> {
  type Item = (usize, &'a str);

  fn next(&mut self) -> Option<Self::Item> {
    let (index, text) = self.inner.next()?;
    self.line = index + 1;
    Some((self.line, text.trim()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn two_block_puzzle() -> Puzzle {
    Puzzle::new(
      Encoding::new(vec![0, 1]).unwrap(),
      Encoding::new(vec![2, 0]).unwrap())
        .unwrap()
  }

  #[test]
  fn test_write_format() {
    let mut buf = Vec::new();
    two_block_puzzle().write_to(&mut buf).unwrap();
    assert_eq!(
      String::from_utf8(buf).unwrap(),
      "2\nWhat each block is on:\n0\n1\nGoal:\n2\n0\n");
  }

  #[test]
  fn test_write_raw_encodings() {
    let mut buf = Vec::new();
    write_encodings(&mut buf, &[0, 1], &[1, 0]).unwrap();
    assert_eq!(
      String::from_utf8(buf).unwrap(),
      "2\nWhat each block is on:\n0\n1\nGoal:\n1\n0\n");
  }

  #[test]
  fn test_write_mismatched_lengths() {
    let err = write_encodings(&mut Vec::new(), &[0, 1], &[0]).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
  }

  #[test]
  fn test_save_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("puzzle.txt");
    two_block_puzzle().save(&path).unwrap();
    assert_eq!(
      fs::read_to_string(&path).unwrap(),
      "2\nWhat each block is on:\n0\n1\nGoal:\n2\n0\n");
  }

  #[test]
  fn test_save_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("puzzle.txt");
    fs::write(&path, "stale contents that are much longer than the puzzle itself\n").unwrap();
    two_block_puzzle().save(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), two_block_puzzle().to_string());
  }

  #[test]
  fn test_save_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("puzzle.txt");
    let err = two_block_puzzle().save(&path).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
  }

  #[test]
  fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("puzzle.txt");
    two_block_puzzle().save(&path).unwrap();
    assert_eq!(Puzzle::load(&path).unwrap(), two_block_puzzle());
  }

  #[test]
  fn test_parse_tolerates_trailing_blank_lines_and_whitespace() {
    let puzzle: Puzzle = "2\r\nWhat each block is on:\r\n0\r\n 1 \r\nGoal:\r\n2\r\n0\r\n\r\n\n"
        .parse()
        .unwrap();
    assert_eq!(puzzle, two_block_puzzle());
  }

  #[test]
  fn test_parse_errors() {
    assert!(matches!("".parse::<Puzzle>(), Err(ParseError::MissingBlockCount)));
    assert!(matches!("two\n".parse::<Puzzle>(), Err(ParseError::InvalidBlockCount(_))));
    assert!(matches!(
      "1\nGoal:\n0\n".parse::<Puzzle>(),
      Err(ParseError::MissingHeader { expected: START_HEADER, line: 2 })));
    assert!(matches!(
      "2\nWhat each block is on:\n0\n".parse::<Puzzle>(),
      Err(ParseError::MissingValue { block: 1, line: 4 })));
    assert!(matches!(
      "1\nWhat each block is on:\nx\nGoal:\n0\n".parse::<Puzzle>(),
      Err(ParseError::InvalidValue { line: 3, .. })));
    assert!(matches!(
      "1\nWhat each block is on:\n0\n0\nGoal:\n0\n".parse::<Puzzle>(),
      Err(ParseError::MissingHeader { expected: GOAL_HEADER, line: 4 })));
    assert!(matches!(
      "1\nWhat each block is on:\n0\nGoal:\n0\n\n7\n".parse::<Puzzle>(),
      Err(ParseError::TrailingContent(7))));
  }

  #[test]
  fn test_parse_rejects_impossible_stacking() {
    let result = "2\nWhat each block is on:\n2\n1\nGoal:\n0\n0\n".parse::<Puzzle>();
    assert!(matches!(
      result,
      Err(ParseError::Encoding { section: "start", source: EncodingError::Cycle(0) })));
  }

  #[test]
  fn test_blocks_in_place() {
    let puzzle = Puzzle::new(
      Encoding::new(vec![0, 1, 0]).unwrap(),
      Encoding::new(vec![0, 0, 1]).unwrap())
        .unwrap();
    assert_eq!(puzzle.blocks_in_place(), 1);
  }

  #[test]
  fn test_new_rejects_mismatched_lengths() {
    let result = Puzzle::new(
      Encoding::new(vec![0, 1, 0]).unwrap(),
      Encoding::new(vec![0, 0]).unwrap());
    assert_eq!(result, Err(EncodingError::LengthMismatch { expected: 3, actual: 2 }));
  }

  #[test]
  fn test_parse_huge_block_count() {
    let result = "18446744073709551615\nWhat each block is on:\n0\n".parse::<Puzzle>();
    assert!(matches!(result, Err(ParseError::MissingValue { block: 1, line: 4 })));

    let result = "1000000000000\nWhat each block is on:\n0\nGoal:\n0\n".parse::<Puzzle>();
    assert!(matches!(result, Err(ParseError::InvalidValue { line: 4, .. })));
  }
}
