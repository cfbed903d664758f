pub mod encoding;
pub mod puzzle;
pub mod puzzle_generator;
pub mod stack_partitioner;
