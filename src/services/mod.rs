pub mod dice;
pub mod distribution;
pub mod frequency;
pub mod simulator;
pub mod solver;
pub mod word_loader;
