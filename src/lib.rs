//! Letter distributions for Boggle-style dice, per language.
//!
//! A corpus is reduced to letter frequencies, the frequencies to an exact
//! number of faces per letter, and those faces to dice. Rounds of simulated
//! games then shake and roll the dice and count the dictionary words a
//! perfect player would find, which scores the distribution.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;
