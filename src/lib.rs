//!
//! fraghmm: trainable Hidden Markov Models over directed acyclic state graphs
//!
pub mod common;
pub mod error;
pub mod hmm;
pub mod io;
pub mod prelude;
pub mod prob;

#[macro_use]
extern crate approx;
