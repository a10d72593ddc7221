//!
//! JSON files: training examples in, trained transition reports out
//!
use crate::error::Result;
use crate::hmm::{HiddenMarkovModel, TrainingExample};
use crate::prob::{p, Prob};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

///
/// Parse a JSON array of examples
///
/// ```text
/// [{"init": {"S": 1.0}, "emission": {"M": 0.9}}, ...]
/// ```
///
pub fn read_training_examples<R: Read>(reader: R) -> Result<Vec<TrainingExample>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_training_examples_file<P: AsRef<Path>>(filename: P) -> Result<Vec<TrainingExample>> {
    let file = File::open(filename)?;
    read_training_examples(BufReader::new(file))
}

///
/// Summary of one enabled transition after training
///
#[derive(Debug, Clone, Serialize)]
pub struct TransitionReport {
    pub from: String,
    pub to: String,
    pub probability: f64,
    /// `Display` form of the log-space probability
    pub log_probability: Prob,
    pub trained: bool,
    pub training_steps: usize,
    /// expected count summed over every example ever trained
    pub total_count: f64,
}

pub fn transition_report(hmm: &HiddenMarkovModel) -> Vec<TransitionReport> {
    hmm.transitions()
        .map(|(_, source, target, t)| TransitionReport {
            from: hmm.state_name(source).to_string(),
            to: hmm.state_name(target).to_string(),
            probability: t.probability,
            log_probability: p(t.probability),
            trained: t.trained,
            training_steps: t.training_steps,
            total_count: t.total_count(),
        })
        .collect()
}

pub fn write_report<W: Write>(hmm: &HiddenMarkovModel, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &transition_report(hmm))?;
    Ok(())
}

pub fn write_report_file<P: AsRef<Path>>(hmm: &HiddenMarkovModel, filename: P) -> Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);
    write_report(hmm, &mut writer)?;
    writer.flush()?;
    Ok(())
}
