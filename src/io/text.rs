//!
//! Line-oriented text format of a model
//!
//! ```text
//! State <name> [false]                      # "false": emitting state
//! Transition <from> <to> <p> [disabled]
//! Synonym <syn_from> <syn_to> <from> <to>   # syn_from -> syn_to is tied to from -> to
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. States must be
//! declared before the transitions and synonyms that mention them.
//!
use crate::error::{HMMError, Result};
use crate::hmm::{HMMState, HiddenMarkovModel};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

fn check_name(name: &str) -> Result<&str> {
    if name.is_empty() || name.contains(char::is_whitespace) {
        Err(HMMError::UnwritableName(name.to_string()))
    } else {
        Ok(name)
    }
}

///
/// Write states, every transition record (disabled ones marked) and the
/// synonym declarations.
///
pub fn write_model<W: Write>(hmm: &HiddenMarkovModel, mut writer: W) -> Result<()> {
    for (_, state) in hmm.states() {
        let name = check_name(state.name())?;
        if state.is_hidden() {
            writeln!(writer, "State {}", name)?;
        } else {
            writeln!(writer, "State {} false", name)?;
        }
    }
    for (_, source, target, t) in hmm.all_transitions() {
        write!(
            writer,
            "Transition {} {} {}",
            hmm.state_name(source),
            hmm.state_name(target),
            t.probability
        )?;
        if t.enabled {
            writeln!(writer)?;
        } else {
            writeln!(writer, " disabled")?;
        }
    }
    for (s1, s2, c1, c2) in hmm.synonym_transitions() {
        writeln!(writer, "Synonym {} {} {} {}", s1, s2, c1, c2)?;
    }
    Ok(())
}

pub fn write_model_file<P: AsRef<Path>>(hmm: &HiddenMarkovModel, filename: P) -> Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);
    write_model(hmm, &mut writer)?;
    writer.flush()?;
    Ok(())
}

///
/// Parse a model. Errors of a line are reported with its (1-origin) number.
///
pub fn read_model<R: BufRead>(reader: R) -> Result<HiddenMarkovModel> {
    let mut hmm = HiddenMarkovModel::new();
    let mut n_lines = 0;
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        n_lines = i + 1;
        parse_line(&mut hmm, line.trim()).map_err(|e| match e {
            HMMError::Io(_) => e,
            HMMError::Parse { message, .. } => HMMError::parse(n_lines, message),
            e => HMMError::parse(n_lines, e.to_string()),
        })?;
    }
    hmm.build_synonyms()
        .map_err(|e| HMMError::parse(n_lines, e.to_string()))?;
    Ok(hmm)
}

pub fn read_model_file<P: AsRef<Path>>(filename: P) -> Result<HiddenMarkovModel> {
    let file = File::open(filename)?;
    read_model(BufReader::new(file))
}

fn parse_line(hmm: &mut HiddenMarkovModel, line: &str) -> Result<()> {
    if line.is_empty() || line.starts_with('#') {
        return Ok(());
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        ["State", name] => {
            hmm.add_new_state(HMMState::new(*name))?;
        }
        ["State", name, "false"] => {
            hmm.add_new_state(HMMState::emitting(*name))?;
        }
        ["State", name, "true"] => {
            hmm.add_new_state(HMMState::new(*name))?;
        }
        ["Transition", from, to, prob] => {
            hmm.set_transition_probability(from, to, parse_prob(prob)?)?;
        }
        ["Transition", from, to, prob, "disabled"] => {
            hmm.set_transition_probability(from, to, parse_prob(prob)?)?;
            hmm.disable_transition(from, to)?;
        }
        ["Synonym", s1, s2, c1, c2] => {
            hmm.add_synonym_transition(c1, c2, s1, s2)?;
        }
        _ => {
            return Err(HMMError::parse(0, format!("malformed line '{}'", line)));
        }
    }
    Ok(())
}

fn parse_prob(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .map_err(|e| HMMError::parse(0, format!("invalid probability '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::mocks::{mock_branching, mock_fragmentation};

    fn round_trip(hmm: &HiddenMarkovModel) -> (String, HiddenMarkovModel) {
        let mut buf: Vec<u8> = Vec::new();
        write_model(hmm, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let read = read_model(text.as_bytes()).unwrap();
        (text, read)
    }

    #[test]
    fn text_format_lines() {
        let mut hmm = mock_branching();
        hmm.disable_transition("B", "E").unwrap();
        let (text, read) = round_trip(&hmm);
        assert_eq!(
            text,
            "State S\nState A false\nState B false\nState E\n\
             Transition S A 0.6\nTransition S B 0.4\nTransition A E 1\n\
             Transition B E 1 disabled\n"
        );
        assert!(!read.is_transition_enabled("B", "E").unwrap());
        assert_eq!(read.get_transition("B", "E").unwrap().probability, 1.0);
        assert!(!read.get_state("A").unwrap().is_hidden());
    }
    #[test]
    fn text_format_synonyms() {
        let hmm = mock_fragmentation();
        let (text, read) = round_trip(&hmm);
        assert!(text.contains("Synonym B M2 A M1\n"));
        let synonyms: Vec<_> = read.synonym_transitions().collect();
        assert_eq!(synonyms.len(), 2);
        assert!(synonyms.contains(&("B", "N2", "A", "N1")));
    }
    #[test]
    fn text_format_errors_have_line_numbers() {
        let text = "State S\n\n# comment\nTransition S X 0.5\n";
        assert!(matches!(
            read_model(text.as_bytes()),
            Err(HMMError::Parse { line: 4, .. })
        ));
        let text = "State S\nState M false\nTransition S M abc\n";
        assert!(matches!(
            read_model(text.as_bytes()),
            Err(HMMError::Parse { line: 3, .. })
        ));
        let text = "State S\nStat M\n";
        assert!(matches!(
            read_model(text.as_bytes()),
            Err(HMMError::Parse { line: 2, .. })
        ));
    }
    #[test]
    fn unwritable_names_are_rejected() {
        let mut hmm = HiddenMarkovModel::new();
        hmm.add_new_state(HMMState::new("a b")).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        assert!(matches!(
            write_model(&hmm, &mut buf),
            Err(HMMError::UnwritableName(_))
        ));
    }
}
