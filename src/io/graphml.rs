//!
//! GraphML writer
//!
//! Nodes are states (`hidden` flag as data key `d0`), edges are the enabled
//! transitions with their probability (data key `d1`).
//!
use crate::error::Result;
use crate::hmm::HiddenMarkovModel;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn write_graphml<W: Write>(hmm: &HiddenMarkovModel, mut writer: W) -> Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        writer,
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">"#
    )?;
    writeln!(
        writer,
        r#"  <key id="d0" for="node" attr.name="hidden" attr.type="boolean"/>"#
    )?;
    writeln!(
        writer,
        r#"  <key id="d1" for="edge" attr.name="probability" attr.type="double"/>"#
    )?;
    writeln!(writer, r#"  <graph id="hmm" edgedefault="directed">"#)?;
    for (_, state) in hmm.states() {
        writeln!(
            writer,
            r#"    <node id="{}"><data key="d0">{}</data></node>"#,
            escape(state.name()),
            state.is_hidden()
        )?;
    }
    for (i, (_, source, target, t)) in hmm.transitions().enumerate() {
        writeln!(
            writer,
            r#"    <edge id="e{}" source="{}" target="{}"><data key="d1">{}</data></edge>"#,
            i,
            escape(hmm.state_name(source)),
            escape(hmm.state_name(target)),
            t.probability
        )?;
    }
    writeln!(writer, "  </graph>")?;
    writeln!(writer, "</graphml>")?;
    Ok(())
}

pub fn write_graphml_file<P: AsRef<Path>>(hmm: &HiddenMarkovModel, filename: P) -> Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);
    write_graphml(hmm, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::mocks::mock_branching;

    #[test]
    fn graphml_nodes_and_enabled_edges() {
        let mut hmm = mock_branching();
        hmm.disable_transition("B", "E").unwrap();
        let mut buf: Vec<u8> = Vec::new();
        write_graphml(&hmm, &mut buf).unwrap();
        let xml = String::from_utf8(buf).unwrap();
        assert_eq!(xml.matches("<node ").count(), 4);
        assert_eq!(xml.matches("<edge ").count(), 3);
        assert!(xml.contains(r#"<node id="A"><data key="d0">false</data></node>"#));
        assert!(xml.contains(r#"source="S" target="A"><data key="d1">0.6</data>"#));
    }
    #[test]
    fn graphml_escapes_names() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
