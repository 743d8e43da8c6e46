use std::fmt::Display;

use itertools::Itertools;
use thiserror::Error;

use crate::{automaton::StateId, prelude::*};

/// Errors that can occur when rendering an automaton through graphviz.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Spawning `dot` or exchanging data with it failed.
    #[error("could not run graphviz: {0}")]
    Io(#[from] std::io::Error),
    /// The `dot` process terminated unsuccessfully.
    #[error("dot process exited with status {0}")]
    NonZeroExit(std::process::ExitStatus),
}

fn dot_state_ident(state: &State) -> String {
    match state {
        State::Value(k) if *k < 0 => format!("qm{}", k.unsigned_abs()),
        State::Value(k) => format!("q{k}"),
        State::Sink => "sink".to_string(),
    }
}

/// Enum that abstracts attributes of nodes in the DOT format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotStateAttribute {
    /// The label of a node
    Label(String),
    /// The shape of a node
    Shape(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label=\"{s}\""),
            DotStateAttribute::Shape(s) => write!(f, "shape=\"{s}\""),
        }
    }
}

impl DFA {
    fn dot_state_attributes(&self, state: &State) -> Vec<DotStateAttribute> {
        let shape = if self.is_accepting(state) {
            "doublecircle"
        } else {
            "circle"
        };
        vec![
            DotStateAttribute::Shape(shape.into()),
            DotStateAttribute::Label(state.show()),
        ]
    }

    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    ///
    /// Parallel transitions between two states are merged into a single edge whose label lists
    /// all of their symbols.
    pub fn dot_representation(&self, name: &str) -> String {
        let header = [
            format!("digraph \"{}\" {{", name.replace('"', "\\\"")),
            "rankdir=LR".to_string(),
            "init [label=\"\", shape=none, width=0, height=0]".to_string(),
        ];

        let states = self.states().map(|q| {
            format!(
                "{} [{}]",
                dot_state_ident(&q),
                self.dot_state_attributes(&q)
                    .into_iter()
                    .map(|attr| attr.to_string())
                    .join(", ")
            )
        });

        let entry = std::iter::once(format!("init -> {}", dot_state_ident(&self.initial())));

        let transitions = (0..self.size() as StateId).flat_map(|id| {
            let source = self.state(id);
            let mut grouped: Vec<(StateId, Vec<String>)> = vec![];
            for (sym, &target) in self.alphabet().universe().zip(self.row(id)) {
                match grouped.iter_mut().find(|(t, _)| *t == target) {
                    Some((_, labels)) => labels.push(sym.show()),
                    None => grouped.push((target, vec![sym.show()])),
                }
            }
            grouped.into_iter().map(move |(target, labels)| {
                format!(
                    "{} -> {} [label=\"{}\"]",
                    dot_state_ident(&source),
                    dot_state_ident(&self.state(target)),
                    labels.join(", ")
                )
            })
        });

        header
            .into_iter()
            .chain(states)
            .chain(entry)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }

    /// Renders the automaton visually (as PNG) by piping its DOT representation through the
    /// `dot` executable and returns the bytes of the rendered image. Only available with the
    /// `graphviz` feature.
    #[cfg(feature = "graphviz")]
    pub fn render(&self, name: &str) -> Result<Vec<u8>, RenderError> {
        use std::io::{Read, Write};

        let dot = self.dot_representation(name);
        tracing::trace!("writing dot representation\n{}", dot);

        let mut child = std::process::Command::new("dot")
            .arg("-Tpng")
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes())?;
        }

        let mut output = Vec::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout.read_to_end(&mut output)?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(RenderError::NonZeroExit(status));
        }

        Ok(output)
    }

    /// Renders the automaton into a PNG file at `path`. The DOT representation is first written
    /// to a temporary file which is then handed to `dot`. Only available with the `graphviz`
    /// feature.
    #[cfg(feature = "graphviz")]
    pub fn render_to_file_name<P: AsRef<std::path::Path>>(
        &self,
        name: &str,
        path: P,
    ) -> Result<(), RenderError> {
        use std::io::Write;

        tracing::trace!("outputting dot and rendering to png");
        let dot = self.dot_representation(name);
        let mut tempfile = tempfile::NamedTempFile::new()?;
        tempfile.write_all(dot.as_bytes())?;
        tempfile.flush()?;

        let status = std::process::Command::new("dot")
            .arg("-Tpng")
            .arg("-o")
            .arg(path.as_ref())
            .arg(tempfile.path())
            .status()?;
        if !status.success() {
            return Err(RenderError::NonZeroExit(status));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn dot_marks_acceptance_and_entry() {
        let dfa = build(1, &[1], 0).unwrap();
        let dot = dfa.dot_representation("1*x_1 = 0");
        assert!(dot.starts_with("digraph \"1*x_1 = 0\" {"));
        assert!(dot.contains("q0 [shape=\"doublecircle\", label=\"0\"]"));
        assert!(dot.contains("sink [shape=\"circle\", label=\"⊥\"]"));
        assert!(dot.contains("init -> q0"));
        assert!(dot.contains("q0 -> q0 [label=\"0\"]"));
        assert!(dot.contains("q0 -> sink [label=\"1\"]"));
        assert!(dot.contains("sink -> sink [label=\"0, 1\"]"));
        assert!(dot.ends_with('}'));
    }

    #[test]
    fn negative_states_get_valid_identifiers() {
        let dfa = build(2, &[1, 1], 2).unwrap();
        let dot = dfa.dot_representation("A");
        assert!(dot.contains("qm1 [shape=\"circle\", label=\"-1\"]"));
        assert!(dot.contains("qm1 -> qm1 [label=\"10, 01\"]"));
        assert!(!dot.contains("q-1"));
    }
}
