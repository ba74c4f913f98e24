//! Plain text instance and assignment formats.
//!
//! Instance:
//!
//! ```text
//! 3
//! 12.500
//! 0 1 10.000 2.000
//! 0 2 3.000 1.000
//! 1 2 4.000 5.000
//! ```
//!
//! Line one is the student count, line two the total stress budget, then
//! one `i j happiness stress` line per unordered pair.
//!
//! Assignment: one `student room` line per student.

use crate::graph::{GraphError, Instance, RoomGraphBuilder};
use crate::partition::{Partition, PartitionError};
use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading the text formats.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected end of input: missing {0}")]
    UnexpectedEof(&'static str),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("expected {expected} pair lines, found {found}")]
    PairCount { expected: usize, found: usize },

    #[error("student count {0} is too large")]
    TooManyStudents(usize),

    #[error("invalid stress budget {0}")]
    InvalidBudget(f64),

    #[error("student {student} assigned more than once")]
    DuplicateStudent { student: usize },

    #[error("student {student} has no room")]
    MissingStudent { student: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Partition(#[from] PartitionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Non-blank lines with their 1-based line numbers.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
}

fn field<T: FromStr>(line: usize, token: Option<&str>, what: &str) -> Result<T, ParseError> {
    let token = token.ok_or_else(|| ParseError::Syntax {
        line,
        message: format!("missing {what}"),
    })?;
    token.parse().map_err(|_| ParseError::Syntax {
        line,
        message: format!("invalid {what} '{token}'"),
    })
}

/// Parses an instance from text.
pub fn parse_instance(text: &str) -> Result<Instance, ParseError> {
    let mut lines = content_lines(text);

    let (line, first) = lines.next().ok_or(ParseError::UnexpectedEof("student count"))?;
    let n: usize = field(line, Some(first), "student count")?;

    let (line, second) = lines.next().ok_or(ParseError::UnexpectedEof("stress budget"))?;
    let budget: f64 = field(line, Some(second), "stress budget")?;
    if !budget.is_finite() || budget < 0.0 {
        return Err(ParseError::InvalidBudget(budget));
    }

    // size the graph from the lines actually present, not the header
    let expected = n
        .checked_mul(n.saturating_sub(1))
        .map(|pairs| pairs / 2)
        .ok_or(ParseError::TooManyStudents(n))?;
    let pairs: Vec<(usize, &str)> = lines.collect();
    if pairs.len() != expected {
        return Err(ParseError::PairCount {
            expected,
            found: pairs.len(),
        });
    }

    let mut builder = RoomGraphBuilder::new(n);
    for (line, text) in pairs {
        let mut tokens = text.split_whitespace();
        let i: usize = field(line, tokens.next(), "student")?;
        let j: usize = field(line, tokens.next(), "student")?;
        let happiness: f64 = field(line, tokens.next(), "happiness")?;
        let stress: f64 = field(line, tokens.next(), "stress")?;
        if tokens.next().is_some() {
            return Err(ParseError::Syntax {
                line,
                message: "trailing fields".into(),
            });
        }
        builder = builder.pair(i, j, happiness, stress);
    }

    Ok(Instance::new(builder.build()?, budget))
}

/// Formats an instance; weights are written with three decimals.
pub fn format_instance(instance: &Instance) -> String {
    let n = instance.graph.len();
    let mut out = String::new();
    let _ = writeln!(out, "{n}");
    let _ = writeln!(out, "{:.3}", instance.budget);
    for i in 0..n {
        for j in (i + 1)..n {
            let _ = writeln!(
                out,
                "{i} {j} {:.3} {:.3}",
                instance.graph.happiness(i, j),
                instance.graph.stress(i, j)
            );
        }
    }
    out
}

/// Parses an assignment of `n` students.
pub fn parse_assignment(text: &str, n: usize) -> Result<Partition, ParseError> {
    let mut rooms: Vec<Option<usize>> = vec![None; n];
    for (line, text) in content_lines(text) {
        let mut tokens = text.split_whitespace();
        let student: usize = field(line, tokens.next(), "student")?;
        let room: usize = field(line, tokens.next(), "room")?;
        if student >= n {
            return Err(ParseError::Syntax {
                line,
                message: format!("student {student} out of range for {n} students"),
            });
        }
        if room >= n {
            return Err(ParseError::Syntax {
                line,
                message: format!("room {room} out of range for {n} students"),
            });
        }
        if rooms[student].replace(room).is_some() {
            return Err(ParseError::DuplicateStudent { student });
        }
    }
    let assignment = rooms
        .into_iter()
        .enumerate()
        .map(|(student, room)| room.ok_or(ParseError::MissingStudent { student }))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Partition::from_assignment(&assignment)?)
}

/// Formats an assignment as `student room` lines.
pub fn format_assignment(assignment: &[usize]) -> String {
    let mut out = String::new();
    for (student, room) in assignment.iter().enumerate() {
        let _ = writeln!(out, "{student} {room}");
    }
    out
}

/// Reads an instance file.
pub fn read_instance_file(path: impl AsRef<Path>) -> Result<Instance, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_instance(&text)
}

/// Reads an assignment file for `n` students.
pub fn read_assignment_file(path: impl AsRef<Path>, n: usize) -> Result<Partition, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_assignment(&text, n)
}

/// Writes an assignment file.
pub fn write_assignment_file(path: impl AsRef<Path>, assignment: &[usize]) -> std::io::Result<()> {
    std::fs::write(path, format_assignment(assignment))
}
