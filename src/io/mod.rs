//! Text formats for instances and assignments.

mod text;

pub use text::{
    format_assignment, format_instance, parse_assignment, parse_instance, read_assignment_file,
    read_instance_file, write_assignment_file, ParseError,
};
