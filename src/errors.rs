use std::io;
use std::result;

/// Failures surfaced by the access layer.
///
/// Every variant except `IO` marks a caller contract violation or a
/// malformed request; `IO` passes through a failure from the
/// byte-supplying collaborator. Nothing is retried or recovered
/// internally, and a failed read never returns partial results.
#[derive(Debug)]
pub enum Error {
    IO(io::Error),
    SectionSyntax(String),
    Range(String),
    ShapeMismatch(String),
    UnsupportedSection(String),
    StructureConflict(String),
    UnknownField(String),
    NotScalar(String),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::IO(err)
    }
}

pub type Result<T> = result::Result<T, Error>;
