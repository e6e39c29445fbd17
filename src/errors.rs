/// All the ways compiling a map can fail. Non-fatal diagnostics (omitted
/// degenerate vertices and the like) are logged at their sites instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed map text: missing brace, bad number, wrong token count.
    #[error("map parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Geometry collapsed below what the algorithms can represent, e.g.
    /// a split that would leave fewer than 3 vertices on a side.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A should-be-unreachable state, e.g. BSP recursion with no unused
    /// pivot left.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// File open/read/write failures, propagated from the debug emitters.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}
