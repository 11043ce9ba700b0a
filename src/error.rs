use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The solver's error taxonomy.
///
/// An unsatisfiable problem is *not* an error: the engine reports exhaustion
/// as an `Ok(None)` result. These variants cover contract violations (a
/// defect somewhere), resource exhaustion, and the Sudoku frontend's own
/// failure modes.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// A constraint was asked about a variable outside its declared scope.
    #[error("constraint `{constraint}` does not affect variable `{variable}`")]
    OutOfScope {
        constraint: String,
        variable: String,
    },

    /// The value of an unassigned variable was requested.
    #[error("variable `{variable}` has no assigned value")]
    NotAssigned { variable: String },

    /// A variable was referenced that the CSP never declared.
    #[error("unknown variable `{variable}`")]
    UnknownVariable { variable: String },

    /// A constraint's scope names a variable with no domain entry. Raised at
    /// CSP construction time.
    #[error("constraint `{constraint}` references undeclared variable `{variable}`")]
    UndeclaredScopeVariable {
        constraint: String,
        variable: String,
    },

    /// The search visited more nodes than the configured ceiling allows.
    #[error("search aborted after exceeding the limit of {limit} steps")]
    StepLimitExceeded { limit: u64 },

    /// A puzzle definition that cannot be turned into a CSP instance.
    #[error("invalid puzzle: {0}")]
    InvalidPuzzle(String),

    /// A puzzle for which the search exhausted every branch.
    #[error("no solution found after {steps} steps")]
    NoSolution { steps: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<SolverError>,
        backtrace: Box<Backtrace>,
    },
}

impl Error {
    /// The underlying [`SolverError`], so callers can tell e.g. resource
    /// exhaustion apart from a contract violation.
    pub fn inner(&self) -> &SolverError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}

impl From<SolverError> for Error {
    fn from(inner: SolverError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}
