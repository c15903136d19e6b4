use thiserror::Error;

/// An error that can occur while parsing an expression.
///
/// Every variant that points at the source carries a byte offset into the
/// original string so the UI can underline the offending token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Expression source is empty or whitespace only.
    #[error("empty expression")]
    Empty,

    /// A character that starts no valid token.
    #[error("unexpected character at position {position}")]
    UnexpectedChar { position: usize },

    /// A well-formed token in a place the grammar does not allow it.
    #[error("unexpected token at position {position}, expected {expected}")]
    UnexpectedToken {
        expected: &'static str,
        position: usize,
    },

    /// The expression ended where the grammar still expected input.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// Identifier is neither a declared variable, a constant, nor an
    /// allow-listed function.
    #[error("unknown identifier '{name}' at position {position}")]
    UnknownIdentifier { name: String, position: usize },

    /// Allow-listed function called with the wrong number of arguments.
    #[error("function '{name}' expects {expected} argument(s), found {found}")]
    WrongArity {
        name: &'static str,
        expected: usize,
        found: usize,
        position: usize,
    },

    /// Input remaining after a complete expression was parsed.
    #[error("trailing input at position {position}")]
    TrailingInput { position: usize },

    /// More free variables declared than the grammar supports.
    #[error("at most {max} free variables allowed, {found} declared")]
    TooManyVariables { max: usize, found: usize },

    /// The same variable symbol declared twice.
    #[error("variable '{name}' declared more than once")]
    DuplicateVariable { name: String },
}

/// An error that can occur when evaluating a parsed expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The binding slice does not match the variable set the expression was
    /// parsed with. This is a caller contract violation, never a default.
    #[error("expected {expected} binding(s), found {found}")]
    BindingMismatch { expected: usize, found: usize },
}

/// A structural error that aborts geometry generation for one graph spec.
///
/// Ordinary bad math (NaN, infinity, division by zero) is never an error:
/// affected samples degrade to omitted or zero-filled points. Everything in
/// this enum is fatal to its plot and must be surfaced to the UI.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    /// An expression slot failed to parse.
    #[error("in expression slot '{slot}': {source}")]
    Parse {
        slot: String,
        #[source]
        source: ParseError,
    },

    /// A domain interval or resolution is unusable.
    #[error("invalid domain '{axis}': {reason}")]
    InvalidDomain { axis: String, reason: String },

    /// The plot kind requires an expression slot that is absent.
    #[error("plot kind '{kind}' requires expression slot '{slot}'")]
    MissingExpressionSlot { kind: String, slot: &'static str },

    /// An evaluation was invoked with a mismatched binding set.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl GraphError {
    pub(crate) fn parse(slot: &str, source: ParseError) -> Self {
        Self::Parse {
            slot: slot.to_string(),
            source,
        }
    }

    pub(crate) fn domain(axis: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDomain {
            axis: axis.to_string(),
            reason: reason.into(),
        }
    }
}
