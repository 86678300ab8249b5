use std::fmt;

use crate::grammar::{Grammar, Label};

/// A boxed error object, as returned by user reducers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The ways matching and transforming can fail.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind<L: Label> {
    /// The matcher exhausted its options; carries the term expected at the
    /// farthest point any attempt reached.
    #[error("Expected {0}")]
    Expected(Grammar<L>),
    /// The top-level term matched, but input remained.
    #[error("Unexpected token")]
    UnexpectedToken,
    /// An error raised by a user reducer during
    /// [transform](crate::Match::transform).
    #[error("{0}")]
    Custom(#[source] BoxError),
}

/// A structured matching or transform failure.
///
/// Exactly one `Error` is reported per failed call. It carries the failure
/// [kind](Error::kind), the [remaining](Error::remaining) unmatched input,
/// and the scalar [offset](Error::offset) the failure was pinned at.
///
/// ```rust
/// use gnaw::Grammar;
///
/// let err = Grammar::<&str>::literal("foo").parse("foobar").unwrap_err();
/// assert_eq!(err.remaining(), Some("bar"));
/// assert_eq!(err.offset(), Some(3));
/// assert_eq!(err.to_string(), r#"Unexpected token "bar" at 3"#);
/// ```
#[derive(Debug)]
pub struct Error<L: Label> {
    pub(crate) kind: ErrorKind<L>,
    pub(crate) remaining: Option<String>,
    pub(crate) offset: Option<usize>,
}

impl<L: Label> Error<L> {
    pub(crate) fn new(kind: ErrorKind<L>, remaining: Option<String>, offset: Option<usize>) -> Self {
        Self {
            kind,
            remaining,
            offset,
        }
    }

    pub(crate) fn expected(expected: Grammar<L>, remaining: String, offset: usize) -> Self {
        Self::new(ErrorKind::Expected(expected), Some(remaining), Some(offset))
    }

    pub(crate) fn unexpected_token(remaining: String, offset: usize) -> Self {
        Self::new(ErrorKind::UnexpectedToken, Some(remaining), Some(offset))
    }

    /// Wrap an application error, for returning out of a reducer. The
    /// transform pass pins it to the originating node's offset unless
    /// [`with_offset`](Error::with_offset) already did.
    pub fn custom(err: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::Custom(err.into()), None, None)
    }

    /// Pin this error to a scalar offset.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// The failure kind.
    pub fn kind(&self) -> &ErrorKind<L> {
        &self.kind
    }

    /// The remaining unmatched input at the failure site.
    pub fn remaining(&self) -> Option<&str> {
        self.remaining.as_deref()
    }

    /// The scalar offset the failure is pinned at.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// The token at the failure site: the first scalar of the remainder if
    /// it is whitespace, otherwise the longest leading run of
    /// non-whitespace scalars.
    pub fn token(&self) -> Option<String> {
        let remaining = self.remaining.as_deref()?;
        let first = remaining.chars().next()?;
        if first.is_whitespace() {
            Some(first.to_string())
        } else {
            Some(
                remaining
                    .chars()
                    .take_while(|scalar| !scalar.is_whitespace())
                    .collect(),
            )
        }
    }
}

impl<L: Label> fmt::Display for Error<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.token();
        let offset_shown = match &self.kind {
            ErrorKind::Expected(_) => token.is_some(),
            ErrorKind::UnexpectedToken | ErrorKind::Custom(_) => true,
        };

        match (&self.kind, token) {
            (ErrorKind::Expected(expected), Some(token)) => {
                write!(f, "Unexpected token {token:?} (expected {expected})")?;
            }
            (ErrorKind::Expected(expected), None) => write!(f, "Expected {expected}")?,
            (ErrorKind::UnexpectedToken, token) => {
                write!(f, "Unexpected token {:?}", token.unwrap_or_default())?;
            }
            (ErrorKind::Custom(err), _) => write!(f, "{err}")?,
        }

        match self.offset {
            Some(offset) if offset_shown => write!(f, " at {offset}"),
            _ => Ok(()),
        }
    }
}

impl<L: Label> std::error::Error for Error<L> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}
