use std::fmt;
use std::ops::Range;

/// The structured result of a successful match.
///
/// Ranges are half-open `[start, end)` intervals of scalar offsets into the
/// matched input, not byte offsets.
#[derive(Clone, PartialEq, Eq)]
pub enum Match<L> {
    /// A leaf holding a literal scalar sequence.
    ///
    /// The range is absent for synthetic tokens, produced by
    /// [flatten](crate::Grammar::flatten) or
    /// [replace](crate::Grammar::replace) over empty input.
    Token {
        text: String,
        range: Option<Range<usize>>,
    },
    /// An ordered list of child matches, optionally tagged with the
    /// [label](crate::Grammar::label) that produced it.
    Node {
        label: Option<L>,
        children: Vec<Match<L>>,
    },
}

impl<L> Match<L> {
    pub fn token(text: impl Into<String>, range: Option<Range<usize>>) -> Self {
        Match::Token {
            text: text.into(),
            range,
        }
    }

    pub fn node(label: Option<L>, children: Vec<Match<L>>) -> Self {
        Match::Node { label, children }
    }

    /// The scalar-offset range this match covers, if any part of it came
    /// from the input. A node spans from its first ranged child to its
    /// last.
    pub fn range(&self) -> Option<Range<usize>> {
        match self {
            Match::Token { range, .. } => range.clone(),
            Match::Node { children, .. } => {
                let first = children.iter().find_map(Match::range)?;
                let last = children.iter().rev().find_map(Match::range)?;
                Some(first.start..last.end)
            }
        }
    }
}

impl<L: fmt::Debug> fmt::Debug for Match<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn print<L: fmt::Debug>(
            f: &mut fmt::Formatter<'_>,
            indent: usize,
            tree: &Match<L>,
        ) -> fmt::Result {
            write!(f, "{:indent$}", "")?;
            match tree {
                Match::Token { text, range } => match range {
                    Some(range) => writeln!(f, "- TOKEN@{}..{} {:?}", range.start, range.end, text),
                    None => writeln!(f, "- TOKEN {text:?}"),
                },
                Match::Node { label, children } => {
                    match (label, tree.range()) {
                        (Some(label), Some(range)) => {
                            writeln!(f, "- {:?}@{}..{}", label, range.start, range.end)?
                        }
                        (Some(label), None) => writeln!(f, "- {label:?}")?,
                        (None, Some(range)) => writeln!(f, "- NODE@{}..{}", range.start, range.end)?,
                        (None, None) => writeln!(f, "- NODE")?,
                    }
                    for child in children {
                        print(f, indent + 4, child)?;
                    }
                    Ok(())
                }
            }
        }

        print(f, 0, self)
    }
}
