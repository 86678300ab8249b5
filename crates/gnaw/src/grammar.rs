use std::fmt;
use std::hash::Hash;
use std::ops::BitOr;

use triomphe::Arc;

use crate::charset::CharSet;

/// Types usable as grammar labels.
///
/// Blanket-implemented: `&'static str` and small enums are typical. Equality
/// and hashing drive reference resolution; `Debug` and `Display` drive
/// diagnostics.
pub trait Label: Clone + Eq + Hash + fmt::Debug + fmt::Display + 'static {}

impl<T: Clone + Eq + Hash + fmt::Debug + fmt::Display + 'static> Label for T {}

/// A grammar term: a first-class, inspectable description of what to match.
///
/// A `Grammar` is a cheap handle around a shared immutable term, so cloning
/// a grammar or composing grammars never copies subterms. Terms compare
/// structurally; two independently built but identical grammars are equal.
///
/// Build terms with the constructors on this type, compose alternatives with
/// `|` (see the [`BitOr`] impl), then run them with [`Grammar::parse`].
pub struct Grammar<L> {
    kind: Arc<GrammarKind<L>>,
}

/// The variants of a grammar term, exposed for inspection via
/// [`Grammar::kind`].
#[derive(Debug, PartialEq, Eq)]
pub enum GrammarKind<L> {
    /// Matches an exact scalar sequence.
    Literal(String),
    /// Matches exactly one scalar contained in the set.
    Class(CharSet),
    /// Ordered choice: the first alternative that matches and consumes
    /// input wins.
    Any(Vec<Grammar<L>>),
    /// All subterms, in order.
    Sequence(Vec<Grammar<L>>),
    /// The subterm, or an empty match consuming nothing.
    Optional(Grammar<L>),
    /// Greedy repetition of the subterm, zero minimum.
    ZeroOrMore(Grammar<L>),
    /// The subterm's match collapsed to a single token holding its text.
    Flatten(Grammar<L>),
    /// The subterm's match replaced by an empty node.
    Discard(Grammar<L>),
    /// The subterm's match replaced by a token with fixed text.
    Replace(Grammar<L>, String),
    /// Names a subterm. The node produced is tagged with the label, and the
    /// label becomes resolvable by [`Reference`](GrammarKind::Reference)
    /// terms evaluated after this one.
    Label(L, Grammar<L>),
    /// Stands for the most recently bound label of this name.
    Reference(L),
}

impl<L> Grammar<L> {
    fn new(kind: GrammarKind<L>) -> Self {
        Self {
            kind: Arc::new(kind),
        }
    }

    /// The term's variant.
    pub fn kind(&self) -> &GrammarKind<L> {
        &self.kind
    }

    /// Matches the exact scalar sequence `text`.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(GrammarKind::Literal(text.into()))
    }

    /// Matches one scalar in `set`.
    pub fn class(set: CharSet) -> Self {
        Self::new(GrammarKind::Class(set))
    }

    /// Ordered choice between `alternatives`.
    pub fn any(alternatives: impl IntoIterator<Item = Self>) -> Self {
        Self::new(GrammarKind::Any(alternatives.into_iter().collect()))
    }

    /// Matches all of `terms` in order.
    pub fn sequence(terms: impl IntoIterator<Item = Self>) -> Self {
        Self::new(GrammarKind::Sequence(terms.into_iter().collect()))
    }

    /// Matches `term`, or nothing.
    pub fn optional(term: Self) -> Self {
        Self::new(GrammarKind::Optional(term))
    }

    /// Matches `term` as many times as it will advance, including zero.
    pub fn zero_or_more(term: Self) -> Self {
        Self::new(GrammarKind::ZeroOrMore(term))
    }

    /// Matches `term` at least once: `term` followed by
    /// [`zero_or_more`](Grammar::zero_or_more) of it.
    pub fn one_or_more(term: Self) -> Self {
        let rest = Self::zero_or_more(term.clone());
        Self::sequence([term, rest])
    }

    /// Matches one or more `item`s with `separator` between them.
    pub fn interleaved(item: Self, separator: Self) -> Self {
        let lead = Self::zero_or_more(Self::sequence([item.clone(), separator]));
        Self::sequence([lead, item])
    }

    /// Collapses `term`'s match into a single token holding the
    /// concatenation of its leaf text.
    pub fn flatten(term: Self) -> Self {
        Self::new(GrammarKind::Flatten(term))
    }

    /// Succeeds exactly when `term` does, producing an empty node.
    pub fn discard(term: Self) -> Self {
        Self::new(GrammarKind::Discard(term))
    }

    /// Succeeds exactly when `term` does, producing a token with `text`
    /// over the consumed range.
    pub fn replace(term: Self, text: impl Into<String>) -> Self {
        Self::new(GrammarKind::Replace(term, text.into()))
    }

    /// Names `term`. The node it produces is tagged with `label`, and
    /// [references](Grammar::reference) to `label` evaluated under this
    /// term resolve to it.
    pub fn label(label: L, term: Self) -> Self {
        Self::new(GrammarKind::Label(label, term))
    }

    /// Stands for the most recently bound [label](Grammar::label) named
    /// `label`, allowing grammars to recurse.
    pub fn reference(label: L) -> Self {
        Self::new(GrammarKind::Reference(label))
    }

    /// Whether the term can succeed without consuming input.
    ///
    /// A reference reports `false`: resolving it here could recurse forever
    /// on the cyclic grammars references exist for. Used by descriptions
    /// only, never by matching.
    pub fn is_optional(&self) -> bool {
        match self.kind() {
            GrammarKind::Optional(_) | GrammarKind::ZeroOrMore(_) => true,
            GrammarKind::Literal(_) | GrammarKind::Class(_) | GrammarKind::Reference(_) => false,
            GrammarKind::Any(alternatives) => alternatives.iter().any(Self::is_optional),
            GrammarKind::Sequence(terms) => terms.iter().all(Self::is_optional),
            GrammarKind::Flatten(term)
            | GrammarKind::Discard(term)
            | GrammarKind::Replace(term, _)
            | GrammarKind::Label(_, term) => term.is_optional(),
        }
    }
}

impl<L> Clone for Grammar<L> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
        }
    }
}

impl<L: PartialEq> PartialEq for Grammar<L> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.kind, &other.kind) || self.kind() == other.kind()
    }
}

impl<L: Eq> Eq for Grammar<L> {}

impl<L: fmt::Debug> fmt::Debug for Grammar<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind().fmt(f)
    }
}

/// Combines two grammars into an ordered choice.
///
/// Nested alternations flatten into one (`any(a, b) | c` is
/// `any(a, b, c)`), and two character classes combine into a single class
/// over the union of their sets. A one-scalar literal stays a literal: it
/// matches like a class of that scalar but describes itself exactly in
/// diagnostics.
impl<L> BitOr for Grammar<L> {
    type Output = Grammar<L>;

    fn bitor(self, rhs: Self) -> Self::Output {
        match (self.kind(), rhs.kind()) {
            (GrammarKind::Class(left), GrammarKind::Class(right)) => {
                Grammar::class(left.union(right))
            }
            (GrammarKind::Any(left), GrammarKind::Any(right)) => {
                Grammar::any(left.iter().cloned().chain(right.iter().cloned()))
            }
            (GrammarKind::Any(left), _) => {
                Grammar::any(left.iter().cloned().chain([rhs.clone()]))
            }
            (_, GrammarKind::Any(right)) => {
                Grammar::any([self.clone()].into_iter().chain(right.iter().cloned()))
            }
            _ => Grammar::any([self.clone(), rhs.clone()]),
        }
    }
}

/// The description used when a term is reported as expected input.
impl<L: fmt::Display> fmt::Display for Grammar<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            GrammarKind::Literal(text) => write!(f, "{text:?}"),
            GrammarKind::Class(set) => write!(f, "character in {set}"),
            GrammarKind::Any(alternatives) => {
                for (i, term) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{term}")?;
                }
                Ok(())
            }
            GrammarKind::Sequence(terms) => {
                let first = terms
                    .iter()
                    .find(|term| !term.is_optional())
                    .or_else(|| terms.first());
                match first {
                    Some(term) => write!(f, "{term}"),
                    None => f.write_str("nothing"),
                }
            }
            GrammarKind::Optional(term)
            | GrammarKind::ZeroOrMore(term)
            | GrammarKind::Flatten(term)
            | GrammarKind::Discard(term)
            | GrammarKind::Replace(term, _) => write!(f, "{term}"),
            GrammarKind::Label(label, _) | GrammarKind::Reference(label) => write!(f, "{label}"),
        }
    }
}
