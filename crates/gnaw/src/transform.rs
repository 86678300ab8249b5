use std::ops::Range;

use crate::error::{BoxError, Error, ErrorKind};
use crate::grammar::Label;
use crate::tree::Match;

/// A value produced while folding a match tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<V> {
    /// The text of a token.
    Text(String),
    /// The yields of an unlabeled node's children.
    List(Vec<Value<V>>),
    /// A value produced by a reducer.
    Custom(V),
}

impl<L: Label> Match<L> {
    /// Fold this match tree into an application value.
    ///
    /// Tokens yield their text and unlabeled nodes yield the list of their
    /// children's yields; `reducer` runs only at labeled nodes, with the
    /// label and the child yields. `Ok(None)` makes a node's yield absent,
    /// and absent yields are skipped by the enclosing node.
    ///
    /// A reducer error that is already an [`Error`] propagates with its
    /// offset filled in from the node's range when it has none; any other
    /// error is wrapped as [`ErrorKind::Custom`] pinned at the node's range
    /// start.
    ///
    /// ```rust
    /// use gnaw::{CharSet, Grammar, Value};
    ///
    /// let number = Grammar::label(
    ///     "number",
    ///     Grammar::flatten(Grammar::one_or_more(Grammar::class(
    ///         CharSet::from_range('0'..='9'),
    ///     ))),
    /// );
    /// let tree = Grammar::interleaved(number, Grammar::discard(Grammar::literal("+")))
    ///     .parse("12+30")
    ///     .unwrap();
    ///
    /// let sum: i64 = match tree
    ///     .transform::<i64, _>(&mut |_, values| match &values[..] {
    ///         [Value::Text(text)] => Ok(Some(Value::Custom(text.parse()?))),
    ///         _ => Ok(None),
    ///     })
    ///     .unwrap()
    /// {
    ///     Some(Value::List(terms)) => terms
    ///         .iter()
    ///         .map(|term| match term {
    ///             Value::Custom(n) => *n,
    ///             _ => 0,
    ///         })
    ///         .sum(),
    ///     _ => 0,
    /// };
    /// assert_eq!(sum, 42);
    /// ```
    pub fn transform<V, F>(&self, reducer: &mut F) -> Result<Option<Value<V>>, Error<L>>
    where
        F: FnMut(&L, Vec<Value<V>>) -> Result<Option<Value<V>>, BoxError>,
    {
        match self {
            Match::Token { text, .. } => Ok(Some(Value::Text(text.clone()))),
            Match::Node { label, children } => {
                let mut values = Vec::with_capacity(children.len());
                for child in children {
                    if let Some(value) = child.transform(reducer)? {
                        values.push(value);
                    }
                }
                match label {
                    None => Ok(Some(Value::List(values))),
                    Some(label) => reducer(label, values).map_err(|err| pin(err, self.range())),
                }
            }
        }
    }
}

/// Attach the originating node's offset to a reducer error.
fn pin<L: Label>(err: BoxError, range: Option<Range<usize>>) -> Error<L> {
    let offset = range.map(|range| range.start);
    match err.downcast::<Error<L>>() {
        Ok(err) => {
            let mut err = *err;
            if err.offset.is_none() {
                err.offset = offset;
            }
            err
        }
        Err(err) => Error::new(ErrorKind::Custom(err), None, offset),
    }
}
