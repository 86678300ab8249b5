use std::collections::HashMap;

use crate::charset::CharSet;
use crate::error::Error;
use crate::grammar::{Grammar, GrammarKind, Label};
use crate::tree::Match;

impl<L: Label> Grammar<L> {
    /// Match `input` against this grammar.
    ///
    /// Returns the match tree covering the whole input, or the failure
    /// pinned at the farthest point any attempt reached. Matching is
    /// deterministic plain backtracking with no memoization; worst-case
    /// time is exponential in the input length for pathological grammars.
    ///
    /// # Panics
    ///
    /// Panics if matching evaluates a [reference](Grammar::reference) whose
    /// label no enclosing [label](Grammar::label) term has bound. That is a
    /// grammar construction bug, not an input error.
    pub fn parse(&self, input: &str) -> Result<Match<L>, Error<L>> {
        let scalars: Vec<char> = input.chars().collect();
        let mut matcher = Matcher::new(&scalars);
        match matcher.match_tree(self) {
            Some(tree) if matcher.offset == scalars.len() => Ok(tree),
            Some(_) => Err(matcher.trailing_input()),
            None => Err(matcher.no_match(self)),
        }
    }
}

/// The state of one `parse` invocation.
///
/// Three mutually recursive routines evaluate a term against the cursor:
/// `match_tree` builds the full tree, `match_string` only the matched text
/// (under flatten), and `skip` nothing at all (under discard and replace,
/// and in the class repetition fast path). All three restore the cursor on
/// failure and share the farthest-failure record.
struct Matcher<'input, L> {
    input: &'input [char],
    offset: usize,
    /// The farthest offset at which any subterm failed, and the subterm
    /// that was expected there.
    best: Option<(usize, Grammar<L>)>,
    /// Labels descended through so far, for reference resolution.
    env: HashMap<L, Grammar<L>>,
}

impl<'input, L: Label> Matcher<'input, L> {
    fn new(input: &'input [char]) -> Self {
        Self {
            input,
            offset: 0,
            best: None,
            env: HashMap::new(),
        }
    }

    fn match_tree(&mut self, grammar: &Grammar<L>) -> Option<Match<L>> {
        match grammar.kind() {
            GrammarKind::Literal(text) => {
                let start = self.offset;
                if self.consume_literal(grammar, text) {
                    Some(Match::token(text.clone(), Some(start..self.offset)))
                } else {
                    None
                }
            }
            GrammarKind::Class(set) => match self.input.get(self.offset) {
                Some(&scalar) if set.contains(scalar) => {
                    let start = self.offset;
                    self.offset += 1;
                    Some(Match::token(scalar, Some(start..self.offset)))
                }
                _ => {
                    self.fail(grammar);
                    None
                }
            },
            GrammarKind::Any(alternatives) => {
                let start = self.offset;
                for term in alternatives {
                    if let Some(tree) = self.match_tree(term) {
                        // A zero-width success never wins an ordered choice.
                        if self.offset > start {
                            return Some(tree);
                        }
                    }
                }
                None
            }
            GrammarKind::Sequence(terms) => {
                let start = self.offset;
                let mut children = Vec::with_capacity(terms.len());
                for term in terms {
                    match self.match_tree(term) {
                        Some(tree) => splice(&mut children, tree),
                        None => {
                            self.fail(term);
                            self.offset = start;
                            return None;
                        }
                    }
                }
                Some(Match::node(None, children))
            }
            GrammarKind::Optional(term) => self
                .match_tree(term)
                .or_else(|| Some(Match::node(None, Vec::new()))),
            GrammarKind::ZeroOrMore(term) => {
                if let GrammarKind::Class(set) = term.kind() {
                    let start = self.offset;
                    self.skip_class_run(set);
                    let children = (start..self.offset)
                        .map(|offset| Match::token(self.input[offset], Some(offset..offset + 1)))
                        .collect();
                    return Some(Match::node(None, children));
                }
                let mut children = Vec::new();
                loop {
                    let before = self.offset;
                    match self.match_tree(term) {
                        // An iteration that does not advance would repeat
                        // forever; its match is dropped.
                        Some(tree) if self.offset > before => splice(&mut children, tree),
                        Some(_) | None => break,
                    }
                }
                Some(Match::node(None, children))
            }
            GrammarKind::Flatten(term) => {
                let start = self.offset;
                let text = self.match_string(term)?;
                let range = (self.offset > start).then(|| start..self.offset);
                Some(Match::token(text, range))
            }
            GrammarKind::Discard(term) => {
                if self.skip(term) {
                    Some(Match::node(None, Vec::new()))
                } else {
                    None
                }
            }
            GrammarKind::Replace(term, text) => {
                let start = self.offset;
                if self.skip(term) {
                    let range = (self.offset > start).then(|| start..self.offset);
                    Some(Match::token(text.clone(), range))
                } else {
                    None
                }
            }
            GrammarKind::Label(label, term) => {
                self.env.insert(label.clone(), grammar.clone());
                let tree = self.match_tree(term)?;
                Some(match tree {
                    Match::Node {
                        label: None,
                        children,
                    } => Match::node(Some(label.clone()), children),
                    tree => Match::node(Some(label.clone()), vec![tree]),
                })
            }
            GrammarKind::Reference(label) => {
                let target = self.resolve(label);
                self.match_tree(&target)
            }
        }
    }

    fn match_string(&mut self, grammar: &Grammar<L>) -> Option<String> {
        match grammar.kind() {
            GrammarKind::Literal(text) => self.consume_literal(grammar, text).then(|| text.clone()),
            GrammarKind::Class(set) => match self.input.get(self.offset) {
                Some(&scalar) if set.contains(scalar) => {
                    self.offset += 1;
                    Some(scalar.into())
                }
                _ => {
                    self.fail(grammar);
                    None
                }
            },
            GrammarKind::Any(alternatives) => {
                let start = self.offset;
                for term in alternatives {
                    if let Some(text) = self.match_string(term) {
                        if self.offset > start {
                            return Some(text);
                        }
                    }
                }
                None
            }
            GrammarKind::Sequence(terms) => {
                let start = self.offset;
                let mut text = String::new();
                for term in terms {
                    match self.match_string(term) {
                        Some(piece) => text.push_str(&piece),
                        None => {
                            self.fail(term);
                            self.offset = start;
                            return None;
                        }
                    }
                }
                Some(text)
            }
            GrammarKind::Optional(term) => Some(self.match_string(term).unwrap_or_default()),
            GrammarKind::ZeroOrMore(term) => {
                if let GrammarKind::Class(set) = term.kind() {
                    let start = self.offset;
                    self.skip_class_run(set);
                    return Some(self.input[start..self.offset].iter().collect());
                }
                let mut text = String::new();
                loop {
                    let before = self.offset;
                    match self.match_string(term) {
                        Some(piece) if self.offset > before => text.push_str(&piece),
                        Some(_) | None => break,
                    }
                }
                Some(text)
            }
            GrammarKind::Flatten(term) => self.match_string(term),
            GrammarKind::Discard(term) => self.skip(term).then(String::new),
            GrammarKind::Replace(term, text) => self.skip(term).then(|| text.clone()),
            GrammarKind::Label(label, term) => {
                self.env.insert(label.clone(), grammar.clone());
                self.match_string(term)
            }
            GrammarKind::Reference(label) => {
                let target = self.resolve(label);
                self.match_string(&target)
            }
        }
    }

    fn skip(&mut self, grammar: &Grammar<L>) -> bool {
        match grammar.kind() {
            GrammarKind::Literal(text) => self.consume_literal(grammar, text),
            GrammarKind::Class(set) => match self.input.get(self.offset) {
                Some(&scalar) if set.contains(scalar) => {
                    self.offset += 1;
                    true
                }
                _ => {
                    self.fail(grammar);
                    false
                }
            },
            GrammarKind::Any(alternatives) => {
                let start = self.offset;
                for term in alternatives {
                    if self.skip(term) && self.offset > start {
                        return true;
                    }
                }
                false
            }
            GrammarKind::Sequence(terms) => {
                let start = self.offset;
                for term in terms {
                    if !self.skip(term) {
                        self.fail(term);
                        self.offset = start;
                        return false;
                    }
                }
                true
            }
            GrammarKind::Optional(term) => {
                self.skip(term);
                true
            }
            GrammarKind::ZeroOrMore(term) => {
                if let GrammarKind::Class(set) = term.kind() {
                    self.skip_class_run(set);
                    return true;
                }
                loop {
                    let before = self.offset;
                    if !self.skip(term) || self.offset == before {
                        break;
                    }
                }
                true
            }
            GrammarKind::Flatten(term)
            | GrammarKind::Discard(term)
            | GrammarKind::Replace(term, _) => self.skip(term),
            GrammarKind::Label(label, term) => {
                self.env.insert(label.clone(), grammar.clone());
                self.skip(term)
            }
            GrammarKind::Reference(label) => {
                let target = self.resolve(label);
                self.skip(&target)
            }
        }
    }

    /// Consume `text` scalar by scalar. On a mismatch the advanced cursor
    /// is the failure site recorded against the farthest-failure record,
    /// and the cursor is restored.
    fn consume_literal(&mut self, grammar: &Grammar<L>, text: &str) -> bool {
        let start = self.offset;
        for scalar in text.chars() {
            if self.input.get(self.offset) == Some(&scalar) {
                self.offset += 1;
            } else {
                self.fail(grammar);
                self.offset = start;
                return false;
            }
        }
        true
    }

    fn skip_class_run(&mut self, set: &CharSet) {
        while self
            .input
            .get(self.offset)
            .map_or(false, |&scalar| set.contains(scalar))
        {
            self.offset += 1;
        }
    }

    /// Record a failed expectation at the cursor. Ties at the farthest
    /// offset go to the later failure.
    fn fail(&mut self, expected: &Grammar<L>) {
        if self
            .best
            .as_ref()
            .map_or(true, |&(best, _)| self.offset >= best)
        {
            self.best = Some((self.offset, expected.clone()));
        }
    }

    fn resolve(&self, label: &L) -> Grammar<L> {
        match self.env.get(label) {
            Some(bound) => bound.clone(),
            None => panic!("reference to unbound label {label:?}"),
        }
    }

    fn no_match(&mut self, grammar: &Grammar<L>) -> Error<L> {
        match self.best.take() {
            Some((offset, expected)) => {
                Error::expected(expected, self.remaining_from(offset), offset)
            }
            None => Error::expected(grammar.clone(), self.remaining_from(0), 0),
        }
    }

    /// The whole term matched but the cursor stopped short. A failed
    /// sub-attempt that got past the accepted match is reported instead,
    /// at its deeper offset.
    fn trailing_input(&mut self) -> Error<L> {
        match self.best.take() {
            Some((offset, expected)) if offset > self.offset => {
                Error::expected(expected, self.remaining_from(offset), offset)
            }
            _ => Error::unexpected_token(self.remaining_from(self.offset), self.offset),
        }
    }

    fn remaining_from(&self, offset: usize) -> String {
        self.input[offset..].iter().collect()
    }
}

/// Append a child to an in-progress node: unlabeled nodes are spliced in,
/// tokens and labeled nodes are appended whole.
fn splice<L>(children: &mut Vec<Match<L>>, tree: Match<L>) {
    match tree {
        Match::Node {
            label: None,
            children: spliced,
        } => children.extend(spliced),
        tree => children.push(tree),
    }
}

#[cfg(test)]
mod tests {
    use expect_test::{expect, Expect};
    use pretty_assertions::assert_eq;

    use crate::{CharSet, ErrorKind, Grammar, Match};

    fn lit(text: &str) -> Grammar<&'static str> {
        Grammar::literal(text)
    }

    fn digit() -> Grammar<&'static str> {
        Grammar::class(CharSet::from_range('0'..='9'))
    }

    fn check(grammar: &Grammar<&'static str>, input: &str, expected: Expect) {
        let tree = grammar
            .parse(input)
            .unwrap_or_else(|err| panic!("{input:?} did not match: {err}"));
        expected.assert_eq(&format!("{tree:?}"));
    }

    #[test]
    fn literal_round_trip() {
        let tree = lit("foo").parse("foo").unwrap();
        assert_eq!(tree, Match::token("foo", Some(0..3)));
    }

    #[test]
    fn class_matches_one_scalar() {
        let grammar = Grammar::<&str>::class(CharSet::from_range('a'..='c'));
        assert_eq!(grammar.parse("a").unwrap(), Match::token("a", Some(0..1)));

        let err = grammar.parse("d").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Expected(_)));
        assert_eq!(err.offset(), Some(0));
        assert_eq!(
            err.to_string(),
            r#"Unexpected token "d" (expected character in 'a'..='c') at 0"#,
        );
    }

    #[test]
    fn literal_rejects_trailing_input() {
        let err = lit("foo").parse("foobar").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnexpectedToken));
        assert_eq!(err.remaining(), Some("bar"));
        assert_eq!(err.offset(), Some(3));
    }

    #[test]
    fn sequence_splices_token_children() {
        let grammar = Grammar::sequence([lit("a"), lit("b")]);
        let tree = grammar.parse("ab").unwrap();
        assert_eq!(
            tree,
            Match::node(
                None,
                vec![Match::token("a", Some(0..1)), Match::token("b", Some(1..2))],
            ),
        );
    }

    #[test]
    fn sequence_splices_unlabeled_nodes_but_not_labeled_ones() {
        let inner = Grammar::sequence([lit("a"), lit("b")]);
        let grammar = Grammar::sequence([inner.clone(), lit("c")]);
        check(
            &grammar,
            "abc",
            expect![[r#"
                - NODE@0..3
                    - TOKEN@0..1 "a"
                    - TOKEN@1..2 "b"
                    - TOKEN@2..3 "c"
            "#]],
        );

        let labeled = Grammar::sequence([Grammar::label("pair", inner), lit("c")]);
        check(
            &labeled,
            "abc",
            expect![[r#"
                - NODE@0..3
                    - "pair"@0..2
                        - TOKEN@0..1 "a"
                        - TOKEN@1..2 "b"
                    - TOKEN@2..3 "c"
            "#]],
        );
    }

    #[test]
    fn optional_on_missing_input() {
        let tree = Grammar::optional(lit("foo")).parse("").unwrap();
        assert_eq!(tree, Match::node(None, vec![]));
    }

    #[test]
    fn optional_inside_a_sequence() {
        let grammar = Grammar::sequence([Grammar::optional(lit("foo")), lit("bar")]);
        assert_eq!(
            grammar.parse("bar").unwrap(),
            Match::node(None, vec![Match::token("bar", Some(0..3))]),
        );
        assert_eq!(
            grammar.parse("foobar").unwrap(),
            Match::node(
                None,
                vec![
                    Match::token("foo", Some(0..3)),
                    Match::token("bar", Some(3..6)),
                ],
            ),
        );
    }

    #[test]
    fn zero_or_more_on_zero_occurrences() {
        let tree = Grammar::zero_or_more(lit("x")).parse("").unwrap();
        assert_eq!(tree, Match::node(None, vec![]));
    }

    #[test]
    fn zero_or_more_stops_on_non_advancing_iterations() {
        let grammar = Grammar::zero_or_more(Grammar::optional(lit("x")));
        assert_eq!(grammar.parse("").unwrap(), Match::node(None, vec![]));
        assert_eq!(
            grammar.parse("xx").unwrap(),
            Match::node(
                None,
                vec![Match::token("x", Some(0..1)), Match::token("x", Some(1..2))],
            ),
        );
    }

    #[test]
    fn one_or_more_requires_an_occurrence() {
        let grammar = Grammar::one_or_more(lit("foo"));
        assert_eq!(
            grammar.parse("foofoo").unwrap(),
            Match::node(
                None,
                vec![
                    Match::token("foo", Some(0..3)),
                    Match::token("foo", Some(3..6)),
                ],
            ),
        );

        let err = grammar.parse("").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Expected(_)));
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn class_repetition_fast_path_emits_per_scalar_tokens() {
        let fast = Grammar::zero_or_more(digit());
        check(
            &fast,
            "123",
            expect![[r#"
                - NODE@0..3
                    - TOKEN@0..1 "1"
                    - TOKEN@1..2 "2"
                    - TOKEN@2..3 "3"
            "#]],
        );

        // Same shape as the equivalent repetition over one-scalar literals.
        let slow = Grammar::zero_or_more(lit("1"));
        assert_eq!(
            slow.parse("111").unwrap(),
            Grammar::zero_or_more(Grammar::class(CharSet::from_char('1')))
                .parse("111")
                .unwrap(),
        );
    }

    #[test]
    fn alternation_takes_the_first_consuming_alternative() {
        let grammar = Grammar::any([lit("foo"), lit("bar")]);
        assert_eq!(grammar.parse("foo").unwrap(), Match::token("foo", Some(0..3)));
        assert_eq!(grammar.parse("bar").unwrap(), Match::token("bar", Some(0..3)));

        let grammar = Grammar::any([lit("foo"), lit("foobar")]);

        // Ordered choice: "foo" wins first and the rest of the input stays.
        let err = grammar.parse("foobar").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnexpectedToken));
        assert_eq!(err.remaining(), Some("bar"));

        let err = Grammar::any([lit("foo"), lit("bar")]).parse("").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Expected(_)));
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn alternation_skips_zero_width_alternatives() {
        let grammar = Grammar::any([Grammar::optional(lit("x")), lit("y")]);
        assert_eq!(grammar.parse("y").unwrap(), Match::token("y", Some(0..1)));
    }

    #[test]
    fn flatten_collapses_to_one_token() {
        let grammar = Grammar::flatten(Grammar::sequence([lit("foo"), lit("bar")]));
        assert_eq!(
            grammar.parse("foobar").unwrap(),
            Match::token("foobar", Some(0..6)),
        );
    }

    #[test]
    fn flatten_over_empty_input_has_no_range() {
        let grammar = Grammar::flatten(Grammar::optional(lit("foo")));
        assert_eq!(grammar.parse("").unwrap(), Match::token("", None));
    }

    #[test]
    fn flatten_includes_replacements_and_drops_discards() {
        let grammar = Grammar::flatten(Grammar::sequence([
            Grammar::discard(lit("<")),
            lit("a"),
            Grammar::replace(lit("&amp;"), "&"),
            lit("b"),
            Grammar::discard(lit(">")),
        ]));
        assert_eq!(
            grammar.parse("<a&amp;b>").unwrap(),
            Match::token("a&b", Some(0..9)),
        );
    }

    #[test]
    fn discard_produces_an_empty_node() {
        let grammar = Grammar::discard(lit("foo"));
        assert_eq!(grammar.parse("foo").unwrap(), Match::node(None, vec![]));
        assert!(grammar.parse("bar").is_err());

        let sequenced = Grammar::sequence([Grammar::discard(lit("(")), lit("x"), Grammar::discard(lit(")"))]);
        assert_eq!(
            sequenced.parse("(x)").unwrap(),
            Match::node(None, vec![Match::token("x", Some(1..2))]),
        );
    }

    #[test]
    fn replace_substitutes_the_token_text() {
        let grammar = Grammar::replace(lit("foo"), "X");
        assert_eq!(grammar.parse("foo").unwrap(), Match::token("X", Some(0..3)));
        assert!(grammar.parse("bar").is_err());

        let empty = Grammar::replace(Grammar::optional(lit("foo")), "X");
        assert_eq!(empty.parse("").unwrap(), Match::token("X", None));
    }

    #[test]
    fn label_wraps_sequences_and_tokens() {
        let sequence = Grammar::label("pair", Grammar::sequence([lit("a"), lit("b")]));
        assert_eq!(
            sequence.parse("ab").unwrap(),
            Match::node(
                Some("pair"),
                vec![Match::token("a", Some(0..1)), Match::token("b", Some(1..2))],
            ),
        );

        let token = Grammar::label("letter", lit("a"));
        assert_eq!(
            token.parse("a").unwrap(),
            Match::node(Some("letter"), vec![Match::token("a", Some(0..1))]),
        );
    }

    #[test]
    fn label_over_a_labeled_node_nests() {
        let grammar = Grammar::label("outer", Grammar::label("inner", lit("a")));
        check(
            &grammar,
            "a",
            expect![[r#"
                - "outer"@0..1
                    - "inner"@0..1
                        - TOKEN@0..1 "a"
            "#]],
        );
    }

    #[test]
    fn references_resolve_to_the_enclosing_label() {
        // balanced <- "(" balanced? ")"
        let balanced = Grammar::label(
            "balanced",
            Grammar::sequence([
                lit("("),
                Grammar::optional(Grammar::reference("balanced")),
                lit(")"),
            ]),
        );

        check(
            &balanced,
            "(())",
            expect![[r#"
                - "balanced"@0..4
                    - TOKEN@0..1 "("
                    - "balanced"@1..3
                        - TOKEN@1..2 "("
                        - TOKEN@2..3 ")"
                    - TOKEN@3..4 ")"
            "#]],
        );

        let err = balanced.parse("(()").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Expected(_)));
    }

    #[test]
    #[should_panic(expected = "unbound label")]
    fn unbound_reference_is_a_grammar_bug() {
        let grammar = Grammar::sequence([Grammar::reference("nowhere"), lit("a")]);
        let _ = grammar.parse("a");
    }

    #[test]
    fn farthest_failure_wins() {
        let grammar = Grammar::sequence([lit("foo"), Grammar::any([lit("bar"), lit("baz")])]);
        let err = grammar.parse("fooba!").unwrap_err();
        assert_eq!(err.offset(), Some(5));
        assert_eq!(err.remaining(), Some("!"));
        match err.kind() {
            ErrorKind::Expected(expected) => assert_eq!(expected.to_string(), r#""baz""#),
            other => panic!("expected an expectation, got {other:?}"),
        }
    }

    #[test]
    fn trailing_input_reports_the_deepest_attempt() {
        // The optional prefix gets to offset 1 before backtracking to a
        // zero-width success; the reported failure must not point earlier.
        let grammar = Grammar::optional(lit("ab"));
        let err = grammar.parse("ax").unwrap_err();
        assert_eq!(err.offset(), Some(1));
        match err.kind() {
            ErrorKind::Expected(expected) => assert_eq!(expected.to_string(), r#""ab""#),
            other => panic!("expected an expectation, got {other:?}"),
        }
    }

    #[test]
    fn error_offsets_never_regress() {
        let grammar = Grammar::sequence([
            Grammar::optional(Grammar::sequence([lit("a"), lit("bc")])),
            lit("ad"),
        ]);
        // The optional arm reaches offset 2 before failing; the sequence
        // then fails shallower, at offset 1.
        let err = grammar.parse("abd").unwrap_err();
        assert_eq!(err.offset(), Some(2));
    }

    #[test]
    fn mismatch_mid_literal_reports_the_literal() {
        let err = lit("foobar").parse("foobaz").unwrap_err();
        assert_eq!(err.offset(), Some(5));
        assert_eq!(err.to_string(), r#"Unexpected token "z" (expected "foobar") at 5"#);
    }

    #[test]
    fn empty_input_expectation_renders_without_a_token() {
        let err = lit("foo").parse("").unwrap_err();
        assert_eq!(err.to_string(), r#"Expected "foo""#);
    }

    #[test]
    fn unicode_offsets_count_scalars_not_bytes() {
        let grammar = Grammar::sequence([lit("ä"), lit("🦀"), lit("b")]);
        assert_eq!(
            grammar.parse("ä🦀b").unwrap(),
            Match::node(
                None,
                vec![
                    Match::token("ä", Some(0..1)),
                    Match::token("🦀", Some(1..2)),
                    Match::token("b", Some(2..3)),
                ],
            ),
        );

        let err = grammar.parse("ä🦀x").unwrap_err();
        assert_eq!(err.offset(), Some(2));
        assert_eq!(err.remaining(), Some("x"));
    }

    #[test]
    fn interleaved_items_and_separators() {
        let list = Grammar::interleaved(Grammar::flatten(Grammar::one_or_more(digit())), lit(","));
        check(
            &list,
            "1,22,333",
            expect![[r#"
                - NODE@0..8
                    - TOKEN@0..1 "1"
                    - TOKEN@1..2 ","
                    - TOKEN@2..4 "22"
                    - TOKEN@4..5 ","
                    - TOKEN@5..8 "333"
            "#]],
        );
        assert!(list.parse("1,").is_err());
        assert!(list.parse("").is_err());
    }

    #[test]
    fn errors_expose_their_parts() {
        let err = lit("foo").parse("fox").unwrap_err();
        assert_eq!(err.offset(), Some(2));
        assert_eq!(err.remaining(), Some("x"));
        assert_eq!(err.token(), Some("x".to_string()));
    }
}
