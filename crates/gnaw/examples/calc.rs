//! An arithmetic evaluator: `sum` and `product` labels carry precedence,
//! parentheses recurse through a reference back to `sum`.

use anyhow::Result;
use gnaw::{BoxError, CharSet, Grammar, Value};

#[derive(Debug, thiserror::Error)]
#[error("division by zero")]
struct DivisionByZero;

/// sum     <- product (("+" | "-") product)*
/// product <- atom (("*" | "/") atom)*
/// atom    <- number | "(" sum ")"
fn grammar() -> Grammar<&'static str> {
    let digit = Grammar::class(CharSet::from_range('0'..='9'));
    let number = Grammar::label(
        "number",
        Grammar::flatten(Grammar::sequence([
            Grammar::optional(Grammar::literal("-")),
            Grammar::one_or_more(digit.clone()),
            Grammar::optional(Grammar::sequence([
                Grammar::literal("."),
                Grammar::one_or_more(digit),
            ])),
        ])),
    );

    let atom = Grammar::any([
        number,
        Grammar::sequence([
            Grammar::discard(Grammar::literal("(")),
            Grammar::reference("sum"),
            Grammar::discard(Grammar::literal(")")),
        ]),
    ]);
    let product = Grammar::label(
        "product",
        Grammar::interleaved(atom, Grammar::class(CharSet::from_chars("*/"))),
    );

    Grammar::label(
        "sum",
        Grammar::interleaved(product, Grammar::class(CharSet::from_chars("+-"))),
    )
}

/// Fold `[operand, operator, operand, ...]` yields left to right.
fn fold(values: Vec<Value<f64>>) -> Result<f64, BoxError> {
    let mut values = values.into_iter();
    let mut total = match values.next() {
        Some(Value::Custom(operand)) => operand,
        other => unreachable!("operand yield {other:?}"),
    };
    while let Some(operator) = values.next() {
        let operand = match values.next() {
            Some(Value::Custom(operand)) => operand,
            other => unreachable!("operand yield {other:?}"),
        };
        total = match operator {
            Value::Text(operator) => match operator.as_str() {
                "+" => total + operand,
                "-" => total - operand,
                "*" => total * operand,
                "/" if operand == 0.0 => return Err(DivisionByZero.into()),
                "/" => total / operand,
                other => unreachable!("operator {other}"),
            },
            other => unreachable!("operator yield {other:?}"),
        };
    }
    Ok(total)
}

fn eval(input: &str) -> Result<f64> {
    let tree = grammar().parse(input)?;
    let value = tree.transform::<f64, _>(&mut |label, values| match *label {
        "number" => match &values[..] {
            [Value::Text(text)] => Ok(Some(Value::Custom(text.parse()?))),
            other => unreachable!("number over {other:?}"),
        },
        _ => Ok(Some(Value::Custom(fold(values)?))),
    })?;
    match value {
        Some(Value::Custom(total)) => Ok(total),
        other => anyhow::bail!("unexpected yield {other:?}"),
    }
}

fn main() -> Result<()> {
    for input in ["1+2*3", "2*(3+4)-6/3", "-4*-4", "10/(5-5)"] {
        match eval(input) {
            Ok(total) => println!("{input} = {total}"),
            Err(err) => println!("{input} does not evaluate: {err}"),
        }
    }
    Ok(())
}
