//! A JSON parser built from the combinators: grammar, match, transform.
//!
//! Escape sequences are decoded by `replace` terms during matching, so the
//! reducer only ever sees finished text.

use anyhow::Result;
use gnaw::{BoxError, CharSet, Grammar, Value};

#[derive(Clone, Debug, PartialEq)]
enum Json {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Json>),
    Object(Vec<(String, Json)>),
}

/// Intermediate yields: object members are not values by themselves.
#[derive(Clone, Debug, PartialEq)]
enum Part {
    Value(Json),
    Member(String, Json),
}

#[derive(Debug, thiserror::Error)]
#[error("invalid number literal {0:?}")]
struct InvalidNumber(String);

fn ws() -> Grammar<&'static str> {
    Grammar::discard(Grammar::zero_or_more(Grammar::class(CharSet::from_chars(
        " \t\r\n",
    ))))
}

/// A token followed by optional whitespace.
fn padded(term: Grammar<&'static str>) -> Grammar<&'static str> {
    Grammar::sequence([term, ws()])
}

fn grammar() -> Grammar<&'static str> {
    let digit = Grammar::class(CharSet::from_range('0'..='9'));
    let one_to_nine = Grammar::class(CharSet::from_range('1'..='9'));

    let null = Grammar::label("null", Grammar::discard(Grammar::literal("null")));
    let boolean = Grammar::label(
        "bool",
        Grammar::literal("true") | Grammar::literal("false"),
    );

    let integer = Grammar::literal("0")
        | Grammar::flatten(Grammar::sequence([
            one_to_nine,
            Grammar::zero_or_more(digit.clone()),
        ]));
    let fraction = Grammar::sequence([
        Grammar::literal("."),
        Grammar::one_or_more(digit.clone()),
    ]);
    let exponent = Grammar::sequence([
        Grammar::literal("e") | Grammar::literal("E"),
        Grammar::optional(Grammar::literal("+") | Grammar::literal("-")),
        Grammar::one_or_more(digit),
    ]);
    let number = Grammar::label(
        "number",
        Grammar::flatten(Grammar::sequence([
            Grammar::optional(Grammar::literal("-")),
            integer,
            Grammar::optional(fraction),
            Grammar::optional(exponent),
        ])),
    );

    let escape = Grammar::any([
        Grammar::replace(Grammar::literal(r#"\""#), "\""),
        Grammar::replace(Grammar::literal(r"\\"), "\\"),
        Grammar::replace(Grammar::literal(r"\/"), "/"),
        Grammar::replace(Grammar::literal(r"\n"), "\n"),
        Grammar::replace(Grammar::literal(r"\t"), "\t"),
        Grammar::replace(Grammar::literal(r"\r"), "\r"),
    ]);
    let plain = Grammar::class(CharSet::from_chars("\"\\").complement());
    let string = Grammar::label(
        "string",
        Grammar::sequence([
            Grammar::discard(Grammar::literal("\"")),
            Grammar::flatten(Grammar::zero_or_more(Grammar::any([escape, plain]))),
            Grammar::discard(Grammar::literal("\"")),
        ]),
    );

    let comma = padded(Grammar::discard(Grammar::literal(",")));
    let array = Grammar::label(
        "array",
        Grammar::sequence([
            padded(Grammar::discard(Grammar::literal("["))),
            Grammar::optional(Grammar::interleaved(Grammar::reference("value"), comma.clone())),
            Grammar::discard(Grammar::literal("]")),
        ]),
    );

    let member = Grammar::label(
        "member",
        Grammar::sequence([
            padded(string.clone()),
            padded(Grammar::discard(Grammar::literal(":"))),
            Grammar::reference("value"),
        ]),
    );
    let object = Grammar::label(
        "object",
        Grammar::sequence([
            padded(Grammar::discard(Grammar::literal("{"))),
            Grammar::optional(Grammar::interleaved(member, comma)),
            Grammar::discard(Grammar::literal("}")),
        ]),
    );

    let value = Grammar::label(
        "value",
        padded(Grammar::any([object, array, string, number, boolean, null])),
    );
    Grammar::sequence([ws(), value])
}

fn reduce(label: &&'static str, mut values: Vec<Value<Part>>) -> Result<Option<Value<Part>>, BoxError> {
    let part = match *label {
        "null" => Part::Value(Json::Null),
        "bool" => match values.pop() {
            Some(Value::Text(text)) => Part::Value(Json::Bool(text == "true")),
            other => unreachable!("bool over {other:?}"),
        },
        "number" => match values.pop() {
            Some(Value::Text(text)) => {
                let number = text.parse().map_err(|_| InvalidNumber(text.clone()))?;
                Part::Value(Json::Number(number))
            }
            other => unreachable!("number over {other:?}"),
        },
        "string" => match values.pop() {
            Some(Value::Text(text)) => Part::Value(Json::String(text)),
            other => unreachable!("string over {other:?}"),
        },
        "array" => Part::Value(Json::Array(
            values
                .into_iter()
                .map(|value| match value {
                    Value::Custom(Part::Value(json)) => json,
                    other => unreachable!("array element {other:?}"),
                })
                .collect(),
        )),
        "member" => match (values.pop(), values.pop()) {
            (
                Some(Value::Custom(Part::Value(json))),
                Some(Value::Custom(Part::Value(Json::String(key)))),
            ) => Part::Member(key, json),
            other => unreachable!("member over {other:?}"),
        },
        "object" => Part::Value(Json::Object(
            values
                .into_iter()
                .map(|value| match value {
                    Value::Custom(Part::Member(key, json)) => (key, json),
                    other => unreachable!("object member {other:?}"),
                })
                .collect(),
        )),
        "value" => match values.pop() {
            Some(value @ Value::Custom(_)) => return Ok(Some(value)),
            other => unreachable!("value over {other:?}"),
        },
        other => unreachable!("label {other}"),
    };
    Ok(Some(Value::Custom(part)))
}

fn parse(input: &str) -> Result<Json> {
    let tree = grammar().parse(input)?;
    match tree.transform(&mut reduce)? {
        Some(Value::List(mut values)) => match values.pop() {
            Some(Value::Custom(Part::Value(json))) => Ok(json),
            other => anyhow::bail!("unexpected yield {other:?}"),
        },
        other => anyhow::bail!("unexpected yield {other:?}"),
    }
}

fn main() -> Result<()> {
    let document = r#"
        {
            "name": "gnaw",
            "versions": [0.1, 0.2],
            "stable": false,
            "description": "combinators, \"but\" as plain values\n",
            "homepage": null
        }
    "#;

    println!("{:#?}", parse(document)?);

    for broken in ["{\"key\" 1}", "[1, 2"] {
        match parse(broken) {
            Ok(json) => println!("{json:?}"),
            Err(err) => println!("error parsing {broken:?}: {err}"),
        }
    }

    Ok(())
}
