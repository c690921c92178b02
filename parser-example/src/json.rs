use common_framework::{Error, Result};
use parser_framework::{production, token, ArrayProduction, Production};
use parser_framework::{choice, ordered_choice, sequence};
use pipeline_core::{CombinatorSpec, Parser};
use serde_json::{Map, Number, Value};
use tracing::debug;

const NOTATION: &str = "JSON";

const STRING: &str = r#""(?:\\(?:["\\/bfnrt]|u[0-9a-fA-F]{4})|[^"\\\x00-\x1F\x7F])*""#;
const NUMBER: &str = r"-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?";

/// Builds the JSON grammar. The entry production is `value`.
pub fn parser() -> Result<Parser> {
    CombinatorSpec::new()
        .lexical_pattern("jsonString", STRING)?
        .lexical_pattern("jsonNumber", NUMBER)?
        .ignore_pattern(r"\s+")?
        .production(
            "object",
            ordered_choice!(
                sequence!("{", production("members"), "}"),
                sequence!("{", "}")
            ),
        )?
        .production(
            "members",
            ordered_choice!(
                sequence!(production("member"), ",", production("members")),
                production("member")
            ),
        )?
        .production(
            "member",
            sequence!(token("jsonString"), ":", production("value")),
        )?
        .production(
            "array",
            ordered_choice!(
                sequence!("[", production("elements"), "]"),
                sequence!("[", "]")
            ),
        )?
        .production(
            "elements",
            ordered_choice!(
                sequence!(production("value"), ",", production("elements")),
                production("value")
            ),
        )?
        .production(
            "value",
            choice!(
                production("object"),
                production("array"),
                token("jsonString"),
                token("jsonNumber"),
                "true",
                "false",
                "null"
            ),
        )?
        .build()
}

/// Parses a complete JSON document.
pub fn parse_json(text: &str) -> Result<Value> {
    let tree = parser()?.parse_all("value", text)?;
    to_value(&tree)
}

/// Folds the body of a `value` production into a JSON value.
pub fn to_value(node: &Production) -> Result<Value> {
    match node {
        Production::Token(token) => match token.kind.name() {
            "null" => Ok(Value::Null),
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "jsonString" => string(token.value()).map(Value::String),
            "jsonNumber" => number(token.value()).map(Value::Number),
            _ => Err(defect("value", node)),
        },
        Production::Named(named) => match named.name() {
            "object" => object(named.node()),
            "array" => array(named.node()),
            "value" => to_value(named.node()),
            _ => Err(defect("value", node)),
        },
        Production::Array(_) => Err(defect("value", node)),
    }
}

fn object(node: &Production) -> Result<Value> {
    let mut map = Map::new();
    let mut next = brackets("object", node)?;
    while let Some(members) = next {
        let (member, rest) = list_item("members", members)?;
        let (key, value) = pair(member)?;
        if map.insert(key.clone(), value).is_some() {
            debug!(key = %key, "duplicate object key, keeping the last value");
        }
        next = rest;
    }
    Ok(Value::Object(map))
}

fn array(node: &Production) -> Result<Value> {
    let mut items = Vec::new();
    let mut next = brackets("array", node)?;
    while let Some(elements) = next {
        let (element, rest) = list_item("elements", elements)?;
        items.push(to_value(unwrap_named("value", element)?)?);
        next = rest;
    }
    Ok(Value::Array(items))
}

/// Returns the list production between a pair of brackets, if any.
fn brackets<'a>(context: &str, node: &'a Production) -> Result<Option<&'a Production>> {
    let parts = nodes(context, node)?;
    match parts.len() {
        2 => Ok(None),
        3 => parts
            .get(1)
            .map(Some)
            .ok_or_else(|| defect(context, node)),
        _ => Err(defect(context, node)),
    }
}

/// Splits one link of a right-recursive list into its item and the rest.
fn list_item<'a>(
    name: &str,
    node: &'a Production,
) -> Result<(&'a Production, Option<&'a Production>)> {
    let body = unwrap_named(name, node)?;
    match body {
        Production::Array(parts) if parts.len() == 3 => match (parts.get(0), parts.get(2)) {
            (Some(item), Some(rest)) => Ok((item, Some(rest))),
            _ => Err(defect(name, body)),
        },
        Production::Array(_) | Production::Token(_) => Err(defect(name, body)),
        Production::Named(_) => Ok((body, None)),
    }
}

fn pair(node: &Production) -> Result<(String, Value)> {
    let body = unwrap_named("member", node)?;
    let parts = nodes("member", body)?;
    match (parts.get(0), parts.get(2)) {
        (Some(Production::Token(key)), Some(value)) if parts.len() == 3 => {
            let key = string(key.value())?;
            Ok((key, to_value(unwrap_named("value", value)?)?))
        }
        _ => Err(defect("member", body)),
    }
}

fn unwrap_named<'a>(name: &str, node: &'a Production) -> Result<&'a Production> {
    match node {
        Production::Named(named) if named.name() == name => Ok(named.node()),
        _ => Err(defect(name, node)),
    }
}

fn nodes<'a>(context: &str, node: &'a Production) -> Result<&'a ArrayProduction> {
    node.as_array().ok_or_else(|| defect(context, node))
}

fn string(raw: &str) -> Result<String> {
    serde_json::from_str(raw).map_err(|err| Error::Structural {
        notation: NOTATION,
        production: "jsonString".to_string(),
        found: err.to_string(),
    })
}

fn number(raw: &str) -> Result<Number> {
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(n.into());
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Ok(n.into());
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| Error::Unsupported {
            notation: NOTATION,
            construct: format!("number {raw} outside the range of f64"),
        })
}

fn defect(production: &str, node: &Production) -> Error {
    Error::Structural {
        notation: NOTATION,
        production: production.to_string(),
        found: node.shape(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_prefer_integers() {
        assert_eq!(number("42").unwrap(), Number::from(42));
        assert_eq!(number("18446744073709551615").unwrap(), Number::from(u64::MAX));
        assert_eq!(number("-0").unwrap(), Number::from(0));
        assert_eq!(number("1.5e2").unwrap().as_f64(), Some(150.0));
    }

    #[test]
    fn test_strings_are_unescaped() {
        assert_eq!(string(r#""a\nb""#).unwrap(), "a\nb");
        assert_eq!(string(r#""é""#).unwrap(), "é");
    }
}
