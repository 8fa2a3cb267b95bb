//! `${NAME}` parameter substitution inside template objects.
//!
//! # Syntax
//!
//! - `${NAME}` - replaced with the parameter value
//! - `$${NAME}` - produces literal `${NAME}` in output
//!
//! References to unknown parameters are left as written.

use serde_json::Value;
use std::collections::BTreeMap;

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Parameter reference: ${NAME}
    Reference(String),
}

/// Parse a string containing `${NAME}` references.
pub fn parse_references(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            literal.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // `$${` is the escape for a literal `${`
                    literal.push('$');
                } else {
                    literal.push_str("$$");
                }
            }
            Some('{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if closed {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Reference(name));
                } else {
                    // Unterminated: keep as text
                    literal.push_str("${");
                    literal.push_str(&name);
                }
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

/// Replace references to known parameters.
pub fn substitute(input: &str, values: &BTreeMap<String, String>) -> String {
    let mut result = String::with_capacity(input.len());
    for segment in parse_references(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Reference(name) => match values.get(&name) {
                Some(value) => result.push_str(value),
                None => {
                    result.push_str("${");
                    result.push_str(&name);
                    result.push('}');
                }
            },
        }
    }
    result
}

/// Substitute references in every string inside a JSON value.
pub fn substitute_value(value: &mut Value, values: &BTreeMap<String, String>) {
    match value {
        Value::String(s) => {
            if s.contains('$') {
                *s = substitute(s, values);
            }
        }
        Value::Array(items) => {
            for item in items {
                substitute_value(item, values);
            }
        }
        Value::Object(map) => {
            for item in map.values_mut() {
                substitute_value(item, values);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_literal_and_reference() {
        assert_eq!(
            parse_references("level=${LEVEL}!"),
            vec![
                Segment::Literal("level=".into()),
                Segment::Reference("LEVEL".into()),
                Segment::Literal("!".into()),
            ]
        );
    }

    #[test]
    fn escaped_dollar_is_literal() {
        assert_eq!(
            parse_references("$${LEVEL}"),
            vec![Segment::Literal("${LEVEL}".into())]
        );
    }

    #[test]
    fn double_dollar_without_brace_is_kept() {
        let v = values(&[("PRICE", "5")]);
        assert_eq!(substitute("cost $$5", &v), "cost $$5");
        assert_eq!(substitute("$$$${PRICE}", &v), "$$${PRICE}");
        assert_eq!(substitute("$$${PRICE}", &v), "$$5");
    }

    #[test]
    fn unterminated_reference_is_literal() {
        assert_eq!(
            parse_references("a ${OPEN"),
            vec![Segment::Literal("a ${OPEN".into())]
        );
    }

    #[test]
    fn substitutes_known_and_keeps_unknown() {
        let v = values(&[("HOST", "db")]);
        assert_eq!(substitute("${HOST}:${PORT}", &v), "db:${PORT}");
        assert_eq!(substitute("cost $5", &v), "cost $5");
    }

    #[test]
    fn substitutes_nested_json() {
        let v = values(&[("LEVEL", "debug")]);
        let mut doc = json!({
            "env": [{"name": "LEVEL", "value": "${LEVEL}"}],
            "replicas": 2,
            "args": ["--level=${LEVEL}"]
        });

        substitute_value(&mut doc, &v);

        assert_eq!(doc["env"][0]["value"], "debug");
        assert_eq!(doc["args"][0], "--level=debug");
        assert_eq!(doc["replicas"], 2);
    }
}
