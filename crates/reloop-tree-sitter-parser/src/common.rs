/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Leaf nodes: identifiers and literals.

use reloop_ast::expr::{Identifier, Literal, LiteralValue};
use reloop_common::ReloopError;
use tree_sitter::Node;

use crate::{error::ParserError, FromTreeSitter, ParserCtx};

///Source text of `node`.
pub fn node_text<'d>(
    ctx: &ParserCtx,
    dta: &'d [u8],
    node: &Node,
) -> Result<&'d str, ReloopError<ParserError>> {
    node.utf8_text(dta).map_err(|e| {
        ReloopError::error_here(
            ParserError::Utf8ParseError(e),
            ctx.span(node),
            "UTF-8 Parser error here",
        )
    })
}

impl FromTreeSitter for Identifier {
    fn parse(
        ctx: &mut ParserCtx,
        dta: &[u8],
        node: &Node,
    ) -> Result<Self, ReloopError<ParserError>>
    where
        Self: Sized,
    {
        match node.kind() {
            "identifier"
            | "property_identifier"
            | "shorthand_property_identifier"
            | "undefined" => {}
            _ => return Err(ParserError::unsupported(ctx, node)),
        }

        let name = node_text(ctx, dta, node)?;
        if name.is_empty() {
            return Err(ReloopError::error_here(
                ParserError::MissingNode {
                    kind: "identifier".to_owned(),
                },
                ctx.span(node),
                "empty identifier",
            ));
        }

        Ok(Identifier {
            span: ctx.span(node),
            name: name.to_owned(),
        })
    }
}

impl FromTreeSitter for Literal {
    fn parse(
        ctx: &mut ParserCtx,
        dta: &[u8],
        node: &Node,
    ) -> Result<Self, ReloopError<ParserError>>
    where
        Self: Sized,
    {
        let text = node_text(ctx, dta, node)?;
        let value = match node.kind() {
            "true" => LiteralValue::Boolean(true),
            "false" => LiteralValue::Boolean(false),
            "null" => LiteralValue::Null,
            "regex" => LiteralValue::RegExp(text.to_owned()),
            "string" => LiteralValue::String(string_content(text)),
            "number" => {
                if text.ends_with('n') {
                    LiteralValue::Other {
                        kind: "BigInt".to_owned(),
                        raw: text.to_owned(),
                    }
                } else {
                    match parse_number(text) {
                        Some(n) => LiteralValue::Number(n),
                        None => {
                            return Err(ReloopError::error_here(
                                ParserError::ParseNumberLiteral {
                                    literal: text.to_owned(),
                                },
                                ctx.span(node),
                                "not a number",
                            ))
                        }
                    }
                }
            }
            _ => return Err(ParserError::unsupported(ctx, node)),
        };

        Ok(Literal {
            span: ctx.span(node),
            value,
        })
    }
}

///Strips the quotes of a string literal. Single quoted content is converted, so it can be
/// printed between double quotes again.
pub fn string_content(text: &str) -> String {
    let quote = text.chars().next();
    let inner = text
        .get(1..text.len().saturating_sub(1))
        .unwrap_or_default();

    if quote != Some('\'') {
        return inner.to_owned();
    }

    let mut converted = String::with_capacity(inner.len());
    let mut inner_chars = inner.chars();
    while let Some(c) = inner_chars.next() {
        match c {
            '\\' => match inner_chars.next() {
                Some('\'') => converted.push('\''),
                Some(escaped) => {
                    converted.push('\\');
                    converted.push(escaped);
                }
                None => converted.push('\\'),
            },
            '"' => converted.push_str("\\\""),
            other => converted.push(other),
        }
    }
    converted
}

///Parses a JavaScript numeric literal (decimal, hex, octal, binary, with `_` separators).
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();

    let radix_part = |prefix_len: usize, radix: u32| {
        u128::from_str_radix(&cleaned[prefix_len..], radix)
            .ok()
            .map(|v| v as f64)
    };

    let lower = cleaned.to_ascii_lowercase();
    if lower.starts_with("0x") {
        radix_part(2, 16)
    } else if lower.starts_with("0o") {
        radix_part(2, 8)
    } else if lower.starts_with("0b") {
        radix_part(2, 2)
    } else if cleaned.len() > 1
        && cleaned.starts_with('0')
        && cleaned.chars().all(|c| ('0'..='7').contains(&c))
    {
        //legacy octal like 017
        radix_part(1, 8)
    } else {
        cleaned.parse::<f64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_number, string_content};

    #[test]
    fn number_forms() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("0x1F"), Some(31.0));
        assert_eq!(parse_number("0b101"), Some(5.0));
        assert_eq!(parse_number("0o17"), Some(15.0));
        assert_eq!(parse_number("017"), Some(15.0));
        assert_eq!(parse_number("1_000"), Some(1000.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("089"), Some(89.0));
    }

    #[test]
    fn single_quoted_strings_are_converted() {
        assert_eq!(string_content("\"a\\\"b\""), "a\\\"b");
        assert_eq!(string_content("'it\\'s'"), "it's");
        assert_eq!(string_content("'say \"hi\"'"), "say \\\"hi\\\"");
        assert_eq!(string_content("'a\\nb'"), "a\\nb");
        assert_eq!(string_content("''"), "");
    }
}
