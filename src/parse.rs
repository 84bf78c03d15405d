//! Parse polynomial expressions into [`Polynomial`] values
//!
//! The grammar lives in `polynomial.pest`. Evaluation happens while walking
//! the pest pairs: every sub-expression is folded into a polynomial right away
//! using the ring operations, so `(x-1)(x+1)` and `x^2 - 1` come out equal.

use num_complex::Complex64;
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;

use crate::defaults;
use crate::errors::{ParseError, SourceContext};
use crate::log::debug;
use crate::polynomial::Polynomial;
use crate::{PolynomialParser, Rule};

/// Parse an expression such as `x^10 - 1` or `(x - 1)(x + 2i)`
pub fn parse(source: &str) -> Result<Polynomial, ParseError> {
    parse_named("<input>", source)
}

/// Same as [`parse`], naming the source in diagnostics
pub fn parse_named(name: &str, source: &str) -> Result<Polynomial, ParseError> {
    let ctx = SourceContext::new(name, source);
    let mut pairs =
        PolynomialParser::parse(Rule::program, source).map_err(|e| syntax_error(&ctx, e))?;

    let program = pairs
        .next()
        .ok_or_else(|| missing(&ctx, 0, "empty expression"))?;
    let expr = program
        .into_inner()
        .find(|p| p.as_rule() == Rule::expr)
        .ok_or_else(|| missing(&ctx, 0, "empty expression"))?;

    let poly = eval_expr(&ctx, expr)?;
    debug!(degree = poly.degree(), "parsed polynomial");
    Ok(poly)
}

fn eval_expr(ctx: &SourceContext, pair: Pair<Rule>) -> Result<Polynomial, ParseError> {
    let start = pair.as_span().start();
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| missing(ctx, start, "expected a term"))?;
    let mut acc = eval_term(ctx, first)?;

    while let Some(op) = inner.next() {
        let at = op.as_span().start();
        let term = inner
            .next()
            .ok_or_else(|| missing(ctx, at, "expected a term after operator"))?;
        let value = eval_term(ctx, term)?;
        acc = match op.as_str() {
            "-" => acc - value,
            _ => acc + value,
        };
    }
    Ok(acc)
}

fn eval_term(ctx: &SourceContext, pair: Pair<Rule>) -> Result<Polynomial, ParseError> {
    let span = pair.as_span();
    let mut negate = false;
    let mut acc: Option<Polynomial> = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::negation => negate = !negate,
            Rule::factor => {
                let value = eval_factor(ctx, inner)?;
                acc = Some(match acc {
                    None => value,
                    Some(prev) => {
                        if prev.degree() + value.degree() > defaults::MAX_DEGREE {
                            return Err(ParseError::DegreeTooLarge {
                                max: defaults::MAX_DEGREE,
                                src: ctx.named_source(),
                                span: (span.start(), span.end() - span.start()).into(),
                            });
                        }
                        prev * value
                    }
                });
            }
            other => return Err(unexpected(ctx, &inner, other)),
        }
    }

    let acc = acc.ok_or_else(|| missing(ctx, span.start(), "expected a factor"))?;
    Ok(if negate { -acc } else { acc })
}

fn eval_factor(ctx: &SourceContext, pair: Pair<Rule>) -> Result<Polynomial, ParseError> {
    let span = pair.as_span();
    let mut inner = pair.into_inner();
    let primary = inner
        .next()
        .ok_or_else(|| missing(ctx, span.start(), "expected a value"))?;
    let base = eval_primary(ctx, primary)?;

    let Some(exponent) = inner.next() else {
        return Ok(base);
    };
    let n = parse_exponent(ctx, &exponent)?;
    if base.degree().saturating_mul(n as usize) > defaults::MAX_DEGREE {
        return Err(ParseError::DegreeTooLarge {
            max: defaults::MAX_DEGREE,
            src: ctx.named_source(),
            span: (span.start(), span.end() - span.start()).into(),
        });
    }
    Ok(base.power(n))
}

fn parse_exponent(ctx: &SourceContext, pair: &Pair<Rule>) -> Result<u32, ParseError> {
    let text = pair.as_str();
    match text.parse::<u32>() {
        Ok(n) if n <= defaults::MAX_EXPONENT => Ok(n),
        _ => Err(ParseError::ExponentTooLarge {
            exponent: text.to_string(),
            max: defaults::MAX_EXPONENT,
            src: ctx.named_source(),
            span: span_of(pair),
        }),
    }
}

fn eval_primary(ctx: &SourceContext, pair: Pair<Rule>) -> Result<Polynomial, ParseError> {
    match pair.as_rule() {
        Rule::variable => Ok(Polynomial::x()),
        Rule::number => {
            let value = parse_number(ctx, &pair, pair.as_str())?;
            Ok(Polynomial::constant(value))
        }
        Rule::imaginary => {
            let text = pair.as_str();
            let digits = &text[..text.len() - 1];
            let value = if digits.is_empty() {
                1.0
            } else {
                parse_number(ctx, &pair, digits)?
            };
            Ok(Polynomial::constant(Complex64::new(0.0, value)))
        }
        Rule::group => {
            let span = pair.as_span();
            let expr = pair
                .into_inner()
                .next()
                .ok_or_else(|| missing(ctx, span.start(), "empty parentheses"))?;
            eval_expr(ctx, expr)
        }
        other => Err(unexpected(ctx, &pair, other)),
    }
}

fn parse_number(ctx: &SourceContext, pair: &Pair<Rule>, text: &str) -> Result<f64, ParseError> {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::InvalidNumber {
            literal: pair.as_str().to_string(),
            src: ctx.named_source(),
            span: span_of(pair),
        }),
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

fn span_of(pair: &Pair<Rule>) -> miette::SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

fn syntax_error(ctx: &SourceContext, err: pest::error::Error<Rule>) -> ParseError {
    let span: miette::SourceSpan = match err.location {
        InputLocation::Pos(pos) => (pos, 0).into(),
        InputLocation::Span((start, end)) => (start, end - start).into(),
    };
    ParseError::Syntax {
        message: err.variant.message().into_owned(),
        src: ctx.named_source(),
        span,
    }
}

fn missing(ctx: &SourceContext, at: usize, message: &str) -> ParseError {
    ParseError::Syntax {
        message: message.to_string(),
        src: ctx.named_source(),
        span: (at, 0).into(),
    }
}

fn unexpected(ctx: &SourceContext, pair: &Pair<Rule>, rule: Rule) -> ParseError {
    ParseError::Syntax {
        message: format!("unexpected {:?}", rule),
        src: ctx.named_source(),
        span: span_of(pair),
    }
}
