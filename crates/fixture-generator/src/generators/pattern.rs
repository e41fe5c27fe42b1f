//! Pattern-based string generator.
//!
//! Expands a parsed [`Pattern`] against the random source and the current
//! [`GenerationContext`]. See [`fixture_core::pattern`] for the placeholder
//! grammar.

use super::identifiers;
use crate::context::GenerationContext;
use crate::generator::GeneratorError;
use chrono::Datelike;
use fixture_core::{CounterSource, Pattern, Placeholder, Segment};
use rand::seq::IndexedRandom;
use rand::Rng;

/// Parse and expand a pattern string.
pub fn generate_pattern<R: Rng>(
    field: &str,
    pattern: &str,
    rng: &mut R,
    ctx: &GenerationContext<'_>,
) -> Result<String, GeneratorError> {
    let parsed = Pattern::parse(pattern).map_err(|source| GeneratorError::InvalidPattern {
        field: field.to_string(),
        source,
    })?;
    expand_pattern(field, &parsed, rng, ctx)
}

/// Expand an already parsed pattern.
pub fn expand_pattern<R: Rng>(
    field: &str,
    pattern: &Pattern,
    rng: &mut R,
    ctx: &GenerationContext<'_>,
) -> Result<String, GeneratorError> {
    let mut result = String::with_capacity(pattern.as_str().len() + 16);

    for segment in pattern.segments() {
        match segment {
            Segment::Literal(text) => result.push_str(text),
            Segment::Placeholder(placeholder) => {
                let text = expand_placeholder(field, placeholder, rng, ctx)?;
                result.push_str(&text);
            }
        }
    }

    Ok(result)
}

fn expand_placeholder<R: Rng>(
    field: &str,
    placeholder: &Placeholder,
    rng: &mut R,
    ctx: &GenerationContext<'_>,
) -> Result<String, GeneratorError> {
    let outside = |depth: usize| GeneratorError::ContextOutsideGroup {
        field: field.to_string(),
        depth,
    };

    let text = match placeholder {
        Placeholder::Counter(counter) => {
            let raw = match counter.source {
                CounterSource::Index => ctx.index,
                CounterSource::Item { depth } => ctx.item(depth).ok_or_else(|| outside(depth))?,
            };
            counter.render(raw)
        }
        Placeholder::Label { depth, lower } => {
            let label = ctx.label(*depth).ok_or_else(|| outside(*depth))?;
            if *lower {
                label.to_lowercase()
            } else {
                label.to_string()
            }
        }
        Placeholder::Prior => {
            let prior = if ctx.index <= 1 {
                1
            } else {
                rng.random_range(1..=ctx.index)
            };
            prior.to_string()
        }
        Placeholder::Uuid => identifiers::uuid_v4(rng).to_string(),
        Placeholder::Ip => identifiers::ipv4(rng),
        Placeholder::Mac => identifiers::mac(rng),
        Placeholder::Year => ctx.now.year().to_string(),
        Placeholder::RandDigits(len) => identifiers::random_digits(rng, *len),
        Placeholder::Hex(len) => identifiers::hex_string(rng, *len),
        Placeholder::Int { min, max, width } => {
            let value = if max <= min {
                *min
            } else {
                rng.random_range(*min..=*max)
            };
            format!("{value:0width$}", width = *width)
        }
        Placeholder::Pick(options) => options.choose(rng).cloned().unwrap_or_default(),
        Placeholder::Var(name) => ctx
            .var(name)
            .and_then(|v| v.to_text())
            .ok_or_else(|| GeneratorError::UnknownVariable {
                field: field.to_string(),
                name: name.clone(),
            })?,
    };

    Ok(text)
}
