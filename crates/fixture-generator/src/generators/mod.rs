//! Individual value generators.
//!
//! This module provides the generation logic for each value kind based on
//! the generator configuration from the template.

pub mod column;
pub mod identifiers;
pub mod numeric;
pub mod pattern;
pub mod repeated;
pub mod timestamp;

use crate::context::GenerationContext;
use crate::generator::GeneratorError;
use fixture_core::{GeneratorConfig, Value};
use rand::seq::IndexedRandom;
use rand::Rng;

/// Generate a value based on the generator configuration.
///
/// `field` is used for index-keyed kinds (`unique`, `constant`) and for
/// error reporting.
pub fn generate_value<R: Rng>(
    field: &str,
    config: &GeneratorConfig,
    rng: &mut R,
    ctx: &GenerationContext<'_>,
) -> Result<Value, GeneratorError> {
    let value = match config {
        GeneratorConfig::Unique => Value::String(column::unique_value(ctx.index, field)),

        GeneratorConfig::Cyclic { values } => column::cyclic_value(field, ctx.index, values)?,

        GeneratorConfig::Constant { value } => column::constant_value(field, value.as_ref()),

        GeneratorConfig::IntRange { min, max } => numeric::generate_int_range(rng, *min, *max),

        GeneratorConfig::FloatRange { min, max, decimals } => {
            numeric::generate_float_range(rng, *min, *max, *decimals)
        }

        GeneratorConfig::WeightedBool { true_weight } => {
            numeric::generate_weighted_bool(rng, *true_weight)
        }

        GeneratorConfig::OneOf { values } => values
            .choose(rng)
            .cloned()
            .ok_or_else(|| GeneratorError::EmptyCandidates(field.to_string()))?,

        GeneratorConfig::DaysAgo { days, format } => {
            timestamp::generate_days_ago(field, rng, ctx.now, *days, *format)?
        }

        GeneratorConfig::Now { format } => timestamp::render_instant(ctx.now, *format),

        GeneratorConfig::Pattern { pattern } => Value::String(match ctx.pattern(pattern) {
            Some(parsed) => pattern::expand_pattern(field, parsed, rng, ctx)?,
            None => pattern::generate_pattern(field, pattern, rng, ctx)?,
        }),

        GeneratorConfig::UuidV4 => Value::String(identifiers::uuid_v4(rng).to_string()),

        GeneratorConfig::ObjectId => Value::String(identifiers::object_id(rng)),

        GeneratorConfig::Ipv4 => Value::String(identifiers::ipv4(rng)),

        GeneratorConfig::Mac => Value::String(identifiers::mac(rng)),

        GeneratorConfig::Item { offset } => {
            let item = ctx.item(0).ok_or_else(|| GeneratorError::ContextOutsideGroup {
                field: field.to_string(),
                depth: 0,
            })?;
            Value::Int((item as i64).saturating_add(*offset))
        }

        GeneratorConfig::Label => {
            let label = ctx.label(0).ok_or_else(|| GeneratorError::ContextOutsideGroup {
                field: field.to_string(),
                depth: 0,
            })?;
            Value::string(label)
        }

        GeneratorConfig::Var { name } => {
            ctx.var(name)
                .cloned()
                .ok_or_else(|| GeneratorError::UnknownVariable {
                    field: field.to_string(),
                    name: name.clone(),
                })?
        }

        GeneratorConfig::Null => Value::Null,
    };

    Ok(value)
}
