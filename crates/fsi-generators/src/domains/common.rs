//! Generators shared across domains: people, addresses, identifiers.
//!
//! These are registered after the domain catalogs, so a domain can override
//! any of them for its own tables.

use crate::base_enum::WeightedEnum;
use crate::context::GeneratorContext;
use crate::generators::numeric;
use crate::helpers::{self, lists};
use crate::registry::GeneratorRegistry;
use fsi_core::{GeneratedValue, GeneratorError, Row};
use rand::Rng;

/// Tables whose rows describe a natural person.
pub const PERSON_TABLES: &str =
    r"consumer_banking\.customers|mortgage_servicing\.borrowers|enterprise\.employees";

pub type FieldResult = Result<GeneratedValue, GeneratorError>;
pub type RecordResult = Result<Vec<(&'static str, GeneratedValue)>, GeneratorError>;

/// Weighted draw from an enum, as a field generator.
pub fn weighted<E>(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult
where
    E: WeightedEnum + Into<GeneratedValue>,
{
    Ok(E::random(ctx.rng()).into())
}

/// Read a column holding a stored enum value back into the enum.
pub fn parse_enum<E: WeightedEnum>(row: &Row, column: &str) -> Result<E, GeneratorError> {
    let value = row.require_str(column)?;
    E::from_db_value(value).ok_or_else(|| GeneratorError::Generator {
        table: row.table.clone(),
        column: column.to_string(),
        message: format!("unknown value '{value}'"),
    })
}

/// `PREFIX000000042`, unique per table because the row index only grows.
pub fn sequential_id(ctx: &GeneratorContext<'_>, prefix: &str) -> GeneratedValue {
    GeneratedValue::String(format!("{prefix}{:09}", ctx.index() + 1))
}

/// Escape a literal table name for registration.
pub fn exact(table: &str) -> String {
    regex::escape(table)
}

pub fn first_name(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    Ok(helpers::first_name(ctx.rng()).into())
}

pub fn last_name(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    Ok(helpers::last_name(ctx.rng()).into())
}

pub fn ssn(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    Ok(helpers::ssn(ctx.rng()).into())
}

pub fn phone_number(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    Ok(helpers::phone_number(ctx.rng()).into())
}

/// Personal email derived from the row's own names.
pub fn personal_email(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let first = row.require_str("first_name")?;
    let last = row.require_str("last_name")?;
    let domain = *helpers::pick(ctx.rng(), lists::EMAIL_DOMAINS);
    Ok(helpers::email(ctx.rng(), first, last, domain).into())
}

pub fn street_address(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    Ok(helpers::street_address(ctx.rng()).into())
}

/// City, state and a ZIP code that belong together.
pub fn city_state_zip(_: &Row, ctx: &mut GeneratorContext<'_>) -> RecordResult {
    let (city, state, zip) = helpers::city_state_zip(ctx.rng());
    Ok(vec![
        ("city", city.into()),
        ("state", state.into()),
        ("zip_code", zip.into()),
    ])
}

/// FICO-like score, roughly normal around 705.
pub fn credit_score(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let score = numeric::normal_clamped(ctx.rng(), 705.0, 75.0, 300.0, 850.0);
    Ok(GeneratedValue::Int64(score.round() as i64))
}

pub fn ein(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    Ok(helpers::ein(ctx.rng()).into())
}

pub fn routing_number(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    Ok(helpers::routing_number(ctx.rng()).into())
}

pub fn account_number(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let len = ctx.rng().random_range(10..=12);
    Ok(helpers::account_number(ctx.rng(), len).into())
}

/// Register the shared generators.
pub fn register(registry: &mut GeneratorRegistry) -> Result<(), GeneratorError> {
    registry
        .field(PERSON_TABLES, "first_name", "first_name", first_name)?
        .field(PERSON_TABLES, "last_name", "last_name", last_name)?
        .field(PERSON_TABLES, "ssn", "ssn", ssn)?
        .field(PERSON_TABLES, "email", "personal_email", personal_email)?
        .field(PERSON_TABLES, "credit_score", "credit_score", credit_score)?
        .field(".*", "phone_number", "phone_number", phone_number)?
        .field(".*", "street_address", "street_address", street_address)?
        .record(".*", "city|state|zip_code", "city_state_zip", city_state_zip)?
        .field(".*", "ein", "ein", ein)?
        .field(".*", "routing_number", "routing_number", routing_number)?
        .field(".*", "account_number", "account_number", account_number)?;
    Ok(())
}
