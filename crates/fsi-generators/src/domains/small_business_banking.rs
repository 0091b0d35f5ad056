//! Small business banking: businesses, their owners (consumer customers),
//! operating accounts, credit lines and international payees.

use super::common::{exact, parse_enum, sequential_id, weighted, FieldResult, RecordResult};
use super::consumer_banking::CUSTOMERS;
use crate::context::GeneratorContext;
use crate::generators::{numeric, timestamp};
use crate::helpers::{self, identifiers, lists};
use crate::registry::GeneratorRegistry;
use crate::weighted_enum;
use chrono::{Months, NaiveDate};
use fsi_core::{GeneratedValue, GeneratorError, Row};
use rand::Rng;

pub const BUSINESSES: &str = "small_business_banking.businesses";
pub const BUSINESS_OWNERS: &str = "small_business_banking.business_owners";
pub const BUSINESS_ACCOUNTS: &str = "small_business_banking.business_accounts";
pub const CREDIT_LINES: &str = "small_business_banking.credit_lines";
pub const INTERNATIONAL_PAYEES: &str = "small_business_banking.international_payees";

/// Prime rate credit line margins are quoted over.
pub const PRIME_RATE: f64 = 7.50;

weighted_enum! {
    pub enum BusinessStructure {
        SoleProprietorship => "Sole Proprietorship" @ 25,
        Partnership => "Partnership" @ 10,
        Llc => "LLC" @ 40,
        SCorporation => "S Corporation" @ 15,
        CCorporation => "C Corporation" @ 10,
    }
}

weighted_enum! {
    pub enum BusinessAccountType {
        Checking => "Business Checking" @ 55,
        Savings => "Business Savings" @ 15,
        MoneyMarket => "Business Money Market" @ 10,
        Payroll => "Payroll" @ 12,
        MerchantServices => "Merchant Services" @ 8,
    }
}

weighted_enum! {
    pub enum CreditLineStatus {
        Active => "Active" @ 80,
        PendingRenewal => "Pending Renewal" @ 5,
        Frozen => "Frozen" @ 3,
        Closed => "Closed" @ 10,
        Default => "In Default" @ 2,
    }
}

weighted_enum! {
    pub enum PayeeCountry {
        Mexico => "MX" @ 35,
        Canada => "CA" @ 20,
        China => "CN" @ 15,
        Germany => "DE" @ 8,
        India => "IN" @ 10,
        Japan => "JP" @ 5,
        UnitedKingdom => "GB" @ 7,
    }
}

impl BusinessStructure {
    /// Titles an owner can hold, the first being the principal's.
    fn owner_titles(self) -> &'static [&'static str] {
        match self {
            Self::SoleProprietorship => &["Owner"],
            Self::Partnership => &["Managing Partner", "General Partner", "Limited Partner"],
            Self::Llc => &["Managing Member", "Member"],
            Self::SCorporation | Self::CCorporation => {
                &["President", "Chief Executive Officer", "Chief Financial Officer", "Secretary", "Director"]
            }
        }
    }
}

fn primary_id(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let prefix = match ctx.column() {
        "business_id" => "BIZ",
        "account_id" => "BACC",
        "credit_line_id" => "LOC",
        _ => "PAY",
    };
    Ok(sequential_id(ctx, prefix))
}

fn business_fk(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    ctx.random_parent_key(BUSINESSES)
}

fn business_name(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    Ok(helpers::company_name(ctx.rng()).into())
}

/// NAICS code with its industry title.
fn naics(_: &Row, ctx: &mut GeneratorContext<'_>) -> RecordResult {
    let (code, industry) = *helpers::pick(ctx.rng(), lists::NAICS_INDUSTRIES);
    Ok(vec![("naics_code", code.into()), ("industry", industry.into())])
}

fn annual_revenue(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let revenue = numeric::log_uniform(ctx.rng(), 50_000.0, 25_000_000.0);
    Ok(GeneratedValue::money(numeric::round_to(revenue, 100.0)))
}

/// Headcount from revenue per employee.
fn employee_count(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let revenue = row.require_f64("annual_revenue")?;
    let per_employee = numeric::log_uniform(ctx.rng(), 60_000.0, 350_000.0);
    let count = (revenue / per_employee).round().max(1.0);
    Ok(GeneratedValue::Int64(count as i64))
}

fn established_date(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let start = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
    let end = timestamp::reference_date()
        .checked_sub_months(Months::new(12))
        .unwrap_or(start);
    Ok(timestamp::date_between(ctx.rng(), start, end).into())
}

/// A business owner is a consumer customer; each pair appears once.
fn owner_pair(_: &Row, ctx: &mut GeneratorContext<'_>) -> RecordResult {
    let (business_id, customer_id) = ctx.assign_unique_pair(BUSINESS_OWNERS, BUSINESSES, CUSTOMERS)?;
    Ok(vec![("business_id", business_id), ("customer_id", customer_id)])
}

fn business_structure_of(
    row: &Row,
    ctx: &GeneratorContext<'_>,
) -> Result<BusinessStructure, GeneratorError> {
    let business = ctx.lookup(row, "business_id", BUSINESSES)?;
    parse_enum(business, "business_structure")
}

/// Percentage already held by earlier owners of the row's business.
fn owned_so_far(row: &Row, ctx: &GeneratorContext<'_>) -> Result<(usize, f64), GeneratorError> {
    let business_id = row.require("business_id")?;
    let mut owners = 0;
    let mut held = 0.0;
    for owner in ctx.keys().find_rows(BUSINESS_OWNERS, "business_id", business_id) {
        owners += 1;
        held += owner
            .get("ownership_percentage")
            .and_then(GeneratedValue::as_f64)
            .unwrap_or(0.0);
    }
    Ok((owners, held))
}

/// Stakes never sum past 100% for a business. A sole proprietorship has a
/// single owner holding everything.
fn ownership_percentage(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let structure = business_structure_of(row, ctx)?;
    let (owners, held) = owned_so_far(row, ctx)?;

    if structure == BusinessStructure::SoleProprietorship {
        if owners > 0 {
            return Err(ctx.skip("sole proprietorship already has its owner"));
        }
        return Ok(GeneratedValue::decimal(100.0, 2));
    }

    let remaining = (100.0 - held).floor() as i64;
    if remaining < 1 {
        return Err(ctx.skip("business is fully owned"));
    }
    let stake = if owners == 0 {
        ctx.rng().random_range(remaining.min(25)..=remaining)
    } else {
        ctx.rng().random_range(1..=remaining)
    };
    Ok(GeneratedValue::decimal(stake as f64, 2))
}

/// The first owner holds the principal title.
fn owner_title(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let titles = business_structure_of(row, ctx)?.owner_titles();
    let (owners, _) = owned_so_far(row, ctx)?;
    match titles.split_first() {
        Some((principal, _)) if owners == 0 => Ok((*principal).into()),
        Some((principal, [])) => Ok((*principal).into()),
        Some((_, others)) => Ok((*helpers::pick(ctx.rng(), others)).into()),
        None => Ok(GeneratedValue::Null),
    }
}

/// A business banks with us only after it exists.
fn account_open_date(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let business = ctx.lookup(row, "business_id", BUSINESSES)?;
    let established = business.require_date("established_date")?;
    Ok(timestamp::date_between(ctx.rng(), established, timestamp::reference_date()).into())
}

/// Operating balance scaled to revenue.
fn account_balance(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let business = ctx.lookup(row, "business_id", BUSINESSES)?;
    let revenue = business.require_f64("annual_revenue")?;
    let share = numeric::float_range(ctx.rng(), 0.01, 0.20);
    Ok(GeneratedValue::money(revenue * share))
}

/// 5-20% of revenue, in whole thousands.
fn credit_limit(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let business = ctx.lookup(row, "business_id", BUSINESSES)?;
    let revenue = business.require_f64("annual_revenue")?;
    let share = numeric::float_range(ctx.rng(), 0.05, 0.20);
    let limit = numeric::round_to(revenue * share, 1_000.0).max(1_000.0);
    Ok(GeneratedValue::money(limit))
}

/// Utilization of the row's own limit, driven by the line's status.
fn outstanding_balance(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let limit = row.require_f64("credit_limit")?;
    let utilization = match parse_enum::<CreditLineStatus>(row, "credit_line_status")? {
        CreditLineStatus::Closed => 0.0,
        CreditLineStatus::Default => numeric::float_range(ctx.rng(), 0.80, 1.0),
        CreditLineStatus::Frozen => numeric::float_range(ctx.rng(), 0.30, 1.0),
        CreditLineStatus::Active | CreditLineStatus::PendingRenewal => {
            numeric::float_range(ctx.rng(), 0.0, 0.90)
        }
    };
    Ok(GeneratedValue::money(limit * utilization))
}

/// Prime plus a margin.
fn credit_line_rate(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let margin = numeric::float_range(ctx.rng(), 0.50, 6.00);
    Ok(GeneratedValue::decimal(PRIME_RATE + margin, 3))
}

fn credit_line_origination(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let business = ctx.lookup(row, "business_id", BUSINESSES)?;
    let established = business.require_date("established_date")?;
    let floor = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or(established);
    let start = established.max(floor);
    Ok(timestamp::date_between(ctx.rng(), start, timestamp::reference_date()).into())
}

fn credit_line_maturity(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let originated = row.require_date("origination_date")?;
    let term = *helpers::pick(ctx.rng(), &[12u32, 24, 36, 60]);
    Ok(timestamp::add_months(originated, term).into())
}

fn payee_name(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    Ok((*helpers::pick(ctx.rng(), lists::FOREIGN_SUPPLIERS)).into())
}

/// CLABE for Mexican payees; everyone else is paid by SWIFT alone.
fn clabe(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    if parse_enum::<PayeeCountry>(row, "country_code")? != PayeeCountry::Mexico {
        return Ok(GeneratedValue::Null);
    }
    let (bank_code, _) = *helpers::pick(ctx.rng(), lists::MEXICAN_BANKS);
    Ok(helpers::clabe(ctx.rng(), bank_code).into())
}

/// `BBBBCCLL` or `BBBBCCLLXXX`, with the payee's country in positions 5-6.
fn swift_code(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let country = row.require_str("country_code")?;
    let bank = identifiers::alpha_string(ctx.rng(), 4);
    let location = identifiers::alphanumeric_string(ctx.rng(), 2);
    let branch = if ctx.rng().random_bool(0.5) {
        identifiers::alphanumeric_string(ctx.rng(), 3)
    } else {
        String::new()
    };
    Ok(format!("{bank}{country}{location}{branch}").into())
}

/// Register the small business banking generators.
pub fn register(registry: &mut GeneratorRegistry) -> Result<(), GeneratorError> {
    let businesses = exact(BUSINESSES);
    let owners = exact(BUSINESS_OWNERS);
    let accounts = exact(BUSINESS_ACCOUNTS);
    let credit_lines = exact(CREDIT_LINES);
    let payees = exact(INTERNATIONAL_PAYEES);

    registry
        .field(&businesses, "business_id", "business_id", primary_id)?
        .field(&businesses, "business_name", "business_name", business_name)?
        .record(&businesses, "naics_code|industry", "naics", naics)?
        .field(&businesses, "business_structure", "business_structure", weighted::<BusinessStructure>)?
        .field(&businesses, "annual_revenue", "annual_revenue", annual_revenue)?
        .field(&businesses, "employee_count", "employee_count", employee_count)?
        .field(&businesses, "established_date", "established_date", established_date)?;

    registry
        .record(&owners, "business_id|customer_id", "business_owner_pair", owner_pair)?
        .field(&owners, "ownership_percentage", "ownership_percentage", ownership_percentage)?
        .field(&owners, "owner_title", "owner_title", owner_title)?;

    registry
        .field(&accounts, "account_id", "business_account_id", primary_id)?
        .field(&accounts, "business_id", "business_fk", business_fk)?
        .field(&accounts, "account_type", "business_account_type", weighted::<BusinessAccountType>)?
        .field(&accounts, "open_date", "business_account_open_date", account_open_date)?
        .field(&accounts, "current_balance", "business_balance", account_balance)?;

    registry
        .field(&credit_lines, "credit_line_id", "credit_line_id", primary_id)?
        .field(&credit_lines, "business_id", "business_fk", business_fk)?
        .field(&credit_lines, "credit_limit", "credit_limit", credit_limit)?
        .field(&credit_lines, "credit_line_status", "credit_line_status", weighted::<CreditLineStatus>)?
        .field(&credit_lines, "outstanding_balance", "outstanding_balance", outstanding_balance)?
        .field(&credit_lines, "interest_rate", "prime_plus_rate", credit_line_rate)?
        .field(&credit_lines, "origination_date", "credit_line_origination", credit_line_origination)?
        .field(&credit_lines, "maturity_date", "credit_line_maturity", credit_line_maturity)?;

    registry
        .field(&payees, "payee_id", "payee_id", primary_id)?
        .field(&payees, "business_id", "business_fk", business_fk)?
        .field(&payees, "payee_name", "payee_name", payee_name)?
        .field(&payees, "country_code", "payee_country", weighted::<PayeeCountry>)?
        .field(&payees, "clabe", "clabe", clabe)?
        .field(&payees, "swift_code", "swift_code", swift_code)?;

    Ok(())
}
