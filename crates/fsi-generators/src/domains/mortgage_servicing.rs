//! Mortgage servicing: borrowers, collateral, loans, escrow and the payment
//! history.
//!
//! Loan economics are derived rather than drawn: principal follows the
//! property's appraisal, the rate follows the borrower's credit, and every
//! payment splits into principal and interest from the amortization schedule.

use super::common::{exact, parse_enum, sequential_id, weighted, FieldResult, RecordResult};
use crate::base_enum::WeightedEnum;
use crate::context::GeneratorContext;
use crate::generators::{numeric, pattern, timestamp};
use crate::helpers;
use crate::registry::GeneratorRegistry;
use crate::weighted_enum;
use chrono::{Days, NaiveDate};
use fsi_core::{GeneratedValue, GeneratorError, Row};
use rand::Rng;

pub const BORROWERS: &str = "mortgage_servicing.borrowers";
pub const PROPERTIES: &str = "mortgage_servicing.properties";
pub const LOANS: &str = "mortgage_servicing.loans";
pub const ESCROW_ACCOUNTS: &str = "mortgage_servicing.escrow_accounts";
pub const PAYMENTS: &str = "mortgage_servicing.payments";

/// 2025 conforming loan limit; larger balances are jumbo.
pub const CONFORMING_LOAN_LIMIT: f64 = 766_550.0;

/// Days after the due date before a payment is reported late.
const GRACE_DAYS: u64 = 15;

weighted_enum! {
    pub enum EmploymentStatus {
        Employed => "Employed" @ 70,
        SelfEmployed => "Self-Employed" @ 15,
        Retired => "Retired" @ 12,
        Unemployed => "Unemployed" @ 3,
    }
}

weighted_enum! {
    pub enum PropertyType {
        SingleFamily => "Single Family" @ 65,
        Condo => "Condominium" @ 15,
        Townhouse => "Townhouse" @ 10,
        MultiFamily => "Multi-Family" @ 7,
        Manufactured => "Manufactured Home" @ 3,
    }
}

weighted_enum! {
    /// Jumbo is never drawn; it is assigned when the balance cannot conform.
    pub enum LoanType {
        Conventional => "Conventional" @ 62,
        Fha => "FHA" @ 20,
        Va => "VA" @ 12,
        Usda => "USDA" @ 6,
        Jumbo => "Jumbo" @ 0,
    }
}

weighted_enum! {
    pub enum LoanStatus {
        Current => "Current" @ 88,
        Delinquent30 => "30 Days Delinquent" @ 4,
        Delinquent60 => "60 Days Delinquent" @ 2,
        Delinquent90 => "90+ Days Delinquent" @ 1,
        Forbearance => "Forbearance" @ 2,
        Foreclosure => "Foreclosure" @ 1,
        PaidOff => "Paid Off" @ 2,
    }
}

weighted_enum! {
    pub enum PaymentStatus {
        OnTime => "On Time" @ 86,
        GracePeriod => "Paid in Grace Period" @ 8,
        Late => "Late" @ 6,
    }
}

impl PropertyType {
    /// Appraisal range in dollars.
    pub fn value_range(self) -> (f64, f64) {
        match self {
            Self::SingleFamily => (150_000.0, 1_500_000.0),
            Self::Condo => (120_000.0, 900_000.0),
            Self::Townhouse => (180_000.0, 950_000.0),
            Self::MultiFamily => (300_000.0, 2_000_000.0),
            Self::Manufactured => (60_000.0, 220_000.0),
        }
    }
}

impl LoanType {
    /// Loan-to-value range at origination.
    pub fn ltv_range(self) -> (f64, f64) {
        match self {
            Self::Conventional => (0.60, 0.95),
            Self::Fha => (0.90, 0.965),
            Self::Va => (0.90, 0.97),
            Self::Usda => (0.95, 0.97),
            Self::Jumbo => (0.60, 0.80),
        }
    }

    /// Base annual rate in percent before credit adjustments.
    pub fn base_rate(self) -> f64 {
        match self {
            Self::Conventional => 6.50,
            Self::Fha => 6.25,
            Self::Va => 6.00,
            Self::Usda => 6.10,
            Self::Jumbo => 6.85,
        }
    }
}

/// Level monthly payment that retires `principal` over `term_months`.
///
/// A zero rate amortizes straight-line.
pub fn amortized_payment(principal: f64, annual_rate_pct: f64, term_months: u32) -> f64 {
    if term_months == 0 {
        return principal;
    }
    let n = term_months as f64;
    let r = annual_rate_pct / 100.0 / 12.0;
    if r <= 0.0 {
        return principal / n;
    }
    principal * r / (1.0 - (1.0 + r).powf(-n))
}

/// Balance left after `paid` scheduled payments.
pub fn remaining_balance(principal: f64, annual_rate_pct: f64, term_months: u32, paid: u32) -> f64 {
    if paid >= term_months {
        return 0.0;
    }
    let r = annual_rate_pct / 100.0 / 12.0;
    let k = paid as f64;
    let balance = if r <= 0.0 {
        principal - principal / term_months as f64 * k
    } else {
        let payment = amortized_payment(principal, annual_rate_pct, term_months);
        let growth = (1.0 + r).powf(k);
        principal * growth - payment * (growth - 1.0) / r
    };
    balance.max(0.0)
}

/// Loan terms read back from a generated loan row.
struct LoanTerms {
    principal: f64,
    rate: f64,
    term: u32,
    origination: NaiveDate,
    maturity: NaiveDate,
    payment: f64,
}

impl LoanTerms {
    fn from_row(loan: &Row) -> Result<Self, GeneratorError> {
        Ok(Self {
            principal: loan.require_f64("original_principal")?,
            rate: loan.require_f64("interest_rate")?,
            term: loan.require_f64("term_months")? as u32,
            origination: loan.require_date("origination_date")?,
            maturity: loan.require_date("maturity_date")?,
            payment: loan.require_f64("monthly_payment")?,
        })
    }
}

fn primary_id(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let prefix = match ctx.column() {
        "borrower_id" => "BRW",
        "property_id" => "PROP",
        "loan_id" => "LOAN",
        "escrow_id" => "ESC",
        _ => "PMT",
    };
    Ok(sequential_id(ctx, prefix))
}

fn borrower_fk(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    ctx.random_parent_key(BORROWERS)
}

fn loan_fk(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    ctx.random_parent_key(LOANS)
}

/// Each property secures at most one loan.
fn property_fk(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    ctx.assign_unique("mortgage_servicing.loans.property_id", PROPERTIES)
}

/// Each loan has at most one escrow account.
fn escrow_loan_fk(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    ctx.assign_unique("mortgage_servicing.escrow_accounts.loan_id", LOANS)
}

fn annual_income(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let income = numeric::log_uniform(ctx.rng(), 28_000.0, 650_000.0);
    Ok(GeneratedValue::money(numeric::round_to(income, 100.0)))
}

fn appraised_value(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let (min, max) = parse_enum::<PropertyType>(row, "property_type")?.value_range();
    let value = numeric::log_uniform(ctx.rng(), min, max);
    Ok(GeneratedValue::money(numeric::round_to(value, 1_000.0)))
}

fn year_built(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let max_year = chrono::Datelike::year(&timestamp::reference_date()) as f64;
    let year = numeric::normal_clamped(ctx.rng(), 1986.0, 22.0, 1900.0, max_year);
    Ok(GeneratedValue::Int64(year.round() as i64))
}

fn loan_number(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let index = ctx.index();
    Ok(pattern::generate_pattern("{digits:10}", ctx.rng(), index).into())
}

/// Jumbo when even a 90% LTV loan on the property would not conform.
fn loan_type(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let property = ctx.lookup(row, "property_id", PROPERTIES)?;
    let value = property.require_f64("appraised_value")?;
    if value * 0.9 > CONFORMING_LOAN_LIMIT {
        return Ok(LoanType::Jumbo.into());
    }
    Ok(LoanType::random(ctx.rng()).into())
}

/// LTV-driven principal. Jumbo loans sit above the conforming limit; every
/// other type stays at or below it.
fn original_principal(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let property = ctx.lookup(row, "property_id", PROPERTIES)?;
    let value = property.require_f64("appraised_value")?;
    let loan_type = parse_enum::<LoanType>(row, "loan_type")?;
    let (min_ltv, max_ltv) = loan_type.ltv_range();
    let ltv = numeric::float_range(ctx.rng(), min_ltv, max_ltv);

    let raw = value * ltv;
    let principal = match loan_type {
        LoanType::Jumbo => raw.max(CONFORMING_LOAN_LIMIT + 1_000.0).min(value),
        _ => raw.min(CONFORMING_LOAN_LIMIT),
    };
    Ok(GeneratedValue::money(numeric::round_to(principal, 100.0)))
}

/// Base rate by product, priced for the borrower's credit, plus noise.
fn loan_interest_rate(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let loan_type = parse_enum::<LoanType>(row, "loan_type")?;
    let borrower = ctx.lookup(row, "borrower_id", BORROWERS)?;
    let score = borrower
        .get("credit_score")
        .and_then(GeneratedValue::as_i64)
        .unwrap_or(700);
    let adjustment = match score {
        760.. => -0.25,
        700..=759 => 0.0,
        640..=699 => 0.50,
        _ => 1.00,
    };
    let noise = numeric::float_range(ctx.rng(), -0.375, 0.375);
    let rate = (loan_type.base_rate() + adjustment + noise).max(2.0);
    Ok(GeneratedValue::decimal(rate, 3))
}

fn term_months(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    const TERMS: &[(i64, u32)] = &[(360, 75), (180, 17), (240, 8)];
    let term = helpers::pick_weighted(ctx.rng(), TERMS).copied().unwrap_or(360);
    Ok(GeneratedValue::Int64(term))
}

fn origination_date(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let start = NaiveDate::from_ymd_opt(2005, 1, 1).unwrap_or(NaiveDate::MIN);
    Ok(timestamp::date_between(ctx.rng(), start, timestamp::reference_date()).into())
}

fn maturity_date(row: &Row, _: &mut GeneratorContext<'_>) -> FieldResult {
    let originated = row.require_date("origination_date")?;
    let term = row.require_f64("term_months")? as u32;
    Ok(timestamp::add_months(originated, term).into())
}

fn monthly_payment(row: &Row, _: &mut GeneratorContext<'_>) -> FieldResult {
    let principal = row.require_f64("original_principal")?;
    let rate = row.require_f64("interest_rate")?;
    let term = row.require_f64("term_months")? as u32;
    Ok(GeneratedValue::money(amortized_payment(principal, rate, term)))
}

/// Matured loans are paid off; the rest draw a servicing status.
fn loan_status(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let maturity = row.require_date("maturity_date")?;
    if maturity <= timestamp::reference_date() {
        return Ok(LoanStatus::PaidOff.into());
    }
    Ok(LoanStatus::random(ctx.rng()).into())
}

/// Tax and insurance are a share of the collateral's appraisal.
fn escrow_costs(row: &Row, ctx: &mut GeneratorContext<'_>) -> RecordResult {
    let loan = ctx.lookup(row, "loan_id", LOANS)?;
    let property = ctx.lookup(loan, "property_id", PROPERTIES)?;
    let value = property.require_f64("appraised_value")?;
    let tax = value * numeric::float_range(ctx.rng(), 0.006, 0.022);
    let insurance = value * numeric::float_range(ctx.rng(), 0.0025, 0.0065);
    Ok(vec![
        ("annual_property_tax", GeneratedValue::money(tax)),
        ("annual_insurance", GeneratedValue::money(insurance)),
    ])
}

fn monthly_escrow(row: &Row, _: &mut GeneratorContext<'_>) -> FieldResult {
    let tax = row.require_f64("annual_property_tax")?;
    let insurance = row.require_f64("annual_insurance")?;
    Ok(GeneratedValue::money((tax + insurance) / 12.0))
}

/// Installment number, the day it was paid and how late it was.
///
/// Only installments already due by the reference date are eligible; a
/// loan originated too recently to have one abandons the row.
fn payment_schedule(row: &Row, ctx: &mut GeneratorContext<'_>) -> RecordResult {
    let loan = ctx.lookup(row, "loan_id", LOANS)?;
    let terms = LoanTerms::from_row(loan)?;
    let status = parse_enum::<PaymentStatus>(row, "payment_status")?;

    let last_due = timestamp::reference_date()
        .checked_sub_days(Days::new(GRACE_DAYS * 4))
        .unwrap_or(terms.origination)
        .min(terms.maturity);
    let elapsed = timestamp::months_between(terms.origination, last_due).min(terms.term);
    if elapsed == 0 {
        return Err(ctx.skip(format!(
            "loan originated {} has no installment due yet",
            terms.origination
        )));
    }

    let installment = ctx.rng().random_range(1..=elapsed);
    let due = timestamp::add_months(terms.origination, installment);
    let days_late: u64 = match status {
        PaymentStatus::OnTime => 0,
        PaymentStatus::GracePeriod => ctx.rng().random_range(1..=GRACE_DAYS),
        PaymentStatus::Late => ctx.rng().random_range(GRACE_DAYS + 1..=GRACE_DAYS * 4),
    };
    let paid_on = due.checked_add_days(Days::new(days_late)).unwrap_or(due);

    Ok(vec![
        ("payment_number", GeneratedValue::Int64(installment as i64)),
        ("payment_date", paid_on.into()),
        ("days_late", GeneratedValue::Int64(days_late as i64)),
    ])
}

/// The loan's payment, plus escrow when the loan carries an escrow account.
fn scheduled_amount(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let loan_id = row.require("loan_id")?;
    let loan = ctx.parent_row(LOANS, "loan_id", loan_id)?;
    let payment = loan.require_f64("monthly_payment")?;
    let escrow = ctx
        .keys()
        .find_row(ESCROW_ACCOUNTS, "loan_id", loan_id)
        .and_then(|e| e.get("monthly_escrow"))
        .and_then(GeneratedValue::as_f64)
        .unwrap_or(0.0);
    Ok(GeneratedValue::money(payment + escrow))
}

/// Interest on the balance outstanding before this installment; the rest of
/// the loan payment retires principal.
fn principal_interest(row: &Row, ctx: &mut GeneratorContext<'_>) -> RecordResult {
    let loan = ctx.lookup(row, "loan_id", LOANS)?;
    let terms = LoanTerms::from_row(loan)?;
    let installment = row.require_f64("payment_number")? as u32;

    let balance = remaining_balance(
        terms.principal,
        terms.rate,
        terms.term,
        installment.saturating_sub(1),
    );
    let interest = balance * terms.rate / 100.0 / 12.0;
    let principal = (terms.payment - interest).clamp(0.0, balance);
    Ok(vec![
        ("principal_amount", GeneratedValue::money(principal)),
        ("interest_amount", GeneratedValue::money(interest)),
    ])
}

/// Register the mortgage servicing generators.
pub fn register(registry: &mut GeneratorRegistry) -> Result<(), GeneratorError> {
    let borrowers = exact(BORROWERS);
    let properties = exact(PROPERTIES);
    let loans = exact(LOANS);
    let escrow = exact(ESCROW_ACCOUNTS);
    let payments = exact(PAYMENTS);

    registry
        .field(&borrowers, "borrower_id", "borrower_id", primary_id)?
        .field(&borrowers, "annual_income", "annual_income", annual_income)?
        .field(&borrowers, "employment_status", "employment_status", weighted::<EmploymentStatus>)?;

    registry
        .field(&properties, "property_id", "property_id", primary_id)?
        .field(&properties, "property_type", "property_type", weighted::<PropertyType>)?
        .field(&properties, "appraised_value", "appraised_value", appraised_value)?
        .field(&properties, "year_built", "year_built", year_built)?;

    registry
        .field(&loans, "loan_id", "loan_id", primary_id)?
        .field(&loans, "borrower_id", "borrower_fk", borrower_fk)?
        .field(&loans, "property_id", "unique_property_fk", property_fk)?
        .field(&loans, "loan_number", "loan_number", loan_number)?
        .field(&loans, "loan_type", "loan_type", loan_type)?
        .field(&loans, "original_principal", "original_principal", original_principal)?
        .field(&loans, "interest_rate", "mortgage_rate", loan_interest_rate)?
        .field(&loans, "term_months", "term_months", term_months)?
        .field(&loans, "origination_date", "origination_date", origination_date)?
        .field(&loans, "maturity_date", "maturity_date", maturity_date)?
        .field(&loans, "monthly_payment", "monthly_payment", monthly_payment)?
        .field(&loans, "loan_status", "loan_status", loan_status)?;

    registry
        .field(&escrow, "escrow_id", "escrow_id", primary_id)?
        .field(&escrow, "loan_id", "unique_loan_fk", escrow_loan_fk)?
        .record(&escrow, "annual_property_tax|annual_insurance", "escrow_costs", escrow_costs)?
        .field(&escrow, "monthly_escrow", "monthly_escrow", monthly_escrow)?;

    registry
        .field(&payments, "payment_id", "payment_id", primary_id)?
        .field(&payments, "loan_id", "loan_fk", loan_fk)?
        .field(&payments, "payment_status", "payment_status", weighted::<PaymentStatus>)?
        .record(&payments, "payment_number|payment_date|days_late", "payment_schedule", payment_schedule)?
        .field(&payments, "scheduled_amount", "scheduled_amount", scheduled_amount)?
        .record(&payments, "principal_amount|interest_amount", "principal_interest", principal_interest)?;

    Ok(())
}
