//! Enterprise: the bank's own legal entities, org chart and general ledger.

use super::common::{exact, parse_enum, sequential_id, weighted, FieldResult, RecordResult};
use crate::base_enum::WeightedEnum;
use crate::context::GeneratorContext;
use crate::generators::{numeric, pattern, timestamp};
use crate::helpers::{self, lists};
use crate::registry::GeneratorRegistry;
use crate::weighted_enum;
use chrono::{Months, NaiveDate};
use fsi_core::{GeneratedValue, GeneratorError, Row};
use rand::Rng;

pub const LEGAL_ENTITIES: &str = "enterprise.legal_entities";
pub const DEPARTMENTS: &str = "enterprise.departments";
pub const EMPLOYEES: &str = "enterprise.employees";
pub const GL_ACCOUNTS: &str = "enterprise.gl_accounts";
pub const JOURNAL_ENTRIES: &str = "enterprise.journal_entries";

weighted_enum! {
    pub enum EntityType {
        HoldingCompany => "Bank Holding Company" @ 10,
        NationalBank => "National Bank" @ 25,
        BrokerDealer => "Broker-Dealer" @ 15,
        InsuranceAgency => "Insurance Agency" @ 10,
        MortgageCompany => "Mortgage Company" @ 15,
        SpecialPurposeVehicle => "Special Purpose Vehicle" @ 15,
        TrustCompany => "Trust Company" @ 10,
    }
}

weighted_enum! {
    pub enum EntityStatus {
        Active => "Active" @ 90,
        Inactive => "Inactive" @ 6,
        Dissolved => "Dissolved" @ 4,
    }
}

weighted_enum! {
    pub enum JobTitle {
        Teller => "Teller" @ 18,
        Analyst => "Analyst" @ 20,
        SeniorAnalyst => "Senior Analyst" @ 14,
        Associate => "Associate" @ 12,
        RelationshipManager => "Relationship Manager" @ 9,
        LoanOfficer => "Loan Officer" @ 8,
        ComplianceOfficer => "Compliance Officer" @ 6,
        VicePresident => "Vice President" @ 8,
        SeniorVicePresident => "Senior Vice President" @ 3,
        ManagingDirector => "Managing Director" @ 2,
    }
}

weighted_enum! {
    pub enum EmploymentStatus {
        Active => "Active" @ 88,
        OnLeave => "On Leave" @ 4,
        Terminated => "Terminated" @ 8,
    }
}

weighted_enum! {
    pub enum GlCategory {
        Asset => "Asset" @ 30,
        Liability => "Liability" @ 20,
        Equity => "Equity" @ 5,
        Revenue => "Revenue" @ 20,
        Expense => "Expense" @ 25,
    }
}

impl JobTitle {
    /// Annual salary band in dollars.
    pub fn salary_band(self) -> (f64, f64) {
        match self {
            Self::Teller => (32_000.0, 45_000.0),
            Self::Analyst => (65_000.0, 95_000.0),
            Self::SeniorAnalyst => (85_000.0, 120_000.0),
            Self::Associate => (110_000.0, 160_000.0),
            Self::RelationshipManager => (80_000.0, 140_000.0),
            Self::LoanOfficer => (60_000.0, 110_000.0),
            Self::ComplianceOfficer => (75_000.0, 130_000.0),
            Self::VicePresident => (140_000.0, 220_000.0),
            Self::SeniorVicePresident => (200_000.0, 320_000.0),
            Self::ManagingDirector => (300_000.0, 550_000.0),
        }
    }
}

impl GlCategory {
    /// Chart-of-accounts code range.
    pub fn code_range(self) -> (i64, i64) {
        match self {
            Self::Asset => (1000, 1999),
            Self::Liability => (2000, 2999),
            Self::Equity => (3000, 3999),
            Self::Revenue => (4000, 4999),
            Self::Expense => (5000, 5999),
        }
    }

    /// Whether the account normally carries a debit balance.
    pub fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }

    fn account_names(self) -> &'static [&'static str] {
        match self {
            Self::Asset => &[
                "Cash and Due from Banks",
                "Federal Funds Sold",
                "Investment Securities",
                "Commercial Loans",
                "Residential Mortgage Loans",
                "Consumer Loans",
                "Premises and Equipment",
                "Accrued Interest Receivable",
            ],
            Self::Liability => &[
                "Demand Deposits",
                "Savings Deposits",
                "Time Deposits",
                "Federal Funds Purchased",
                "Accrued Interest Payable",
                "Long-Term Debt",
            ],
            Self::Equity => &[
                "Common Stock",
                "Additional Paid-In Capital",
                "Retained Earnings",
                "Accumulated Other Comprehensive Income",
            ],
            Self::Revenue => &[
                "Interest Income on Loans",
                "Interest Income on Securities",
                "Service Charges on Deposits",
                "Card Interchange Income",
                "Mortgage Servicing Fees",
                "Wealth Management Fees",
            ],
            Self::Expense => &[
                "Salaries and Benefits",
                "Occupancy Expense",
                "Technology Expense",
                "Interest Expense on Deposits",
                "Provision for Credit Losses",
                "Professional Fees",
                "Marketing Expense",
            ],
        }
    }
}

fn gl_category_of(row: &Row) -> Result<GlCategory, GeneratorError> {
    parse_enum(row, "account_category")
}

fn primary_id(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let prefix = match ctx.column() {
        "entity_id" => "ENT",
        "department_id" => "DEPT",
        "employee_id" => "EMP",
        "gl_account_id" => "GL",
        _ => "JE",
    };
    Ok(sequential_id(ctx, prefix))
}

fn entity_fk(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    ctx.random_parent_key(LEGAL_ENTITIES)
}

fn department_fk(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    ctx.random_parent_key(DEPARTMENTS)
}

fn gl_account_fk(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    ctx.random_parent_key(GL_ACCOUNTS)
}

fn legal_name(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    Ok(helpers::company_name(ctx.rng()).into())
}

fn lei(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    Ok(helpers::lei(ctx.rng()).into())
}

/// Delaware dominates, as it does for real US incorporations.
fn jurisdiction(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    const JURISDICTIONS: &[(&str, u32)] = &[
        ("DE", 60),
        ("NY", 12),
        ("NC", 6),
        ("CA", 6),
        ("TX", 5),
        ("IL", 4),
        ("OH", 3),
        ("NV", 4),
    ];
    Ok(helpers::pick_weighted(ctx.rng(), JURISDICTIONS).copied().into())
}

fn incorporation_date(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let start = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap_or(NaiveDate::MIN);
    let end = timestamp::reference_date()
        .checked_sub_months(Months::new(24))
        .unwrap_or(start);
    Ok(timestamp::date_between(ctx.rng(), start, end).into())
}

fn department_name(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    Ok((*helpers::pick(ctx.rng(), lists::DEPARTMENTS)).into())
}

fn cost_center(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let index = ctx.index();
    Ok(pattern::generate_pattern("CC-{digits:5}", ctx.rng(), index).into())
}

/// Mail domain derived from the entity's legal name: `harbor-logistics.com`.
fn corporate_domain(legal_name: &str) -> String {
    let words: Vec<String> = legal_name
        .split_whitespace()
        .filter(|w| !lists::COMPANY_SUFFIXES.contains(w))
        .map(|w| {
            w.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return "example.com".to_string();
    }
    format!("{}.com", words.join("-"))
}

/// Work email on the employing entity's domain.
fn work_email(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let first = row.require_str("first_name")?;
    let last = row.require_str("last_name")?;
    let department = ctx.lookup(row, "department_id", DEPARTMENTS)?;
    let entity = ctx.lookup(department, "entity_id", LEGAL_ENTITIES)?;
    let domain = corporate_domain(entity.require_str("legal_name")?);
    Ok(helpers::email(ctx.rng(), first, last, &domain).into())
}

/// Hired after the employing entity was incorporated.
fn hire_date(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let department = ctx.lookup(row, "department_id", DEPARTMENTS)?;
    let entity = ctx.lookup(department, "entity_id", LEGAL_ENTITIES)?;
    let incorporated = entity.require_date("incorporation_date")?;
    let floor = NaiveDate::from_ymd_opt(1985, 1, 1).unwrap_or(incorporated);
    let start = incorporated.max(floor);
    Ok(timestamp::date_between(ctx.rng(), start, timestamp::reference_date()).into())
}

fn annual_salary(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let title = row.require_str("job_title")?;
    let title = JobTitle::from_db_value(title).unwrap_or(JobTitle::Analyst);
    let (min, max) = title.salary_band();
    let salary = numeric::round_to(numeric::float_range(ctx.rng(), min, max), 500.0);
    Ok(GeneratedValue::money(salary))
}

fn account_code(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let (min, max) = gl_category_of(row)?.code_range();
    Ok(numeric::int_range(ctx.rng(), min, max))
}

fn gl_account_name(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let names = gl_category_of(row)?.account_names();
    Ok((*helpers::pick(ctx.rng(), names)).into())
}

fn entry_date(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN);
    Ok(timestamp::date_between(ctx.rng(), start, timestamp::reference_date()).into())
}

/// Exactly one side of the entry is non-zero. The account's normal side is
/// used 70% of the time.
fn debit_credit(row: &Row, ctx: &mut GeneratorContext<'_>) -> RecordResult {
    let account = ctx.lookup(row, "gl_account_id", GL_ACCOUNTS)?;
    let category = gl_category_of(account)?;
    let normal_side = ctx.rng().random_bool(0.7);
    let is_debit = category.is_debit_normal() == normal_side;
    let amount = GeneratedValue::money(numeric::log_uniform(ctx.rng(), 10.0, 2_500_000.0));
    let zero = GeneratedValue::money(0.0);

    let (debit, credit) = if is_debit { (amount, zero) } else { (zero, amount) };
    Ok(vec![("debit_amount", debit), ("credit_amount", credit)])
}

fn journal_description(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let account = ctx.lookup(row, "gl_account_id", GL_ACCOUNTS)?;
    let name = account.require_str("account_name")?;
    let index = ctx.index();
    let verb = *helpers::pick(
        ctx.rng(),
        &["Record", "Accrue", "Adjust", "Reclassify", "Post month-end"],
    );
    let template = format!("{verb} {} - ref {{alnum:8}}", name.to_lowercase());
    Ok(pattern::generate_pattern(&template, ctx.rng(), index).into())
}

/// Posting employee. A ledger loaded without staff records NULL here.
fn posted_by(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    if ctx.keys().is_empty(EMPLOYEES) {
        return Ok(GeneratedValue::Null);
    }
    ctx.random_parent_key(EMPLOYEES)
}

/// Register the enterprise generators.
pub fn register(registry: &mut GeneratorRegistry) -> Result<(), GeneratorError> {
    let entities = exact(LEGAL_ENTITIES);
    let departments = exact(DEPARTMENTS);
    let employees = exact(EMPLOYEES);
    let gl_accounts = exact(GL_ACCOUNTS);
    let journal = exact(JOURNAL_ENTRIES);

    registry
        .field(&entities, "entity_id", "entity_id", primary_id)?
        .field(&entities, "legal_name", "legal_name", legal_name)?
        .field(&entities, "lei", "lei", lei)?
        .field(&entities, "entity_type", "entity_type", weighted::<EntityType>)?
        .field(&entities, "jurisdiction", "jurisdiction", jurisdiction)?
        .field(&entities, "incorporation_date", "incorporation_date", incorporation_date)?
        .field(&entities, "entity_status", "entity_status", weighted::<EntityStatus>)?;

    registry
        .field(&departments, "department_id", "department_id", primary_id)?
        .field(&departments, "entity_id", "entity_fk", entity_fk)?
        .field(&departments, "department_name", "department_name", department_name)?
        .field(&departments, "cost_center", "cost_center", cost_center)?;

    registry
        .field(&employees, "employee_id", "employee_id", primary_id)?
        .field(&employees, "department_id", "department_fk", department_fk)?
        .field(&employees, "email", "work_email", work_email)?
        .field(&employees, "job_title", "job_title", weighted::<JobTitle>)?
        .field(&employees, "hire_date", "hire_date", hire_date)?
        .field(&employees, "annual_salary", "annual_salary", annual_salary)?
        .field(&employees, "employment_status", "employment_status", weighted::<EmploymentStatus>)?;

    registry
        .field(&gl_accounts, "gl_account_id", "gl_account_id", primary_id)?
        .field(&gl_accounts, "entity_id", "entity_fk", entity_fk)?
        .field(&gl_accounts, "account_category", "gl_category", weighted::<GlCategory>)?
        .field(&gl_accounts, "account_code", "gl_account_code", account_code)?
        .field(&gl_accounts, "account_name", "gl_account_name", gl_account_name)?;

    registry
        .field(&journal, "journal_entry_id", "journal_entry_id", primary_id)?
        .field(&journal, "gl_account_id", "gl_account_fk", gl_account_fk)?
        .field(&journal, "entry_date", "entry_date", entry_date)?
        .record(&journal, "debit_amount|credit_amount", "debit_credit", debit_credit)?
        .field(&journal, "description", "journal_description", journal_description)?
        .field(&journal, "posted_by", "posted_by", posted_by)?;

    Ok(())
}
