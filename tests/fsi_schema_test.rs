//! Whole-schema integration tests.
//!
//! Generates every table of `schemas/fsi_schema.yaml` and checks the
//! properties downstream consumers rely on: referential integrity, valid
//! identifiers, unique assignments and cross-row financial consistency.

use fsi_core::{ColumnType, DatabaseSchema, GeneratedValue, KeyRegistry, Row};
use fsi_generators::base_enum::WeightedEnum;
use fsi_generators::domains::consumer_banking::TransactionType;
use fsi_generators::domains::mortgage_servicing::amortized_payment;
use fsi_generators::helpers::{
    aba_checksum_valid, clabe_checksum_valid, ein_valid, lei_checksum_valid, luhn_valid,
};
use fsi_generators::{default_registry, DataGenerator};
use fsi_populate_csv::{csv_path, CSVPopulator};
use std::collections::{HashMap, HashSet};
use tempfile::TempDir;

const SEED: u64 = 42;

fn load_schema() -> DatabaseSchema {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/schemas/fsi_schema.yaml");
    DatabaseSchema::from_file(path).expect("Failed to load schema")
}

fn generate_all(seed: u64) -> KeyRegistry {
    let schema = load_schema();
    let plan: Vec<(String, u64)> = schema
        .tables
        .iter()
        .map(|t| (t.name.clone(), t.rows))
        .collect();

    let mut generator = DataGenerator::new(schema, default_registry().unwrap(), seed);
    for (table, count) in plan {
        generator
            .generate_table(&table, count)
            .unwrap_or_else(|e| panic!("Failed to generate {table}: {e}"));
    }
    generator.into_keys()
}

fn text<'a>(row: &'a Row, column: &str) -> &'a str {
    row.get(column)
        .and_then(GeneratedValue::as_str)
        .unwrap_or_else(|| panic!("{}.{column} is not text: {row:?}", row.table))
}

fn number(row: &Row, column: &str) -> f64 {
    row.get(column)
        .and_then(GeneratedValue::as_f64)
        .unwrap_or_else(|| panic!("{}.{column} is not numeric: {row:?}", row.table))
}

fn values(keys: &KeyRegistry, table: &str, column: &str) -> HashSet<String> {
    keys.rows(table)
        .iter()
        .filter_map(|r| r.get(column))
        .map(ToString::to_string)
        .collect()
}

#[test]
fn test_every_table_is_populated() {
    let schema = load_schema();
    let keys = generate_all(SEED);

    for table in &schema.tables {
        let rows = keys.rows(&table.name);
        assert!(!rows.is_empty(), "{} generated no rows", table.name);
        assert!(rows.len() as u64 <= table.rows);

        for row in rows {
            for column in &table.columns {
                let value = row
                    .get(&column.name)
                    .unwrap_or_else(|| panic!("{}.{} missing", table.name, column.name));
                assert!(
                    column.nullable || !value.is_null(),
                    "{}.{} is NULL but not nullable",
                    table.name,
                    column.name
                );
            }
        }
    }
}

/// Whether the rendered decimal has at most `scale` fractional digits and
/// `precision - scale` integer digits.
fn fits_decimal(rendered: &str, precision: u8, scale: u8) -> bool {
    let unsigned = rendered.trim_start_matches('-');
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let int_digits = int_part.trim_start_matches('0').len();
    int_digits <= usize::from(precision.saturating_sub(scale)) && frac_part.len() <= usize::from(scale)
}

#[test]
fn test_values_fit_declared_types() {
    let schema = load_schema();
    let keys = generate_all(SEED);

    let mut violations = Vec::new();
    for table in &schema.tables {
        for row in keys.rows(&table.name) {
            for column in &table.columns {
                let Some(value) = row.get(&column.name).filter(|v| !v.is_null()) else {
                    continue;
                };
                let rendered = value.to_string();
                if let Some(max) = column.column_type.max_length() {
                    if rendered.chars().count() > max {
                        violations.push(format!(
                            "{}.{} longer than {max}: {rendered:?}",
                            table.name, column.name
                        ));
                    }
                }
                if let ColumnType::Decimal { precision, scale } = column.column_type {
                    if !fits_decimal(&rendered, precision, scale) {
                        violations.push(format!(
                            "{}.{} exceeds decimal({precision}, {scale}): {rendered}",
                            table.name, column.name
                        ));
                    }
                }
            }
        }
    }

    assert!(violations.is_empty(), "{violations:#?}");
}

#[test]
fn test_decimal_fit_check() {
    assert!(fits_decimal("1234.57", 6, 2));
    assert!(fits_decimal("-0.5", 3, 2));
    assert!(!fits_decimal("12345.57", 6, 2));
    assert!(!fits_decimal("1.234", 6, 2));
}

#[test]
fn test_foreign_keys_resolve() {
    let keys = generate_all(SEED);

    let references = [
        ("consumer_banking.accounts", "customer_id", "consumer_banking.customers", "customer_id"),
        ("consumer_banking.cards", "account_id", "consumer_banking.accounts", "account_id"),
        ("consumer_banking.transactions", "account_id", "consumer_banking.accounts", "account_id"),
        ("consumer_banking.account_holders", "account_id", "consumer_banking.accounts", "account_id"),
        ("consumer_banking.account_holders", "customer_id", "consumer_banking.customers", "customer_id"),
        ("enterprise.departments", "entity_id", "enterprise.legal_entities", "entity_id"),
        ("enterprise.employees", "department_id", "enterprise.departments", "department_id"),
        ("enterprise.gl_accounts", "entity_id", "enterprise.legal_entities", "entity_id"),
        ("enterprise.journal_entries", "gl_account_id", "enterprise.gl_accounts", "gl_account_id"),
        ("enterprise.journal_entries", "posted_by", "enterprise.employees", "employee_id"),
        ("mortgage_servicing.loans", "borrower_id", "mortgage_servicing.borrowers", "borrower_id"),
        ("mortgage_servicing.loans", "property_id", "mortgage_servicing.properties", "property_id"),
        ("mortgage_servicing.escrow_accounts", "loan_id", "mortgage_servicing.loans", "loan_id"),
        ("mortgage_servicing.payments", "loan_id", "mortgage_servicing.loans", "loan_id"),
        ("small_business_banking.business_owners", "business_id", "small_business_banking.businesses", "business_id"),
        ("small_business_banking.business_owners", "customer_id", "consumer_banking.customers", "customer_id"),
        ("small_business_banking.business_accounts", "business_id", "small_business_banking.businesses", "business_id"),
        ("small_business_banking.credit_lines", "business_id", "small_business_banking.businesses", "business_id"),
        ("small_business_banking.international_payees", "business_id", "small_business_banking.businesses", "business_id"),
    ];

    for (child, column, parent, parent_column) in references {
        let parents = values(&keys, parent, parent_column);
        for row in keys.rows(child) {
            let value = row.get(column).unwrap();
            if value.is_null() {
                continue;
            }
            assert!(
                parents.contains(&value.to_string()),
                "{child}.{column} = {value} has no row in {parent}"
            );
        }
    }
}

#[test]
fn test_primary_keys_unique() {
    let schema = load_schema();
    let keys = generate_all(SEED);

    for table in &schema.tables {
        let pks = keys.primary_keys(&table.name);
        let unique: HashSet<Vec<String>> = pks
            .iter()
            .map(|pk| pk.iter().map(ToString::to_string).collect())
            .collect();
        assert_eq!(unique.len(), pks.len(), "{} has duplicate keys", table.name);
    }
}

#[test]
fn test_identifiers_pass_checksums() {
    let keys = generate_all(SEED);

    for row in keys.rows("consumer_banking.cards") {
        let number = text(row, "card_number");
        assert!(luhn_valid(number), "bad card number {number}");
    }
    for table in ["consumer_banking.accounts", "small_business_banking.business_accounts"] {
        for row in keys.rows(table) {
            let routing = text(row, "routing_number");
            assert!(aba_checksum_valid(routing), "bad routing number {routing}");
        }
    }
    for row in keys.rows("enterprise.legal_entities") {
        assert!(lei_checksum_valid(text(row, "lei")));
        assert!(ein_valid(text(row, "ein")));
    }
    for row in keys.rows("small_business_banking.businesses") {
        assert!(ein_valid(text(row, "ein")));
    }

    let mut mexican = 0;
    for row in keys.rows("small_business_banking.international_payees") {
        let clabe = row.get("clabe").unwrap();
        if text(row, "country_code") == "MX" {
            mexican += 1;
            let clabe = clabe.as_str().unwrap();
            assert!(clabe_checksum_valid(clabe), "bad CLABE {clabe}");
        } else {
            assert!(clabe.is_null());
        }
    }
    assert!(mexican > 0);
}

#[test]
fn test_unique_assignments() {
    let keys = generate_all(SEED);

    let properties: Vec<_> = keys
        .rows("mortgage_servicing.loans")
        .iter()
        .map(|r| text(r, "property_id"))
        .collect();
    let unique: HashSet<_> = properties.iter().collect();
    assert_eq!(unique.len(), properties.len(), "a property carries two loans");

    let loans: Vec<_> = keys
        .rows("mortgage_servicing.escrow_accounts")
        .iter()
        .map(|r| text(r, "loan_id"))
        .collect();
    let unique: HashSet<_> = loans.iter().collect();
    assert_eq!(unique.len(), loans.len(), "a loan carries two escrow accounts");

    for (table, left, right) in [
        ("consumer_banking.account_holders", "account_id", "customer_id"),
        ("small_business_banking.business_owners", "business_id", "customer_id"),
    ] {
        let pairs: Vec<_> = keys
            .rows(table)
            .iter()
            .map(|r| (text(r, left), text(r, right)))
            .collect();
        let unique: HashSet<_> = pairs.iter().collect();
        assert_eq!(unique.len(), pairs.len(), "{table} repeats a pair");
    }
}

#[test]
fn test_ownership_never_exceeds_whole() {
    let keys = generate_all(SEED);

    let mut stakes: HashMap<&str, f64> = HashMap::new();
    for row in keys.rows("small_business_banking.business_owners") {
        let pct = number(row, "ownership_percentage");
        assert!(pct > 0.0 && pct <= 100.0);
        *stakes.entry(text(row, "business_id")).or_default() += pct;
    }
    for (business, total) in stakes {
        assert!(total <= 100.0 + 1e-6, "{business} is {total}% owned");
    }
}

#[test]
fn test_mortgage_figures_consistent() {
    let keys = generate_all(SEED);

    let loans: HashMap<&str, &Row> = keys
        .rows("mortgage_servicing.loans")
        .iter()
        .map(|r| (text(r, "loan_id"), r))
        .collect();

    for loan in loans.values() {
        let principal = number(loan, "original_principal");
        let rate = number(loan, "interest_rate");
        let term = number(loan, "term_months") as u32;
        let expected = amortized_payment(principal, rate, term);
        assert!((number(loan, "monthly_payment") - expected).abs() < 0.01);

        let origination = loan.get("origination_date").and_then(GeneratedValue::as_date);
        let maturity = loan.get("maturity_date").and_then(GeneratedValue::as_date);
        assert!(origination < maturity);
    }

    for payment in keys.rows("mortgage_servicing.payments") {
        let loan = loans[text(payment, "loan_id")];
        let monthly = number(loan, "monthly_payment");

        assert!(number(payment, "scheduled_amount") >= monthly - 0.005);

        let principal = number(payment, "principal_amount");
        let interest = number(payment, "interest_amount");
        assert!(principal >= 0.0 && interest >= 0.0);
        assert!(principal + interest <= monthly + 0.02);

        let days_late = number(payment, "days_late");
        match text(payment, "payment_status") {
            "On Time" => assert_eq!(days_late, 0.0),
            "Paid in Grace Period" => assert!((1.0..=15.0).contains(&days_late)),
            "Late" => assert!(days_late > 15.0),
            other => panic!("unexpected payment status {other}"),
        }

        let paid = payment.get("payment_date").and_then(GeneratedValue::as_date);
        let originated = loan.get("origination_date").and_then(GeneratedValue::as_date);
        assert!(paid > originated);
    }
}

#[test]
fn test_ledger_and_transaction_signs() {
    let keys = generate_all(SEED);

    for entry in keys.rows("enterprise.journal_entries") {
        let debit = number(entry, "debit_amount");
        let credit = number(entry, "credit_amount");
        assert!(
            (debit > 0.0) != (credit > 0.0),
            "entry must post exactly one side: {entry:?}"
        );
    }

    for txn in keys.rows("consumer_banking.transactions") {
        let kind = TransactionType::from_db_value(text(txn, "transaction_type")).unwrap();
        let amount = number(txn, "amount");
        if kind.is_credit() {
            assert!(amount >= 0.0, "credit with negative amount: {txn:?}");
        } else {
            assert!(amount <= 0.0, "debit with positive amount: {txn:?}");
        }

        let merchant = txn.get("merchant_name").unwrap();
        assert_eq!(kind == TransactionType::Purchase, !merchant.is_null());
    }
}

#[test]
fn test_same_seed_same_data() {
    let schema = load_schema();
    let first = generate_all(7);
    let second = generate_all(7);
    let other = generate_all(8);

    for table in &schema.tables {
        assert_eq!(first.rows(&table.name), second.rows(&table.name));
    }
    assert_ne!(
        first.rows("consumer_banking.customers"),
        other.rows("consumer_banking.customers")
    );
}

#[test]
fn test_csv_files_written_for_selected_tables() {
    let temp_dir = TempDir::new().unwrap();
    let schema = load_schema();
    let generator = DataGenerator::new(schema, default_registry().unwrap(), SEED);
    let mut populator = CSVPopulator::new(generator);

    let selected = vec![
        "consumer_banking.customers".to_string(),
        "mortgage_servicing.payments".to_string(),
    ];
    let results = populator
        .populate_all(temp_dir.path(), &selected, Some(25))
        .unwrap();
    assert_eq!(results.len(), 2);

    let customers = csv_path(temp_dir.path(), "consumer_banking.customers");
    let mut reader = csv::Reader::from_path(&customers).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.get(0), Some("customer_id"));
    assert_eq!(headers.len(), 15);

    let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 25);
    for record in &records {
        let dob = chrono::NaiveDate::parse_from_str(&record[3], "%Y-%m-%d").unwrap();
        let since = chrono::NaiveDate::parse_from_str(&record[13], "%Y-%m-%d").unwrap();
        assert!(since > dob);
    }

    // Unselected parents are generated in memory but not written.
    assert!(!csv_path(temp_dir.path(), "mortgage_servicing.loans").exists());
    assert!(csv_path(temp_dir.path(), "mortgage_servicing.payments").exists());
}
