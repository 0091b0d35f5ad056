//! Consumer banking: customers, deposit accounts, cards, transactions and
//! account holders.

use super::common::{exact, parse_enum, sequential_id, weighted, FieldResult, RecordResult};
use crate::base_enum::WeightedEnum;
use crate::context::GeneratorContext;
use crate::generators::{numeric, pattern, timestamp};
use crate::helpers::{self, lists};
use crate::registry::GeneratorRegistry;
use crate::weighted_enum;
use chrono::{Datelike, Days, Months, NaiveDate};
use fsi_core::{GeneratedValue, GeneratorError, Row};
use rand::Rng;

pub const CUSTOMERS: &str = "consumer_banking.customers";
pub const ACCOUNTS: &str = "consumer_banking.accounts";
pub const CARDS: &str = "consumer_banking.cards";
pub const TRANSACTIONS: &str = "consumer_banking.transactions";
pub const ACCOUNT_HOLDERS: &str = "consumer_banking.account_holders";

weighted_enum! {
    pub enum CustomerSegment {
        MassMarket => "Mass Market" @ 55,
        MassAffluent => "Mass Affluent" @ 22,
        HighNetWorth => "High Net Worth" @ 8,
        PrivateBanking => "Private Banking" @ 3,
        Student => "Student" @ 12,
    }
}

weighted_enum! {
    pub enum KycStatus {
        Verified => "Verified" @ 88,
        Pending => "Pending" @ 7,
        UnderReview => "Under Review" @ 4,
        Rejected => "Rejected" @ 1,
    }
}

weighted_enum! {
    pub enum AccountType {
        Checking => "Checking" @ 45,
        Savings => "Savings" @ 35,
        MoneyMarket => "Money Market" @ 10,
        CertificateOfDeposit => "Certificate of Deposit" @ 10,
    }
}

weighted_enum! {
    pub enum AccountStatus {
        Active => "Active" @ 85,
        Dormant => "Dormant" @ 6,
        Frozen => "Frozen" @ 2,
        Closed => "Closed" @ 7,
    }
}

weighted_enum! {
    pub enum CardType {
        Debit => "Debit" @ 65,
        Credit => "Credit" @ 35,
    }
}

weighted_enum! {
    pub enum CardNetwork {
        Visa => "Visa" @ 50,
        Mastercard => "Mastercard" @ 30,
        AmericanExpress => "American Express" @ 12,
        Discover => "Discover" @ 8,
    }
}

weighted_enum! {
    pub enum CardStatus {
        Active => "Active" @ 85,
        Locked => "Locked" @ 4,
        Lost => "Reported Lost" @ 3,
        Expired => "Expired" @ 5,
        Cancelled => "Cancelled" @ 3,
    }
}

weighted_enum! {
    pub enum TransactionType {
        Purchase => "Purchase" @ 55,
        Deposit => "Deposit" @ 12,
        Withdrawal => "Withdrawal" @ 10,
        TransferIn => "Transfer In" @ 5,
        TransferOut => "Transfer Out" @ 8,
        BillPayment => "Bill Payment" @ 7,
        Fee => "Fee" @ 2,
        Interest => "Interest" @ 1,
    }
}

weighted_enum! {
    pub enum TransactionStatus {
        Posted => "Posted" @ 92,
        Pending => "Pending" @ 6,
        Reversed => "Reversed" @ 2,
    }
}

weighted_enum! {
    /// Primary holders are derived from the account itself, never drawn.
    pub enum HolderRole {
        Primary => "Primary" @ 0,
        Joint => "Joint" @ 75,
        AuthorizedUser => "Authorized User" @ 25,
    }
}

impl CardNetwork {
    /// IIN prefixes and PAN length for the network.
    fn pan_format(self) -> (&'static [&'static str], usize) {
        match self {
            Self::Visa => (&["4"], 16),
            Self::Mastercard => (&["51", "52", "53", "54", "55"], 16),
            Self::AmericanExpress => (&["34", "37"], 15),
            Self::Discover => (&["6011", "65"], 16),
        }
    }
}

impl TransactionType {
    pub fn is_credit(self) -> bool {
        matches!(self, Self::Deposit | Self::TransferIn | Self::Interest)
    }

    /// Channels the transaction can arrive through, weighted.
    fn channels(self) -> &'static [(&'static str, u32)] {
        match self {
            Self::Purchase => &[("Card Present", 55), ("Online", 30), ("Mobile", 15)],
            Self::Deposit => &[("Branch", 25), ("Mobile", 35), ("ACH", 30), ("ATM", 10)],
            Self::Withdrawal => &[("ATM", 80), ("Branch", 20)],
            Self::TransferIn | Self::TransferOut => &[("Online", 55), ("Mobile", 45)],
            Self::BillPayment => &[("Online", 50), ("ACH", 50)],
            Self::Fee | Self::Interest => &[("System", 1)],
        }
    }
}

fn transaction_type_of(row: &Row) -> Result<TransactionType, GeneratorError> {
    parse_enum(row, "transaction_type")
}

fn primary_id(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let prefix = match ctx.column() {
        "customer_id" => "CUST",
        "account_id" => "ACCT",
        "card_id" => "CARD",
        _ => "TXN",
    };
    Ok(sequential_id(ctx, prefix))
}

fn customer_fk(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    ctx.random_parent_key(CUSTOMERS)
}

fn account_fk(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    ctx.random_parent_key(ACCOUNTS)
}

fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(years * 12))
        .unwrap_or(NaiveDate::MIN)
}

/// Adult customers aged 18 to 90 at the reference date.
fn date_of_birth(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let today = timestamp::reference_date();
    let dob = timestamp::date_between(ctx.rng(), years_before(today, 90), years_before(today, 18));
    Ok(dob.into())
}

/// Relationship start: after the customer's 18th birthday, not before 1990.
fn customer_since(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let dob = row.require_date("date_of_birth")?;
    let adult = dob
        .checked_add_months(Months::new(18 * 12))
        .unwrap_or(dob);
    let floor = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or(adult);
    let start = adult.max(floor);
    Ok(timestamp::date_between(ctx.rng(), start, timestamp::reference_date()).into())
}

/// Accounts open on or after the owner became a customer.
fn open_date(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let customer = ctx.lookup(row, "customer_id", CUSTOMERS)?;
    let since = customer.require_date("customer_since")?;
    Ok(timestamp::date_between(ctx.rng(), since, timestamp::reference_date()).into())
}

fn account_type_of(row: &Row) -> Result<AccountType, GeneratorError> {
    parse_enum(row, "account_type")
}

fn current_balance(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    if row.get("account_status").and_then(GeneratedValue::as_str) == Some("Closed") {
        return Ok(GeneratedValue::money(0.0));
    }
    let (min, max) = match account_type_of(row)? {
        AccountType::Checking => (25.0, 25_000.0),
        AccountType::Savings => (100.0, 150_000.0),
        AccountType::MoneyMarket => (2_500.0, 500_000.0),
        AccountType::CertificateOfDeposit => (1_000.0, 250_000.0),
    };
    Ok(GeneratedValue::money(numeric::log_uniform(ctx.rng(), min, max)))
}

/// Annual percentage yield by product.
fn interest_rate(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let (min, max) = match account_type_of(row)? {
        AccountType::Checking => (0.0, 0.10),
        AccountType::Savings => (0.25, 4.50),
        AccountType::MoneyMarket => (1.50, 4.75),
        AccountType::CertificateOfDeposit => (3.00, 5.25),
    };
    Ok(numeric::rate_range(ctx.rng(), min, max, 3))
}

/// Only checking accounts carry overdraft protection.
fn overdraft_limit(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    if account_type_of(row)? != AccountType::Checking {
        return Ok(GeneratedValue::Null);
    }
    let limit = *helpers::pick(ctx.rng(), &[0.0, 100.0, 250.0, 500.0, 1_000.0]);
    Ok(GeneratedValue::money(limit))
}

/// Debit cards hang off checking accounts; anything else issues credit.
fn card_type(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let account = ctx.lookup(row, "account_id", ACCOUNTS)?;
    let is_checking = account.get("account_type").and_then(GeneratedValue::as_str)
        == Some(AccountType::Checking.as_str());
    let card_type = if is_checking && ctx.rng().random_bool(0.85) {
        CardType::Debit
    } else {
        CardType::Credit
    };
    Ok(card_type.into())
}

fn card_number(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let network = row.require_str("card_network")?;
    let network = CardNetwork::from_db_value(network).unwrap_or(CardNetwork::Visa);
    let (prefixes, len) = network.pan_format();
    let prefix = *helpers::pick(ctx.rng(), prefixes);
    Ok(helpers::card_number(ctx.rng(), prefix, len).into())
}

fn end_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or(date)
}

/// Cards expire on the last day of a month one to five years out.
fn expiration_date(_: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let today = timestamp::reference_date();
    let end = timestamp::add_months(today, 60);
    let start = timestamp::add_months(today, 1);
    Ok(end_of_month(timestamp::date_between(ctx.rng(), start, end)).into())
}

/// Signed amount: credits positive, debits negative.
fn transaction_amount(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let tx_type = transaction_type_of(row)?;
    let rng = ctx.rng();
    let magnitude = match tx_type {
        TransactionType::Purchase => numeric::log_uniform(rng, 2.0, 2_500.0),
        TransactionType::Deposit => numeric::log_uniform(rng, 50.0, 10_000.0),
        TransactionType::Withdrawal => rng.random_range(1..=40u32) as f64 * 20.0,
        TransactionType::TransferIn | TransactionType::TransferOut => {
            numeric::log_uniform(rng, 25.0, 5_000.0)
        }
        TransactionType::BillPayment => numeric::log_uniform(rng, 30.0, 2_500.0),
        TransactionType::Fee => *helpers::pick(rng, &[2.50, 3.00, 12.00, 15.00, 35.00, 39.00]),
        TransactionType::Interest => numeric::float_range(rng, 0.01, 150.0),
    };
    let signed = if tx_type.is_credit() { magnitude } else { -magnitude };
    Ok(GeneratedValue::money(signed))
}

/// Posted after the account opened, within ten years.
fn transaction_date(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let account = ctx.lookup(row, "account_id", ACCOUNTS)?;
    let opened = account.require_date("open_date")?;
    let date = timestamp::date_after(ctx.rng(), opened, 3_650, timestamp::reference_date());
    Ok(date.into())
}

/// Merchant name and MCC, only for purchases.
fn merchant(row: &Row, ctx: &mut GeneratorContext<'_>) -> RecordResult {
    if transaction_type_of(row)? != TransactionType::Purchase {
        return Ok(vec![
            ("merchant_name", GeneratedValue::Null),
            ("merchant_category_code", GeneratedValue::Null),
        ]);
    }
    let (name, mcc) = *helpers::pick(ctx.rng(), lists::MERCHANTS);
    Ok(vec![
        ("merchant_name", name.into()),
        ("merchant_category_code", mcc.into()),
    ])
}

fn channel(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let tx_type = transaction_type_of(row)?;
    let channel = helpers::pick_weighted(ctx.rng(), tx_type.channels()).copied();
    Ok(channel.into())
}

/// Statement descriptor in the style banks print.
fn transaction_description(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let tx_type = transaction_type_of(row)?;
    let merchant = row
        .get("merchant_name")
        .and_then(GeneratedValue::as_str)
        .unwrap_or("MERCHANT")
        .to_uppercase();
    let online = matches!(
        row.get("channel").and_then(GeneratedValue::as_str),
        Some("Online" | "Mobile")
    );
    let index = ctx.index();

    let template = match tx_type {
        TransactionType::Purchase if online => format!("ONLINE PURCHASE {merchant}"),
        TransactionType::Purchase => format!("POS PURCHASE {merchant} #{{digits:4}}"),
        TransactionType::Deposit => "DEPOSIT - THANK YOU".to_string(),
        TransactionType::Withdrawal => "ATM WITHDRAWAL #{digits:6}".to_string(),
        TransactionType::TransferIn => "TRANSFER FROM ACCT ****{digits:4}".to_string(),
        TransactionType::TransferOut => "TRANSFER TO ACCT ****{digits:4}".to_string(),
        TransactionType::BillPayment => format!(
            "BILL PAY {}",
            helpers::company_name(ctx.rng()).to_uppercase()
        ),
        TransactionType::Fee => helpers::pick(
            ctx.rng(),
            &["MONTHLY SERVICE FEE", "OVERDRAFT FEE", "ATM FEE", "WIRE TRANSFER FEE"],
        )
        .to_string(),
        TransactionType::Interest => "INTEREST PAYMENT".to_string(),
    };
    Ok(pattern::generate_pattern(&template, ctx.rng(), index).into())
}

/// Junction rows pair an account with a customer exactly once.
fn account_holder_pair(_: &Row, ctx: &mut GeneratorContext<'_>) -> RecordResult {
    let (account_id, customer_id) = ctx.assign_unique_pair(ACCOUNT_HOLDERS, ACCOUNTS, CUSTOMERS)?;
    Ok(vec![("account_id", account_id), ("customer_id", customer_id)])
}

/// The account's owning customer is its primary holder.
fn holder_role(row: &Row, ctx: &mut GeneratorContext<'_>) -> FieldResult {
    let account = ctx.lookup(row, "account_id", ACCOUNTS)?;
    if account.get("customer_id") == row.get("customer_id") {
        return Ok(HolderRole::Primary.into());
    }
    Ok(HolderRole::random(ctx.rng()).into())
}

/// Register the consumer banking generators.
pub fn register(registry: &mut GeneratorRegistry) -> Result<(), GeneratorError> {
    let customers = exact(CUSTOMERS);
    let accounts = exact(ACCOUNTS);
    let cards = exact(CARDS);
    let transactions = exact(TRANSACTIONS);
    let holders = exact(ACCOUNT_HOLDERS);

    registry
        .field(&customers, "customer_id", "customer_id", primary_id)?
        .field(&customers, "date_of_birth", "date_of_birth", date_of_birth)?
        .field(&customers, "customer_since", "customer_since", customer_since)?
        .field(&customers, "customer_segment", "customer_segment", weighted::<CustomerSegment>)?
        .field(&customers, "kyc_status", "kyc_status", weighted::<KycStatus>)?;

    registry
        .field(&accounts, "account_id", "account_id", primary_id)?
        .field(&accounts, "customer_id", "customer_fk", customer_fk)?
        .field(&accounts, "account_type", "account_type", weighted::<AccountType>)?
        .field(&accounts, "account_status", "account_status", weighted::<AccountStatus>)?
        .field(&accounts, "open_date", "account_open_date", open_date)?
        .field(&accounts, "current_balance", "deposit_balance", current_balance)?
        .field(&accounts, "interest_rate", "deposit_rate", interest_rate)?
        .field(&accounts, "overdraft_limit", "overdraft_limit", overdraft_limit)?;

    registry
        .field(&cards, "card_id", "card_id", primary_id)?
        .field(&cards, "account_id", "account_fk", account_fk)?
        .field(&cards, "card_type", "card_type", card_type)?
        .field(&cards, "card_network", "card_network", weighted::<CardNetwork>)?
        .field(&cards, "card_number", "card_number", card_number)?
        .field(&cards, "expiration_date", "card_expiration", expiration_date)?
        .field(&cards, "card_status", "card_status", weighted::<CardStatus>)?;

    registry
        .field(&transactions, "transaction_id", "transaction_id", primary_id)?
        .field(&transactions, "account_id", "account_fk", account_fk)?
        .field(&transactions, "transaction_type", "transaction_type", weighted::<TransactionType>)?
        .field(&transactions, "amount", "transaction_amount", transaction_amount)?
        .field(&transactions, "transaction_date", "transaction_date", transaction_date)?
        .record(&transactions, "merchant_name|merchant_category_code", "merchant", merchant)?
        .field(&transactions, "channel", "channel", channel)?
        .field(&transactions, "transaction_status", "transaction_status", weighted::<TransactionStatus>)?
        .field(&transactions, "description", "transaction_description", transaction_description)?;

    registry
        .record(&holders, "account_id|customer_id", "account_holder_pair", account_holder_pair)?
        .field(&holders, "holder_role", "holder_role", holder_role)?;

    Ok(())
}
