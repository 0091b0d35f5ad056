//! Helper utilities shared by the domain generators.

pub mod assignment;
pub mod identifiers;
pub mod lists;
pub mod pick;

pub use assignment::AssignmentCache;
pub use identifiers::{
    aba_checksum_valid, account_number, card_number, clabe, clabe_checksum_valid, ein, ein_valid,
    email, lei, lei_checksum_valid, luhn_valid, phone_number, routing_number, ssn,
};
pub use pick::{city_state_zip, company_name, first_name, last_name, pick, pick_weighted, street_address};
