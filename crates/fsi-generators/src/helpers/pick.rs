//! Text-list pickers.

use super::lists;
use rand::Rng;

/// Uniformly pick an item from a non-empty list.
///
/// # Panics
///
/// Panics if `items` is empty; the shipped lists never are.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

/// Pick an item with probability proportional to its weight.
///
/// Returns `None` for an empty list or when every weight is zero.
pub fn pick_weighted<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [(T, u32)]) -> Option<&'a T> {
    let total: u32 = items.iter().map(|(_, w)| *w).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.random_range(0..total);
    for (item, weight) in items {
        if roll < *weight {
            return Some(item);
        }
        roll -= weight;
    }
    None
}

pub fn first_name<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    *pick(rng, lists::FIRST_NAMES)
}

pub fn last_name<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    *pick(rng, lists::LAST_NAMES)
}

/// `1234 Oak Ave`
pub fn street_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        rng.random_range(1..10_000u32),
        pick(rng, lists::STREET_NAMES),
        pick(rng, lists::STREET_SUFFIXES)
    )
}

/// A city with its state and a ZIP code inside the city's prefix.
pub fn city_state_zip<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static str, String) {
    let (city, state, prefix) = *pick(rng, lists::CITIES);
    (city, state, format!("{prefix}{:02}", rng.random_range(0..100u32)))
}

/// `Harbor Logistics LLC`
pub fn company_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(rng, lists::COMPANY_WORDS),
        pick(rng, lists::COMPANY_NOUNS),
        pick(rng, lists::COMPANY_SUFFIXES)
    )
}
