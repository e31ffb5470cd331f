//! Seed orderings for the two extenders.

use crate::city::City;
use std::cmp::Ordering;

/// Coordinates are scaled by this before interleaving
pub const MORTON_SCALE: f64 = 10000.;

/// Spread the low bits of `value` into the even bit positions.
///
/// Four mask stages, so 16 significant bits per axis. Works on the two's
/// complement value without masking first, negative coordinates and values
/// past 16 bits fold into the same 32 bit range deterministically.
///
/// # Examples
///
/// ```
/// use tour_geo::tsp::seed::bit_spread;
/// assert_eq!(bit_spread(0b1011), 0b1000101);
/// assert_eq!(bit_spread(0xFFFF), 0x5555_5555);
/// ```
pub fn bit_spread(value: i64) -> i64 {
    let mut value = (value | (value << 8)) & 0x00FF_00FF;
    value = (value | (value << 4)) & 0x0F0F_0F0F;
    value = (value | (value << 2)) & 0x3333_3333;
    value = (value | (value << 1)) & 0x5555_5555;
    value
}

/// Interleaved bit key over the scaled x and y, x in the even bits
pub fn morton_key(city: &City) -> u64 {
    let x = (city.x() * MORTON_SCALE) as i64;
    let y = (city.y() * MORTON_SCALE) as i64;
    (bit_spread(x) | (bit_spread(y) << 1)) as u64
}

/// Indices of `cities` sorted ascending by morton key, ties keep input order
pub fn morton_order(cities: &[City]) -> Vec<usize> {
    let mut keyed: Vec<(u64, usize)> = cities
        .iter()
        .enumerate()
        .map(|(index, city)| (morton_key(city), index))
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, index)| index).collect()
}

fn compare_xy(left: &City, right: &City) -> Ordering {
    left.x()
        .partial_cmp(&right.x())
        .unwrap_or(Ordering::Equal)
        .then(left.y().partial_cmp(&right.y()).unwrap_or(Ordering::Equal))
}

/// Indices of `cities` sorted descending by (x, y), ties keep input order
pub fn lexicographic_order(cities: &[City]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..cities.len()).collect();
    order.sort_by(|&a, &b| compare_xy(&cities[b], &cities[a]));
    order
}
