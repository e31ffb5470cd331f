use crate::{
    city::{City, Dimensions},
    geo::{distance, Point, Segment},
};

/// Cities still waiting to be visited, in seed order.
///
/// Removal flips a bit instead of shifting the vector, scan order is the
/// same as removing by index from a list.
pub struct Remaining<'a> {
    cities: Vec<&'a City>,
    points: Vec<Point>,
    mask: Vec<u32>,
    alive: usize,
}

impl<'a> Remaining<'a> {
    pub fn new(cities: Vec<&'a City>, dims: Dimensions) -> Remaining<'a> {
        let count = (cities.len() + 31) / 32;
        let points = cities.iter().map(|city| city.point(dims)).collect();
        Remaining {
            alive: cities.len(),
            cities,
            points,
            mask: vec![0_u32; count],
        }
    }

    fn flip(&mut self, index: usize) { self.mask[index / 32] |= 1 << (index % 32); }

    pub fn removed(&self, index: usize) -> bool {
        let pos = index % 32;
        self.mask[index / 32] & (1 << pos) == (1 << pos)
    }

    pub fn len(&self) -> usize { self.alive }

    pub fn is_empty(&self) -> bool { self.alive == 0 }

    /// Alive entries in scan order, as (slot, point)
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Point)> + '_ {
        self.points
            .iter()
            .enumerate()
            .filter(move |(index, _)| !self.removed(*index))
    }

    /// Last alive slot
    pub fn last(&self) -> Option<usize> { (0..self.cities.len()).rev().find(|index| !self.removed(*index)) }

    pub fn point(&self, slot: usize) -> Point { self.points[slot] }

    pub fn take(&mut self, slot: usize) -> &'a City {
        debug_assert!(!self.removed(slot));
        self.flip(slot);
        self.alive -= 1;
        self.cities[slot]
    }
}

/// Nearest alive city to `last` that `accept` lets through, as (slot, dist).
///
/// Ties go to the earlier slot. `accept` is only asked about cities that
/// would beat the current best.
pub fn get_next_city<F>(remaining: &Remaining, last: &Point, mut accept: F) -> Option<(usize, f64)>
where
    F: FnMut(&Point) -> bool,
{
    let mut dist = f64::INFINITY;
    let mut next = None;
    for (slot, point) in remaining.iter() {
        let curr_dist = distance(last, point);
        if curr_dist < dist && accept(point) {
            dist = curr_dist;
            next = Some((slot, curr_dist));
        }
    }
    next
}

/// Closed visiting order over borrowed cities
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tour<'a> {
    path: Vec<&'a City>,
}

impl<'a> Tour<'a> {
    pub fn new() -> Tour<'a> { Tour { path: Vec::new() } }

    pub fn start(city: &'a City) -> Tour<'a> { Tour { path: vec![city] } }

    pub fn push(&mut self, city: &'a City) { self.path.push(city); }

    pub fn last(&self) -> Option<&'a City> { self.path.last().copied() }

    /// Append the first city again, no-op on an empty path
    pub fn close(&mut self) {
        if let Some(first) = self.path.first().copied() {
            self.path.push(first);
        }
    }

    pub fn is_closed(&self) -> bool {
        match (self.path.first(), self.path.last()) {
            (Some(first), Some(last)) => self.path.len() > 1 && std::ptr::eq(*first, *last),
            _ => false,
        }
    }

    pub fn append(&mut self, other: Tour<'a>) { self.path.extend(other.path); }

    pub fn len(&self) -> usize { self.path.len() }

    pub fn is_empty(&self) -> bool { self.path.is_empty() }

    pub fn cities(&self) -> &[&'a City] { &self.path }

    pub fn iter(&self) -> impl Iterator<Item = &'a City> + '_ { self.path.iter().copied() }

    /// Consecutive edges of the path, including the closing one
    pub fn segments(&self, dims: Dimensions) -> Vec<Segment> {
        self.path
            .windows(2)
            .map(|pair| Segment::from_points(&pair[0].point(dims), &pair[1].point(dims)))
            .collect()
    }

    /// Total euclidean length
    pub fn length(&self, dims: Dimensions) -> f64 {
        self.path
            .windows(2)
            .map(|pair| distance(&pair[0].point(dims), &pair[1].point(dims)))
            .sum()
    }

    pub fn into_owned(self) -> Vec<City> { self.path.into_iter().cloned().collect() }
}
