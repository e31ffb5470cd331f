//! Partition cities by group label and build one constrained sub-tour per
//! group ("short paths").

use crate::{
    city::{City, Dimensions},
    tsp::{nn::constrained_with, util::Tour, TourError, TourOptions},
};
use log::debug;
use std::collections::HashMap;

/// Where the first city seen with a new label ends up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupRouting {
    /// the label is registered but its first city joins the ungrouped
    /// partition, later cities with the label join the group
    Compat,
    /// every labelled city joins its own group
    Corrected,
}

/// Groups in first seen label order, plus the cities left ungrouped
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Partition {
    pub groups: Vec<(String, Vec<City>)>,
    pub ungrouped: Vec<City>,
}

impl Partition {
    pub fn group(&self, label: &str) -> Option<&[City]> {
        self.groups
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, cities)| cities.as_slice())
    }
}

/// Split `cities` by their group label
///
/// # Examples
///
/// ```
/// use tour_geo::city::City;
/// use tour_geo::tsp::{partition, GroupRouting};
/// let cities = vec![
///     City::new(0., 0.).with_group("a"),
///     City::new(1., 0.).with_group("a"),
///     City::new(2., 0.),
/// ];
/// let parts = partition(&cities, GroupRouting::Corrected);
/// assert_eq!(parts.group("a").map(|group| group.len()), Some(2));
/// assert_eq!(parts.ungrouped.len(), 1);
/// ```
pub fn partition(cities: &[City], routing: GroupRouting) -> Partition {
    let mut parts = Partition::default();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for city in cities {
        let label = match city.group.as_deref() {
            Some(label) => label,
            None => {
                parts.ungrouped.push(city.clone());
                continue;
            },
        };
        match index.get(label) {
            Some(&group) => parts.groups[group].1.push(city.clone()),
            None => {
                index.insert(label, parts.groups.len());
                match routing {
                    GroupRouting::Compat => {
                        parts.groups.push((label.to_string(), Vec::new()));
                        parts.ungrouped.push(city.clone());
                    },
                    GroupRouting::Corrected => {
                        parts.groups.push((label.to_string(), vec![city.clone()]));
                    },
                }
            },
        }
    }
    parts
}

/// Constrained sub-tour for every group, then for the ungrouped cities.
///
/// Groups never share committed segments. `dims` is the dimensionality of
/// the whole run, not of any one group. Each entry is keyed by label,
/// `None` for the ungrouped partition.
pub fn grouped_tours<'a>(
    partition: &'a Partition,
    dims: Dimensions,
    options: &TourOptions,
) -> Result<Vec<(Option<&'a str>, Tour<'a>)>, TourError> {
    let mut tours = Vec::with_capacity(partition.groups.len() + 1);
    for (label, cities) in &partition.groups {
        debug!("group {} with {} cities", label, cities.len());
        tours.push((Some(label.as_str()), constrained_with(cities, dims, options)?));
    }
    debug!("{} ungrouped cities", partition.ungrouped.len());
    tours.push((None, constrained_with(&partition.ungrouped, dims, options)?));
    Ok(tours)
}

/// All group sub-tours concatenated in discovery order, ungrouped last.
/// Each sub-tour keeps its own closing city.
///
/// Dimensionality is fixed by the first city of `cities` and, under the
/// strict policy, checked across all of them before any group is walked.
pub fn short_paths(cities: &[City], options: &TourOptions) -> Result<Vec<City>, TourError> {
    let dims = options.dimensions_for(cities)?;
    let parts = partition(cities, options.routing);
    let mut combined = Tour::new();
    for (_, tour) in grouped_tours(&parts, dims, options)? {
        combined.append(tour);
    }
    Ok(combined.into_owned())
}
