use crate::{
    city::{City, Dimensions},
    geo::{intersects_any, Segment},
    tsp::{
        seed::{lexicographic_order, morton_order},
        util::{get_next_city, Remaining, Tour},
        TourError, TourOptions,
    },
};
use log::{debug, info, trace, warn};

/// What the constrained extender does when every remaining city crosses
/// a committed segment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fallback {
    /// take the last remaining city in seed order
    LastRemaining,
    /// take the nearest city, ignoring the constraint
    Nearest,
    /// stop with `TourError::NoCandidate`
    Fail,
}

fn seeded<'a>(cities: &'a [City], order: Vec<usize>, dims: Dimensions) -> (Tour<'a>, Remaining<'a>) {
    let mut order = order.into_iter().map(|index| &cities[index]);
    // callers check for empty input
    let tour = order.next().map(Tour::start).unwrap_or_default();
    let remaining = Remaining::new(order.collect(), dims);
    (tour, remaining)
}

/// Morton seeded nearest neighbor.
///
/// Starts from the city with the smallest morton key and always moves to
/// the closest unvisited city, then closes the loop.
///
/// # Examples
///
/// ```
/// use tour_geo::city::City;
/// use tour_geo::tsp::{seeded_nn, TourOptions};
/// let cities = vec![City::new(0., 0.), City::new(5., 0.), City::new(1., 0.)];
/// let tour = seeded_nn(&cities, &TourOptions::default()).unwrap();
/// let xs: Vec<f64> = tour.iter().map(|city| city.x()).collect();
/// assert_eq!(xs, vec![0., 1., 5., 0.]);
/// ```
pub fn seeded_nn<'a>(cities: &'a [City], options: &TourOptions) -> Result<Tour<'a>, TourError> {
    let dims = options.dimensions_for(cities)?;
    if cities.is_empty() {
        warn!("No cities to process.");
        return Ok(Tour::new());
    }
    let (mut tour, mut remaining) = seeded(cities, morton_order(cities), dims);
    while !remaining.is_empty() {
        let last = tour.last().map(|city| city.point(dims)).unwrap_or_default();
        let slot = match get_next_city(&remaining, &last, |_| true) {
            Some((slot, dist)) => {
                trace!("step {} nearest at {}", tour.len(), dist);
                slot
            },
            // only reachable with nan coordinates
            None => match remaining.last() {
                Some(slot) => slot,
                None => break,
            },
        };
        tour.push(remaining.take(slot));
    }
    tour.close();
    info!("seeded tour over {} cities, length {:.3}", cities.len(), tour.length(dims));
    Ok(tour)
}

/// Nearest neighbor that skips any city whose new edge would cross or
/// touch an edge already in the tour.
///
/// Seeded by descending (x, y). When no city passes, `options.fallback`
/// decides. Since each new edge shares its start with the previous edge,
/// every candidate touches it unless `options.ignore_shared_endpoint` is
/// set, so by default every step after the first falls back.
pub fn constrained_nn<'a>(cities: &'a [City], options: &TourOptions) -> Result<Tour<'a>, TourError> {
    let dims = options.dimensions_for(cities)?;
    constrained_with(cities, dims, options)
}

/// Constrained walk with the dimensionality already fixed by the caller,
/// used when `cities` is only part of a run.
pub fn constrained_with<'a>(
    cities: &'a [City],
    dims: Dimensions,
    options: &TourOptions,
) -> Result<Tour<'a>, TourError> {
    if cities.is_empty() {
        warn!("No cities to process.");
        return Ok(Tour::new());
    }
    let (mut tour, mut remaining) = seeded(cities, lexicographic_order(cities), dims);
    let mut committed: Vec<Segment> = Vec::with_capacity(cities.len());
    let mut fallbacks = 0;
    while !remaining.is_empty() {
        let last = tour.last().map(|city| city.point(dims)).unwrap_or_default();
        let checked = if options.ignore_shared_endpoint && !committed.is_empty() {
            &committed[..committed.len() - 1]
        } else {
            &committed[..]
        };
        let next = get_next_city(&remaining, &last, |point| {
            !intersects_any(&Segment::from_points(&last, point), checked)
        });
        let slot = match next {
            Some((slot, dist)) => {
                trace!("step {} nearest clear city at {}", tour.len(), dist);
                slot
            },
            None => {
                fallbacks += 1;
                let step = tour.len();
                let fallback = match options.fallback {
                    Fallback::LastRemaining => remaining.last(),
                    Fallback::Nearest => get_next_city(&remaining, &last, |_| true)
                        .map(|(slot, _)| slot)
                        .or_else(|| remaining.last()),
                    Fallback::Fail => return Err(TourError::NoCandidate { step }),
                };
                debug!("step {} has no clear city, falling back with {:?}", step, options.fallback);
                match fallback {
                    Some(slot) => slot,
                    None => break,
                }
            },
        };
        let point = remaining.point(slot);
        tour.push(remaining.take(slot));
        committed.push(Segment::from_points(&last, &point));
    }
    tour.close();
    info!(
        "constrained tour over {} cities, length {:.3}, {} fallbacks",
        cities.len(),
        tour.length(dims),
        fallbacks
    );
    Ok(tour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsp::DimensionPolicy;

    fn xy(tour: &Tour) -> Vec<(f64, f64)> { tour.iter().map(|city| (city.x(), city.y())).collect() }

    /// pairs of edges that cross without being neighbours in the loop
    fn crossings(tour: &Tour) -> usize {
        let edges = tour.segments(Dimensions::Two);
        let n = edges.len();
        let mut count = 0;
        for i in 0..n {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                if edges[i].intersects(&edges[j]) {
                    count += 1;
                }
            }
        }
        count
    }

    fn square() -> Vec<City> {
        vec![City::new(0., 0.), City::new(1., 1.), City::new(1., 0.), City::new(0., 1.)]
    }

    #[test]
    fn empty_input() {
        let options = TourOptions::default();
        assert!(seeded_nn(&[], &options).unwrap().is_empty());
        assert!(constrained_nn(&[], &options).unwrap().is_empty());
    }

    #[test]
    fn single_city() {
        let cities = vec![City::new(3., 4.)];
        let options = TourOptions::default();
        for tour in vec![
            seeded_nn(&cities, &options).unwrap(),
            constrained_nn(&cities, &options).unwrap(),
        ] {
            assert_eq!(tour.len(), 2);
            assert!(std::ptr::eq(tour.cities()[0], &cities[0]));
            assert!(tour.is_closed());
        }
    }

    #[test]
    fn seeded_ties_go_to_scan_order() {
        // from the origin both (1, 0) and (0, 1) are 1 away, (1, 0) sorts first
        let cities = vec![City::new(0., 1.), City::new(1., 0.), City::new(0., 0.)];
        let tour = seeded_nn(&cities, &TourOptions::default()).unwrap();
        assert_eq!(xy(&tour), vec![(0., 0.), (1., 0.), (0., 1.), (0., 0.)]);
    }

    #[test]
    fn seeded_uses_z() {
        let cities = vec![
            City::new_3d(0., 0., 0.),
            City::new_3d(1., 0., 10.),
            City::new_3d(2., 0., 0.),
        ];
        let tour = seeded_nn(&cities, &TourOptions::default()).unwrap();
        assert_eq!(xy(&tour), vec![(0., 0.), (2., 0.), (1., 0.), (0., 0.)]);
    }

    #[test]
    fn constrained_square_walks_the_perimeter() {
        let cities = square();
        let tour = constrained_nn(&cities, &TourOptions::default()).unwrap();
        assert_eq!(xy(&tour), vec![(1., 1.), (1., 0.), (0., 0.), (0., 1.), (1., 1.)]);
        assert_eq!(crossings(&tour), 0);
    }

    #[test]
    fn constrained_default_falls_back_to_last() {
        // seed order (3,0) (2,0) (1,0) (0,5): after the first edge every
        // candidate touches it, so the last city in seed order is taken
        let cities = vec![City::new(1., 0.), City::new(0., 5.), City::new(3., 0.), City::new(2., 0.)];
        let tour = constrained_nn(&cities, &TourOptions::default()).unwrap();
        assert_eq!(xy(&tour), vec![(3., 0.), (2., 0.), (0., 5.), (1., 0.), (3., 0.)]);
    }

    #[test]
    fn constrained_fail_policy() {
        let cities = vec![City::new(1., 0.), City::new(0., 5.), City::new(3., 0.), City::new(2., 0.)];
        let options = TourOptions {
            fallback: Fallback::Fail,
            ..Default::default()
        };
        assert_eq!(
            constrained_nn(&cities, &options),
            Err(TourError::NoCandidate { step: 2 })
        );
    }

    #[test]
    fn constrained_nearest_policy() {
        let cities = vec![City::new(1., 0.), City::new(0., 5.), City::new(3., 0.), City::new(2., 0.)];
        let options = TourOptions {
            fallback: Fallback::Nearest,
            ..Default::default()
        };
        let tour = constrained_nn(&cities, &options).unwrap();
        assert_eq!(xy(&tour), vec![(3., 0.), (2., 0.), (1., 0.), (0., 5.), (3., 0.)]);
    }

    #[test]
    fn constrained_ignoring_shared_endpoint() {
        let cities = vec![
            City::new(0., 0.),
            City::new(4., 0.),
            City::new(4., 4.),
            City::new(0., 4.),
            City::new(2., 1.),
        ];
        let options = TourOptions {
            ignore_shared_endpoint: true,
            ..Default::default()
        };
        let tour = constrained_nn(&cities, &options).unwrap();
        assert_eq!(
            xy(&tour),
            vec![(4., 4.), (2., 1.), (4., 0.), (0., 0.), (0., 4.), (4., 4.)]
        );
        assert_eq!(crossings(&tour), 0);

        // without it the walk falls back into a crossing
        let tour = constrained_nn(&cities, &TourOptions::default()).unwrap();
        assert_eq!(
            xy(&tour),
            vec![(4., 4.), (2., 1.), (0., 0.), (0., 4.), (4., 0.), (4., 4.)]
        );
        assert_eq!(crossings(&tour), 1);
    }

    #[test]
    fn strict_dimensions_reject_mixed() {
        let cities = vec![City::new_3d(0., 0., 1.), City::new(1., 1.)];
        let options = TourOptions {
            dimensions: DimensionPolicy::Strict,
            ..Default::default()
        };
        assert!(matches!(
            seeded_nn(&cities, &options),
            Err(TourError::InvalidInput { index: 1, .. })
        ));
        assert!(constrained_nn(&cities, &TourOptions::default()).is_ok());
    }

    #[test]
    fn constrained_with_run_dimensions() {
        // first city has no z, but the run it belongs to is 3d
        let cities = vec![City::new(0., 0.), City::new_3d(1., 0., 100.), City::new_3d(2., 0., 0.)];
        let options = TourOptions::default();
        let tour = constrained_with(&cities, Dimensions::Three, &options).unwrap();
        assert_eq!(xy(&tour), vec![(2., 0.), (0., 0.), (1., 0.), (2., 0.)]);
        let tour = constrained_nn(&cities, &options).unwrap();
        assert_eq!(xy(&tour), vec![(2., 0.), (1., 0.), (0., 0.), (2., 0.)]);
    }

    #[test]
    fn deterministic() {
        let cities: Vec<City> = (0..30)
            .map(|i| City::new(((i * 37) % 101) as f64 / 7., ((i * 53) % 97) as f64 / 3.))
            .collect();
        let options = TourOptions::default();
        assert_eq!(seeded_nn(&cities, &options), seeded_nn(&cities, &options));
        assert_eq!(constrained_nn(&cities, &options), constrained_nn(&cities, &options));
    }
}
