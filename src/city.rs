//! # City
//!
//! City records as they come in from the caller. Only `x`, `y`, `z` and the
//! group label are read, everything else is carried along untouched.

use crate::{geo::Point, tsp::TourError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(default, alias = "state", skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// name, display size and anything else the tour never looks at
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl City {
    pub fn new(x: f64, y: f64) -> City {
        City {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn new_3d(x: f64, y: f64, z: f64) -> City {
        City {
            z: Some(z),
            ..City::new(x, y)
        }
    }

    pub fn with_group<S: Into<String>>(mut self, group: S) -> City {
        self.group = Some(group.into());
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> City {
        self.extra.insert("name".to_string(), Value::String(name.into()));
        self
    }

    pub fn name(&self) -> Option<&str> { self.extra.get("name").and_then(Value::as_str) }

    /// missing x reads as 0
    pub fn x(&self) -> f64 { self.x.unwrap_or(0.) }

    /// missing y reads as 0
    pub fn y(&self) -> f64 { self.y.unwrap_or(0.) }

    pub fn has_z(&self) -> bool { self.z.is_some() }

    /// Coordinate of the city for a run of the given dimensionality
    ///
    /// # Examples
    ///
    /// ```
    /// use tour_geo::city::{City, Dimensions};
    /// use tour_geo::geo::Point;
    /// let city = City::new_3d(1., 2., 3.);
    /// assert_eq!(city.point(Dimensions::Two), Point::new(1., 2., 0.));
    /// assert_eq!(city.point(Dimensions::Three), Point::new(1., 2., 3.));
    /// ```
    pub fn point(&self, dims: Dimensions) -> Point {
        match dims {
            Dimensions::Two => Point::new_2d(self.x(), self.y()),
            Dimensions::Three => Point::new(self.x(), self.y(), self.z.unwrap_or(0.)),
        }
    }
}

/// Dimensionality of a run, fixed by the first city
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimensions {
    Two,
    Three,
}

impl Dimensions {
    pub fn classify(cities: &[City]) -> Dimensions {
        match cities.first() {
            Some(city) if city.has_z() => Dimensions::Three,
            _ => Dimensions::Two,
        }
    }

    /// Reject datasets where cities disagree with the first one about `z`
    pub fn validate(cities: &[City]) -> Result<Dimensions, TourError> {
        let dims = Dimensions::classify(cities);
        let expect_z = dims == Dimensions::Three;
        if let Some(index) = cities.iter().position(|city| city.has_z() != expect_z) {
            return Err(TourError::InvalidInput {
                index,
                reason: if expect_z {
                    "missing z in a 3d dataset".to_string()
                } else {
                    "z present in a 2d dataset".to_string()
                },
            });
        }
        Ok(dims)
    }
}
