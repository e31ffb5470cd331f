//! # Data
//!
//! JSON persistence for city lists and computed tours, shaped as
//! `{"primary": [...], "secondary": [...]}`. A bare list is read as
//! `primary` with no `secondary`.

use crate::city::City;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};
use thiserror::Error;

#[derive(Error, Debug)]
/// Error types for loading and saving datasets
pub enum DataError {
    #[error("Couldn't access data file")]
    IO(#[from] std::io::Error),
    #[error("Error parsing data file")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub primary: Vec<City>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary: Vec<City>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Stored {
    List(Vec<City>),
    Object(Dataset),
}

impl From<Stored> for Dataset {
    fn from(stored: Stored) -> Self {
        match stored {
            Stored::List(primary) => Dataset {
                primary,
                secondary: Vec::new(),
            },
            Stored::Object(dataset) => dataset,
        }
    }
}

impl Dataset {
    pub fn parse(raw: &str) -> Result<Dataset, DataError> {
        let stored: Stored = serde_json::from_str(raw)?;
        Ok(stored.into())
    }

    pub fn is_empty(&self) -> bool { self.primary.is_empty() }
}

/// Load a dataset, a missing file is an empty dataset
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<Dataset, DataError> {
    let path = path.as_ref();
    if !path.exists() {
        info!("{} not found, starting empty", path.display());
        return Ok(Dataset::default());
    }
    let reader = BufReader::new(File::open(path)?);
    let stored: Stored = serde_json::from_reader(reader)?;
    Ok(stored.into())
}

/// Save `primary`, and `secondary` when there is any
pub fn save_data<P: AsRef<Path>>(path: P, primary: &[City], secondary: &[City]) -> Result<(), DataError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let dataset = SavedRef { primary, secondary };
    serde_json::to_writer(&mut writer, &dataset)?;
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct SavedRef<'a> {
    primary: &'a [City],
    #[serde(skip_serializing_if = "no_cities")]
    secondary: &'a [City],
}

fn no_cities(cities: &&[City]) -> bool { cities.is_empty() }
