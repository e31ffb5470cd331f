use crate::tsp::{Algorithm, DimensionPolicy, Fallback, GroupRouting, TourOptions};
use clap::arg_enum;
use std::path::PathBuf;
use structopt::StructOpt;
use thiserror::Error;

#[derive(Error, Debug)]
/// Error types for command line configuration
pub enum ConfigError {
    #[error("image size must be between 16 and 8192 pixels")]
    Size,
    #[error("Not a whole number")]
    ParseInt(#[from] std::num::ParseIntError),
    #[error("Error parsing config")]
    Clap(#[from] clap::Error),
}

arg_enum! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum AlgorithmArg {
        Seeded,
        Constrained
    }
}

arg_enum! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum FallbackArg {
        Last,
        Nearest,
        Fail
    }
}

arg_enum! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum RoutingArg {
        Compat,
        Corrected
    }
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Seeded => Algorithm::Seeded,
            AlgorithmArg::Constrained => Algorithm::Constrained,
        }
    }
}

impl From<FallbackArg> for Fallback {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::Last => Fallback::LastRemaining,
            FallbackArg::Nearest => Fallback::Nearest,
            FallbackArg::Fail => Fallback::Fail,
        }
    }
}

impl From<RoutingArg> for GroupRouting {
    fn from(arg: RoutingArg) -> Self {
        match arg {
            RoutingArg::Compat => GroupRouting::Compat,
            RoutingArg::Corrected => GroupRouting::Corrected,
        }
    }
}

fn parse_size(src: &str) -> Result<u32, ConfigError> {
    let size = src.parse::<u32>()?;
    if size < 16 || size > 8192 {
        Err(ConfigError::Size)
    } else {
        Ok(size)
    }
}

// set up program arguments
#[derive(Debug, StructOpt)]
#[structopt(name = "tour_geo")]
pub struct Opt {
    /// cities as a JSON list or {"primary": [...], "secondary": [...]}
    #[structopt(short, long, parse(from_os_str))]
    pub input: PathBuf,

    #[structopt(short, long, parse(from_os_str), default_value = "sorted_paths.json")]
    pub output: PathBuf,

    #[structopt(short, long, possible_values = &AlgorithmArg::variants(), default_value = "constrained", case_insensitive = true)]
    pub algorithm: AlgorithmArg,

    /// what the constrained walk does when every city would cross the tour
    #[structopt(short, long, possible_values = &FallbackArg::variants(), default_value = "last", case_insensitive = true)]
    pub fallback: FallbackArg,

    /// where the first city of a new group goes
    #[structopt(long, possible_values = &RoutingArg::variants(), default_value = "compat", case_insensitive = true)]
    pub routing: RoutingArg,

    /// don't test a new edge against the edge it continues from
    #[structopt(long)]
    pub ignore_shared_endpoint: bool,

    /// reject datasets mixing 2d and 3d cities
    #[structopt(long)]
    pub strict: bool,

    #[structopt(long, parse(from_os_str))]
    pub svg: Option<PathBuf>,

    #[structopt(long, default_value = "800", parse(try_from_str = parse_size))]
    pub width: u32,

    #[structopt(long, default_value = "600", parse(try_from_str = parse_size))]
    pub height: u32,

    /// draw only the first cities of the tour, up to this index
    #[structopt(long)]
    pub frame: Option<usize>,

    #[structopt(long)]
    pub debug: bool,
}

impl Opt {
    pub fn tour_options(&self) -> TourOptions {
        TourOptions {
            dimensions: if self.strict {
                DimensionPolicy::Strict
            } else {
                DimensionPolicy::Lenient
            },
            fallback: self.fallback.into(),
            ignore_shared_endpoint: self.ignore_shared_endpoint,
            routing: self.routing.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_compatible() {
        let opt = Opt::from_iter_safe(&["tour_geo", "-i", "cities.json"]).unwrap();
        assert_eq!(opt.tour_options(), TourOptions::default());
        assert_eq!(Algorithm::from(opt.algorithm), Algorithm::Constrained);
        assert_eq!(opt.output, PathBuf::from("sorted_paths.json"));
    }

    #[test]
    fn strict_options() {
        let opt = Opt::from_iter_safe(&[
            "tour_geo",
            "-i",
            "cities.json",
            "--fallback",
            "FAIL",
            "--routing",
            "corrected",
            "--strict",
            "--ignore-shared-endpoint",
        ])
        .unwrap();
        let options = opt.tour_options();
        assert_eq!(options.fallback, Fallback::Fail);
        assert_eq!(options.routing, GroupRouting::Corrected);
        assert_eq!(options.dimensions, DimensionPolicy::Strict);
        assert!(options.ignore_shared_endpoint);
    }

    #[test]
    fn size_bounds() {
        assert!(matches!(parse_size("8"), Err(ConfigError::Size)));
        assert!(matches!(parse_size("wide"), Err(ConfigError::ParseInt(_))));
        assert_eq!(parse_size("640").unwrap(), 640);
        assert!(Opt::from_iter_safe(&["tour_geo", "-i", "c.json", "--width", "9"]).is_err());
    }
}
