use log::info;
use simplelog::{Config, LevelFilter, TermLogger, TerminalMode};
use std::fs;
use structopt::StructOpt;
use thiserror::Error;
use tour_geo::{
    config::Opt,
    data::{load_data, save_data, DataError},
    render::{render_svg, ViewState},
    tsp::{build_tour, short_paths, TourError},
};

#[derive(Error, Debug)]
pub enum RunError {
    #[error("{0}")]
    Data(#[from] DataError),
    #[error("{0}")]
    Tour(#[from] TourError),
    #[error("Couldn't write svg")]
    IO(#[from] std::io::Error),
}

fn main() -> Result<(), RunError> {
    let opt = Opt::from_args();
    let level = if opt.debug { LevelFilter::Debug } else { LevelFilter::Info };
    if TermLogger::init(level, Config::default(), TerminalMode::Mixed).is_err() {
        eprintln!("logger already initialised");
    }

    let dataset = load_data(&opt.input)?;
    if dataset.is_empty() {
        info!("No paths found.");
        return Ok(());
    }

    let options = opt.tour_options();
    let tour = build_tour(&dataset.primary, opt.algorithm.into(), &options)?;
    let secondary = if dataset.secondary.is_empty() {
        short_paths(&dataset.primary, &options)?
    } else {
        info!("using {} stored short path cities", dataset.secondary.len());
        dataset.secondary.clone()
    };

    if let Some(svg) = &opt.svg {
        let view = ViewState {
            frame: opt.frame,
            ..Default::default()
        };
        fs::write(svg, render_svg(tour.cities(), &view, opt.width, opt.height))?;
        info!("wrote {}", svg.display());
    }

    save_data(&opt.output, &tour.into_owned(), &secondary)?;
    info!("wrote {}", opt.output.display());
    Ok(())
}
