//! Command-line parsing for the `coron` binary.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! numeric code; `app` turns these arguments into library calls.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Instrument, MatchMethod};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "coron", version, about = "JWST coronagraphy reduction helpers")]
pub struct Cli {
    /// Report skipped files/groups and the selected index/value.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find the reference group whose brightness matches each science cube.
    Match(MatchArgs),
    /// Estimate a companion mass from its age and apparent magnitude.
    Mass(MassArgs),
    /// Show the model directory and files for an instrument/mask.
    Models(ModelsArgs),
    /// Run the brightness matcher on a synthetic reference/science pair.
    Demo(DemoArgs),
    /// Angular separation between two sky positions.
    Sep(SepArgs),
}

/// Kernel and method options shared by `match` and `demo`.
#[derive(Debug, Args, Clone)]
pub struct MatchOptions {
    /// Half-width of the square kernel around the center pixel (side = 2K+1).
    #[arg(short = 'k', long = "kernel", default_value_t = 15)]
    pub kernel_radius: usize,

    /// How kernel fluxes are compared.
    #[arg(short, long, value_enum, default_value_t = MatchMethod::Summed)]
    pub method: MatchMethod,

    /// The science cube is brighter; scan its groups instead of the reference's.
    #[arg(long)]
    pub science_brighter: bool,
}

#[derive(Debug, Args, Clone)]
pub struct MatchArgs {
    /// Reference cube (JSON cube file).
    #[arg(short, long, value_name = "JSON")]
    pub reference: PathBuf,

    /// Science cube(s) (JSON cube files).
    #[arg(short, long, value_name = "JSON", required = true, num_args = 1..)]
    pub science: Vec<PathBuf>,

    #[command(flatten)]
    pub options: MatchOptions,

    /// Export one CSV row per science cube.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct MassArgs {
    /// Age estimate of the system in Myr.
    #[arg(long = "age-myr")]
    pub age_myr: f64,

    /// Apparent magnitude to convert.
    #[arg(long, allow_hyphen_values = true)]
    pub mag: f64,

    /// Filter column in the model tables (case-insensitive).
    #[arg(short, long, default_value = "NIRCAM-F444W")]
    pub filter: String,

    /// Directory of model tables; overrides the instrument/mask lookup.
    #[arg(long, value_name = "DIR")]
    pub models: Option<PathBuf>,

    #[command(flatten)]
    pub selection: ModelSelection,

    /// Export the estimate as JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Instrument/mask selection resolved under `ATMO_2020_MODELS`.
#[derive(Debug, Args, Clone)]
pub struct ModelSelection {
    #[arg(short, long, value_enum, default_value_t = Instrument::Nircam)]
    pub instrument: Instrument,

    /// NIRCam coronagraphic mask (unsupported names fall back to MASK335R).
    #[arg(long, default_value = "MASK335R")]
    pub mask: String,
}

#[derive(Debug, Args, Clone)]
pub struct ModelsArgs {
    #[command(flatten)]
    pub selection: ModelSelection,
}

#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Random seed for the synthetic read noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[command(flatten)]
    pub options: MatchOptions,

    /// Write the generated cubes as `reference.json` / `science.json` into this directory.
    #[arg(long, value_name = "DIR")]
    pub write_cubes: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SepArgs {
    /// First RA (hour angle, "hh mm ss.s").
    #[arg(long, allow_hyphen_values = true)]
    pub ra1: String,

    /// First Dec (degrees, "±dd mm ss.s").
    #[arg(long, allow_hyphen_values = true)]
    pub dec1: String,

    #[arg(long, allow_hyphen_values = true)]
    pub ra2: String,

    #[arg(long, allow_hyphen_values = true)]
    pub dec2: String,

    /// Distance in parsecs; also print the projected separation in AU.
    #[arg(long)]
    pub distance_pc: Option<f64>,
}
