//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and configures logging
//! - loads or generates image cubes and matches their brightness
//! - resolves model tables and interpolates masses
//! - prints reports and writes optional exports

use clap::Parser;

use crate::astro::separation::{Separation, SkyPosition, angular_separation_arcsec};
use crate::cli::{Cli, Command, DemoArgs, MassArgs, MatchArgs, MatchOptions, ModelsArgs, SepArgs};
use crate::domain::MatchParams;
use crate::error::ToolError;

pub mod pipeline;

/// Entry point for the `coron` binary.
pub fn run() -> Result<(), ToolError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Match(args) => handle_match(args),
        Command::Mass(args) => handle_mass(args),
        Command::Models(args) => handle_models(args),
        Command::Demo(args) => handle_demo(args),
        Command::Sep(args) => handle_sep(args),
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` raises the default from `warn` to `info`.
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}

pub fn match_params_from_options(options: &MatchOptions) -> MatchParams {
    MatchParams {
        science_is_brighter: options.science_brighter,
        kernel_radius: options.kernel_radius,
        method: options.method,
    }
}

fn handle_match(args: MatchArgs) -> Result<(), ToolError> {
    let params = match_params_from_options(&args.options);
    let run = pipeline::run_match(&args.reference, &args.science, &params)?;

    println!(
        "{}",
        crate::report::format_match_summary(&args.reference.display().to_string(), &run.params, &run.rows)
    );

    if let Some(path) = &args.export {
        crate::io::export::write_matches_csv(path, &run.rows)?;
        log::info!("wrote {} row(s) to '{}'", run.rows.len(), path.display());
    }

    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), ToolError> {
    let params = match_params_from_options(&args.options);
    let (reference, science) = crate::data::synthetic_pair(args.seed)?;

    if let Some(dir) = &args.write_cubes {
        std::fs::create_dir_all(dir).map_err(|e| ToolError::io(dir, e))?;
        crate::io::cube::write_cube_json(&dir.join("reference.json"), &reference)?;
        crate::io::cube::write_cube_json(&dir.join("science.json"), &science)?;
    }

    let labels = vec![format!("synthetic science (seed {})", args.seed)];
    let run = pipeline::match_cubes(&reference, &labels, std::slice::from_ref(&science), &params);

    println!(
        "{}",
        crate::report::format_match_summary(
            &format!("synthetic reference (seed {})", args.seed),
            &run.params,
            &run.rows
        )
    );
    Ok(())
}

fn handle_mass(args: MassArgs) -> Result<(), ToolError> {
    let source = match &args.models {
        Some(dir) => pipeline::ModelSource::Directory(dir.clone()),
        None => pipeline::ModelSource::Library {
            instrument: args.selection.instrument,
            mask: args.selection.mask.clone(),
        },
    };
    let estimate = pipeline::run_mass(args.age_myr, args.mag, &args.filter, &source)?;

    println!("{}", crate::report::format_mass_summary(&estimate));

    if let Some(path) = &args.export {
        crate::io::export::write_mass_json(path, &estimate)?;
    }
    Ok(())
}

fn handle_models(args: ModelsArgs) -> Result<(), ToolError> {
    let library = crate::models::ModelLibrary::from_env()?;
    let instrument = args.selection.instrument;
    let dir = library.resolve(instrument, Some(&args.selection.mask));

    println!("{} models: {}", instrument.display_name(), dir.display());
    for file in library.model_files(instrument, Some(&args.selection.mask))? {
        println!("  {}", file.display());
    }
    Ok(())
}

fn handle_sep(args: SepArgs) -> Result<(), ToolError> {
    let a = SkyPosition::parse(&args.ra1, &args.dec1)?;
    let b = SkyPosition::parse(&args.ra2, &args.dec2)?;
    let arcsec = angular_separation_arcsec(&a, &b);

    println!("Separation: {arcsec:.4} arcsec");
    if let Some(distance_pc) = args.distance_pc {
        let au = Separation::Arcsec(arcsec).convert(distance_pc)?;
        println!("Projected:  {:.4} AU at {distance_pc} pc", au.value());
    }
    Ok(())
}
