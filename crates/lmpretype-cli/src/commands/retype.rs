use crate::config::models::AppConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use lmpretype::core::io::lammps::LammpsError;
use lmpretype::engine::error::RetypeError;
use lmpretype::engine::ordering::ElementOrdering;
use lmpretype::engine::progress::ProgressReporter;
use lmpretype::workflows::retype::{self, RetypeReport};
use std::io::{self, Write};
use tracing::{info, warn};

/// Runs a retype and prints its summary to stdout.
///
/// Data problems that stop the run before any output is written (a missing section,
/// an empty Masses block, an element the ordering cannot place) are printed as a
/// diagnostic and are not treated as a command failure.
pub fn run(app: &AppConfig, quiet: bool) -> Result<()> {
    let progress_handler = CliProgressHandler::new(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!(
        "Retyping {:?} -> {:?} using '{}' ordering",
        app.input_path,
        app.output_path,
        app.core_config.ordering.name()
    );

    let result = retype::run_paths(
        &app.input_path,
        &app.output_path,
        &app.core_config,
        &reporter,
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match result {
        Ok(report) => {
            print_summary(app, &report, &mut out)?;
            Ok(())
        }
        Err(e) if e.is_reported_condition() => {
            warn!("Nothing written: {}", e);
            print_condition(&e, &mut out)?;
            Ok(())
        }
        Err(e) => Err(CliError::Core(e)),
    }
}

fn print_summary(app: &AppConfig, report: &RetypeReport, out: &mut impl Write) -> io::Result<()> {
    let plan = &report.plan;
    writeln!(out, "Found Masses section at line {}", plan.sections.masses)?;
    writeln!(out, "Found Atoms section at line {}", plan.sections.atoms)?;

    writeln!(out, "\nFound {} atom types:", plan.types.len())?;
    for assignment in plan.types.iter() {
        let z = assignment
            .element
            .atomic_number
            .map_or_else(|| "?".to_string(), |z| z.to_string());
        writeln!(
            out,
            "  Type {}: {} (Z={}, mass={})",
            assignment.type_id, assignment.element.symbol, z, assignment.mass
        )?;
    }
    if !plan.skipped.is_empty() {
        writeln!(out, "Skipped {} Masses line(s)", plan.skipped.len())?;
    }

    writeln!(out, "\nNew type order:")?;
    for (new_type, element) in plan.mapping.new_types() {
        writeln!(out, "  New type {}: {}", new_type, element.symbol)?;
    }
    writeln!(out, "\nType remapping: {}", plan.mapping)?;

    let stats = &report.stats;
    writeln!(
        out,
        "Rewrote {} atom line(s); {} kept their original type; {} dropped",
        stats.records_rewritten, stats.records_unmapped, stats.lines_dropped
    )?;
    writeln!(
        out,
        "\nSuccessfully reordered: {} -> {}",
        app.input_path.display(),
        app.output_path.display()
    )
}

fn print_condition(err: &RetypeError, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Error: {}", err)?;
    if let RetypeError::Lammps(LammpsError::SectionNotFound {
        total_lines, hints, ..
    }) = err
    {
        writeln!(out, "Searching through file ({} lines):", total_lines)?;
        for hint in hints {
            writeln!(out, "  {}", hint)?;
        }
    }
    Ok(())
}
