use crate::core::io::lammps::DataFile;
use crate::core::io::lammps::masses::{SkippedLine, parse_masses};
use crate::core::io::lammps::sections::{FileSections, locate_sections};
use crate::core::io::lammps::writer::{RewriteStats, write_retyped};
use crate::core::models::types::{TypeElementMap, TypeMapping};
use crate::engine::config::RetypeConfig;
use crate::engine::error::RetypeError;
use crate::engine::ordering::ElementOrdering;
use crate::engine::progress::{Progress, ProgressReporter, Stage};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Everything needed to write the output, computed before the output is touched.
#[derive(Debug)]
pub struct RetypePlan {
    pub sections: FileSections,
    pub types: TypeElementMap,
    pub skipped: Vec<SkippedLine>,
    pub mapping: TypeMapping,
}

#[derive(Debug)]
pub struct RetypeReport {
    pub plan: RetypePlan,
    pub stats: RewriteStats,
}

fn fail<T>(reporter: &ProgressReporter, stage: Stage, err: RetypeError) -> Result<T, RetypeError> {
    reporter.report(Progress::Failed {
        stage,
        reason: err.to_string(),
    });
    Err(err)
}

/// Locates the sections, identifies the declared types and builds the type mapping.
pub fn plan(
    input: &DataFile,
    config: &RetypeConfig,
    reporter: &ProgressReporter,
) -> Result<RetypePlan, RetypeError> {
    let lines = input.lines();

    let sections = match locate_sections(lines, config.header_match) {
        Ok(sections) => sections,
        Err(e) => return fail(reporter, Stage::SectionsLocated, e.into()),
    };
    info!(
        "Found Masses at line {}: {:?}",
        sections.masses, lines[sections.masses]
    );
    info!(
        "Found Atoms at line {}: {:?}",
        sections.atoms, lines[sections.atoms]
    );
    reporter.enter(Stage::SectionsLocated);

    debug!(
        "Parsing masses from line {} to {}",
        sections.masses + 1,
        sections.atoms
    );
    let masses = match parse_masses(lines, &sections, &config.elements, config.tolerance) {
        Ok(masses) => masses,
        Err(e) => return fail(reporter, Stage::MassesParsed, e.into()),
    };
    if !masses.skipped.is_empty() {
        reporter.report(Progress::Message(format!(
            "Skipped {} Masses line(s)",
            masses.skipped.len()
        )));
    }
    reporter.enter(Stage::MassesParsed);

    let mapping = match config.ordering.build_mapping(&masses.types) {
        Ok(mapping) => mapping,
        Err(e) => return fail(reporter, Stage::MappingBuilt, e.into()),
    };
    info!(
        "Type remapping ({}): {}",
        config.ordering.name(),
        mapping
    );
    reporter.enter(Stage::MappingBuilt);

    Ok(RetypePlan {
        sections,
        types: masses.types,
        skipped: masses.skipped,
        mapping,
    })
}

/// Runs the whole transformation on an in-memory file.
#[instrument(skip_all, name = "retype_workflow")]
pub fn run(
    input: &DataFile,
    config: &RetypeConfig,
    writer: &mut impl Write,
    reporter: &ProgressReporter,
) -> Result<RetypeReport, RetypeError> {
    reporter.enter(Stage::Reading);
    debug!("Retyping {} in-memory lines", input.len());
    execute(input, config, || Ok(writer), reporter)
}

/// Reads `input_path`, and writes the retyped file to `output_path`.
///
/// The output file is only created once the mapping has been built, so data errors
/// never leave an output behind. A failure while writing can leave a partial file.
#[instrument(skip_all, name = "retype_workflow", fields(input = %input_path.display()))]
pub fn run_paths(
    input_path: &Path,
    output_path: &Path,
    config: &RetypeConfig,
    reporter: &ProgressReporter,
) -> Result<RetypeReport, RetypeError> {
    reporter.enter(Stage::Reading);
    let input = match DataFile::read_from_path(input_path) {
        Ok(input) => input,
        Err(e) => return fail(reporter, Stage::Reading, e.into()),
    };
    debug!("Read {} lines from {:?}", input.len(), input_path);

    let report = execute(
        &input,
        config,
        || File::create(output_path).map(BufWriter::new),
        reporter,
    )?;
    info!("Wrote {:?}", output_path);
    Ok(report)
}

/// Plans the run, then opens the writer and writes the retyped file.
fn execute<W, F>(
    input: &DataFile,
    config: &RetypeConfig,
    open_writer: F,
    reporter: &ProgressReporter,
) -> Result<RetypeReport, RetypeError>
where
    W: Write,
    F: FnOnce() -> io::Result<W>,
{
    let plan = plan(input, config, reporter)?;

    reporter.enter(Stage::Writing);
    let written = open_writer().and_then(|mut writer| {
        write_retyped(
            input.lines(),
            &plan.sections,
            &plan.mapping,
            &config.rewrite_options(),
            &mut writer,
        )
    });
    let stats = match written {
        Ok(stats) => stats,
        Err(e) => return fail(reporter, Stage::Writing, RetypeError::Write(e)),
    };
    if stats.records_unmapped > 0 {
        reporter.report(Progress::Message(format!(
            "{} atom line(s) kept their original type",
            stats.records_unmapped
        )));
    }
    reporter.enter(Stage::Done);

    Ok(RetypeReport { plan, stats })
}
