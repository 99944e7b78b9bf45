use super::atoms::{AtomLayout, AtomLine, classify_atom_line};
use super::sections::FileSections;
use crate::core::models::types::TypeMapping;
use std::io::{self, Write};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteOptions {
    pub layout: AtomLayout,
    pub min_atom_fields: usize,
    pub warn_unmapped: bool,
}

/// Counts of what happened to the lines following the Atoms header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub records_rewritten: usize,
    pub records_unmapped: usize,
    pub lines_dropped: usize,
}

pub fn format_mass_line(new_type: u32, mass: f64, symbol: &str) -> String {
    format!("            {}   {:.8}             # {}", new_type, mass, symbol)
}

/// Writes the retyped data file.
///
/// Lines up to and including the Masses header and the Atoms header itself are copied
/// verbatim; the Masses block is regenerated from `mapping` and atom records are
/// re-emitted with their new type.
pub fn write_retyped<S: AsRef<str>>(
    lines: &[S],
    sections: &FileSections,
    mapping: &TypeMapping,
    options: &RewriteOptions,
    writer: &mut impl Write,
) -> io::Result<RewriteStats> {
    let mut stats = RewriteStats::default();

    for line in &lines[sections.preamble()] {
        writer.write_all(line.as_ref().as_bytes())?;
    }
    writeln!(writer)?;

    for (new_type, element) in mapping.new_types() {
        writeln!(
            writer,
            "{}",
            format_mass_line(new_type, element.atomic_mass, &element.symbol)
        )?;
    }
    writeln!(writer)?;

    writer.write_all(lines[sections.atoms].as_ref().as_bytes())?;
    writeln!(writer)?;

    for (idx, raw) in lines.iter().enumerate().skip(sections.atoms + 1) {
        let raw = raw.as_ref();
        let record = match classify_atom_line(raw, options.min_atom_fields) {
            AtomLine::Ignored => continue,
            AtomLine::Unparseable => {
                debug!("Dropping non-atom line {}: {:?}", idx, raw);
                stats.lines_dropped += 1;
                continue;
            }
            AtomLine::Record(record) => record,
        };

        let Some(new_type) = mapping.get_raw(record.atom_type) else {
            if options.warn_unmapped {
                warn!("Type {} not in mapping (line {})", record.atom_type, idx);
            }
            writer.write_all(raw.as_bytes())?;
            stats.records_unmapped += 1;
            continue;
        };

        match options
            .layout
            .format(record.atom_id, new_type, &record.columns)
        {
            Some(formatted) => {
                writeln!(writer, "{}", formatted)?;
                stats.records_rewritten += 1;
            }
            None => {
                debug!("Dropping short atom record on line {}: {:?}", idx, raw);
                stats.lines_dropped += 1;
            }
        }
    }

    writer.flush()?;
    Ok(stats)
}
