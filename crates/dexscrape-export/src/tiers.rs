use std::fs::File;
use std::io::BufWriter;
use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::{Context, Result};

use crate::dex::{self, ExportOptions};
use crate::species;

/// Generations covered when no range is given.
pub const DEFAULT_GENERATIONS: RangeInclusive<u8> = 1..=7;

/// Convert `gen{i}.json` to `gen{i}.csv` for every generation in the range.
///
/// Stops at the first missing or malformed input. Returns the total row count.
pub fn export_generations(
    input_dir: &Path,
    output_dir: &Path,
    generations: RangeInclusive<u8>,
    options: &ExportOptions,
) -> Result<usize> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut total = 0;
    for generation in generations {
        let input = input_dir.join(format!("gen{generation}.json"));
        let output = output_dir.join(format!("gen{generation}.csv"));
        let rows = export_file(&input, &output, options)
            .with_context(|| format!("Generation {generation} failed"))?;
        tracing::info!(generation, rows, path = %output.display(), "Wrote generation");
        total += rows;
    }
    Ok(total)
}

/// Convert one JSON export to a species file without moves.
pub fn export_file(input: &Path, output: &Path, options: &ExportOptions) -> Result<usize> {
    let species = dex::read_species(input, &options.pointer)?;
    let file = File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
    let rows = species::write_species(&species, options, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(rows)
}
