// Writing species rows, optionally with a scraped moves column.

use std::io::{self, Write};

use dexscrape_acquire::{MoveSource, PageFetcher, SiteConfig};
use dexscrape_model::{
    DexSpecies, MoveRecord, PyLiteral, SPECIES_HEADER, SPECIES_HEADER_WITH_MOVES, move_details_literal,
    move_names_literal,
};

use crate::dex::{self, ExportOptions};
use crate::writer::DelimitedWriter;

/// Shape of the moves column and the site it is scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovesColumn {
    /// `['Tackle', 'Growl']` from the database site.
    Names,
    /// `{'Tackle': {'Type': 'Normal', ...}}` from the wiki.
    Detailed,
}

impl MovesColumn {
    pub fn source(self) -> MoveSource {
        match self {
            MovesColumn::Names => MoveSource::Veekun,
            MovesColumn::Detailed => MoveSource::Bulbapedia,
        }
    }

    pub fn render(self, moves: &[MoveRecord]) -> PyLiteral {
        match self {
            MovesColumn::Names => move_names_literal(moves),
            MovesColumn::Detailed => move_details_literal(moves),
        }
    }
}

/// Write every non-collapsed species, one row per form. Returns the row count.
pub fn write_species<W: Write>(
    species: &[DexSpecies],
    options: &ExportOptions,
    out: W,
) -> io::Result<usize> {
    let mut writer = DelimitedWriter::new(out, SPECIES_HEADER)?;
    for entry in species {
        if options.is_collapsed(&entry.name) {
            tracing::debug!(species = %entry.name, "Skipping collapsed form");
            continue;
        }
        for row in dex::expand_rows(entry, options, None) {
            writer.write_line(&row.to_line())?;
        }
    }
    let (_, rows) = writer.finish()?;
    Ok(rows)
}

/// Like [`write_species`], with a trailing moves column.
///
/// The database site keys pages by form, so [`MovesColumn::Names`] scrapes
/// each form under its display name. The wiki has one article per species,
/// so [`MovesColumn::Detailed`] scrapes once and shares the result across
/// forms. A page that cannot be scraped gives an empty collection.
pub async fn write_species_with_moves<F: PageFetcher, W: Write>(
    species: &[DexSpecies],
    options: &ExportOptions,
    column: MovesColumn,
    fetcher: &F,
    sites: &SiteConfig,
    out: W,
) -> io::Result<usize> {
    let mut writer = DelimitedWriter::new(out, SPECIES_HEADER_WITH_MOVES)?;
    let source = column.source();

    for (index, entry) in species.iter().enumerate() {
        if options.is_collapsed(&entry.name) {
            tracing::debug!(species = %entry.name, "Skipping collapsed form");
            continue;
        }

        let mut forms = dex::expand_rows(entry, options, None);
        let mut scraped = 0;
        match column {
            MovesColumn::Names => {
                for row in &mut forms {
                    let records = source.moves_for(fetcher, sites, &row.name).await;
                    scraped += records.len();
                    row.moves = Some(column.render(&records));
                }
            }
            MovesColumn::Detailed => {
                let records = source.moves_for(fetcher, sites, &entry.name).await;
                scraped = records.len();
                let moves = column.render(&records);
                for row in &mut forms {
                    row.moves = Some(moves.clone());
                }
            }
        }

        tracing::info!(
            species = %entry.name,
            progress = format!("{}/{}", index + 1, species.len()),
            forms = forms.len(),
            moves = scraped,
            "Exported species"
        );
        for row in forms {
            writer.write_line(&row.to_line())?;
        }
    }

    let (_, rows) = writer.finish()?;
    Ok(rows)
}
