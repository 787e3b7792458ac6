use std::io::{self, Write};

use dexscrape_model::{MOVE_LIST_HEADER, MoveListing};

/// Line-oriented sink for the semicolon-delimited files.
///
/// The header goes out on construction; rows are written as they arrive.
pub struct DelimitedWriter<W: Write> {
    out: W,
    rows: usize,
}

impl<W: Write> DelimitedWriter<W> {
    pub fn new(mut out: W, header: &str) -> io::Result<Self> {
        writeln!(out, "{header}")?;
        Ok(Self { out, rows: 0 })
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.rows += 1;
        Ok(())
    }

    /// Flush and hand back the sink with the row count.
    pub fn finish(mut self) -> io::Result<(W, usize)> {
        self.out.flush()?;
        Ok((self.out, self.rows))
    }
}

/// Write the global move list with its header.
pub fn write_move_list<W: Write>(listings: &[MoveListing], out: W) -> io::Result<usize> {
    let mut writer = DelimitedWriter::new(out, MOVE_LIST_HEADER)?;
    for listing in listings {
        writer.write_line(&listing.to_line())?;
    }
    let (_, rows) = writer.finish()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_then_rows() {
        let mut writer = DelimitedWriter::new(Vec::new(), "A;B").unwrap();
        writer.write_line("1;2").unwrap();
        writer.write_line("3;4").unwrap();

        let (bytes, rows) = writer.finish().unwrap();
        assert_eq!(rows, 2);
        assert_eq!(String::from_utf8(bytes).unwrap(), "A;B\n1;2\n3;4\n");
    }

    #[test]
    fn test_write_move_list() {
        let listings = vec![MoveListing {
            index: "001".into(),
            name: "Pound".into(),
            move_type: "Normal".into(),
            category: "Physical".into(),
            contest: "Tough".into(),
            pp: Some(35),
            power: Some(40),
            accuracy: None,
            generation: 1,
        }];
        let mut out = Vec::new();
        assert_eq!(write_move_list(&listings, &mut out).unwrap(), 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{MOVE_LIST_HEADER}\n001;Pound;Normal;Physical;Tough;35;40;None;1\n")
        );
    }

    #[test]
    fn test_empty_move_list_keeps_header() {
        let mut out = Vec::new();
        assert_eq!(write_move_list(&[], &mut out).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{MOVE_LIST_HEADER}\n"));
    }
}
