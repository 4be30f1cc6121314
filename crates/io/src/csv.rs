// CSV/TSV read/write for part lists and catalogs

use std::io::Read;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
pub fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(10)
        .collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                ::csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (number of lines with same field count as line 1) * field_count
        // Higher field count breaks ties: more columns, more likely the real delimiter
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    Ok(match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Read every row of `content` as raw string cells, header row included.
///
/// Rows may have different lengths; blank lines are skipped by the reader.
/// Deciding which row (if any) is the header is left to the caller.
pub fn read_records(content: &str, delimiter: u8) -> Result<Vec<Vec<String>>, String> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format!("row {}: {e}", row_idx + 1))?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }

    Ok(rows)
}

/// Write a header row followed by `rows` as comma-separated CSV.
///
/// Every row is padded or truncated to the header width so the file stays rectangular.
pub fn write_records(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<(), String> {
    let mut writer = ::csv::WriterBuilder::new()
        .delimiter(b',')
        .from_path(path)
        .map_err(|e| format!("cannot create {}: {e}", path.display()))?;

    writer.write_record(headers).map_err(|e| e.to_string())?;

    let width = headers.len();
    for row in rows {
        let mut record: Vec<&str> = row.iter().map(String::as_str).take(width).collect();
        record.resize(width, "");
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_sniff_semicolon_delimiter() {
        let content = "Ancho;Alto;Acabado\n80;250;Blanco\n300;500;Negro\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_comma_delimiter() {
        let content = "Modelo,Color,Alto,Ancho,ARTICULO\nZENIT 06,BLANCO SM,250,100,X1\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_tab_delimiter() {
        let content = "Ancho\tAlto\tAcabado\n80\t250\tBlanco\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn test_sniff_semicolon_with_commas_in_values() {
        let content = "Gama;Acabado;Ancho\n\"LAC, mate\";Blanco;80\nLAC;Negro;300\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_single_column_defaults_to_comma() {
        assert_eq!(sniff_delimiter("Ancho\n80\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_read_records_keeps_header_row() {
        let rows = read_records("Ancho,Alto\n80,250\n", b',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Ancho", "Alto"]);
        assert_eq!(rows[1], vec!["80", "250"]);
    }

    #[test]
    fn test_read_records_flexible_widths() {
        let rows = read_records("a,b,c\n1,2\n1,2,3,4\n", b',').unwrap();
        assert_eq!(rows[1].len(), 2);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn test_windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        // "Tipología" with 0xED for í
        fs::write(&path, b"Tipolog\xeda,Ancho\nPuerta,80\n").unwrap();

        let text = read_file_as_utf8(&path).unwrap();
        assert!(text.starts_with("Tipología,Ancho"));
    }

    #[test]
    fn test_bom_is_stripped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bom.csv");
        fs::write(&path, "\u{feff}Ancho,Alto\n80,250\n").unwrap();

        let text = read_file_as_utf8(&path).unwrap();
        assert!(text.starts_with("Ancho"));
    }

    #[test]
    fn test_write_records_pads_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let headers = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let rows = vec![vec!["1".to_string()], vec!["x, y".to_string(), "2".to_string(), "3".to_string()]];

        write_records(&path, &headers, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "A,B,C\n1,,\n\"x, y\",2,3\n");
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let headers = vec!["Codigo_ALVIC".to_string(), "Match_type".to_string()];
        let rows = vec![vec!["X1".to_string(), "EXACT".to_string()]];
        write_records(&path, &headers, &rows).unwrap();

        let content = read_file_as_utf8(&path).unwrap();
        let read = read_records(&content, sniff_delimiter(&content)).unwrap();
        assert_eq!(read[0], headers);
        assert_eq!(read[1], rows[0]);
    }
}
