use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::Matrix;
use crate::error::{ClassifierError, Result};

/// Feature rows and their raw label strings, as read from a delimited file.
#[derive(Clone, Debug)]
pub struct Records {
    pub features: Matrix,
    pub labels: Vec<String>,
    /// Rows dropped because they did not parse into the expected shape.
    pub skipped: usize,
}

impl Records {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Loads `features..., label` rows from a CSV (or TSV, by extension) file
/// with a header line.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Records> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let is_tsv = path.extension().map(|e| e == "tsv").unwrap_or(false);
    let delimiter = if is_tsv { b'\t' } else { b',' };

    let records = read_records(BufReader::new(file), delimiter)?;
    log::info!(
        "Loaded {} records from {:?} ({} skipped)",
        records.len(),
        path,
        records.skipped
    );
    Ok(records)
}

/// Every column but the last is a float feature, the last is the label. The
/// first valid row fixes the feature width; rows that do not match it, fail to
/// parse, or have an empty label are skipped.
pub fn read_records<R: Read>(reader: R, delimiter: u8) -> Result<Records> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut width: Option<usize> = None;
    let mut values = Vec::new();
    let mut labels = Vec::new();
    let mut skipped = 0;

    for (line, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(ClassifierError::Csv(e)),
            Err(e) => {
                log::debug!("Skipping record {}: {}", line + 1, e);
                skipped += 1;
                continue;
            }
        };

        match parse_record(&record, width) {
            Some((row, label)) => {
                width.get_or_insert(row.len());
                values.extend(row);
                labels.push(label);
            }
            None => {
                log::trace!("Skipping malformed record {}: {:?}", line + 1, record);
                skipped += 1;
            }
        }
    }

    let n_features = width.unwrap_or(0);
    let features = Matrix::from_shape_vec((labels.len(), n_features), values)
        .map_err(|e| ClassifierError::InvalidInput(e.to_string()))?;

    if skipped > 0 {
        log::debug!("Skipped {} malformed records", skipped);
    }

    Ok(Records {
        features,
        labels,
        skipped,
    })
}

fn parse_record(record: &StringRecord, width: Option<usize>) -> Option<(Vec<f64>, String)> {
    let n_fields = record.len();
    if n_fields < 2 {
        return None;
    }
    if let Some(width) = width {
        if n_fields != width + 1 {
            return None;
        }
    }

    let label = record.get(n_fields - 1)?;
    if label.is_empty() {
        return None;
    }

    let row = record
        .iter()
        .take(n_fields - 1)
        .map(|field| field.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<f64>>>()?;

    Some((row, label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const IRIS_SAMPLE: &str = "\
sepal_length,sepal_width,petal_length,petal_width,species
5.1,3.5,1.4,0.2,setosa
4.9,3.0,1.4,0.2,setosa
7.0,3.2,4.7,1.4,versicolor
bad,3.2,4.7,1.4,versicolor
6.3,3.3,6.0,virginica
6.3,3.3,6.0,2.5,
6.3,3.3,6.0,2.5,virginica
";

    #[test]
    fn test_read_records_skips_malformed_rows() {
        let records = read_records(IRIS_SAMPLE.as_bytes(), b',').unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records.skipped, 3);
        assert_eq!(records.features.shape(), &[4, 4]);
        assert_eq!(records.labels, vec!["setosa", "setosa", "versicolor", "virginica"]);
        assert!((records.features[[2, 0]] - 7.0).abs() < 1e-12);
        assert!((records.features[[3, 3]] - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_read_tab_separated() {
        let data = "a\tb\tlabel\n1.0\t2.0\tx\n 3.0 \t4.0\t y \n";
        let records = read_records(data.as_bytes(), b'\t').unwrap();
        assert_eq!(records.labels, vec!["x", "y"]);
        assert!((records.features[[1, 0]] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_header_only() {
        let records = read_records("a,b,label\n".as_bytes(), b',').unwrap();
        assert!(records.is_empty());
        assert_eq!(records.features.shape(), &[0, 0]);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_records("/definitely/not/here.csv"),
            Err(ClassifierError::Io(_))
        ));
    }
}
