//! CSV export of named series.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::analysis::CorporateTaxDataset;
use crate::Series;

/// Write one series to `{dir}/{prefix}_{name}.csv` with a `date,value`
/// header. Returns the path written.
pub fn export_series_csv(series: &Series, prefix: &str, dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(format!("{prefix}_{}.csv", series.name()));
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "date,value")?;
    for obs in series.iter() {
        writeln!(writer, "{},{}", obs.date, obs.value)?;
    }

    writer.flush()?;
    Ok(path)
}

/// Export every non-empty dataset member; returns the paths written.
pub fn export_dataset_csv(
    dataset: &CorporateTaxDataset,
    prefix: &str,
    dir: &Path,
) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for series in dataset.named_series() {
        paths.push(export_series_csv(series, prefix, dir)?);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Observation, ObservationDate};

    fn sample_series(name: &str) -> Series {
        Series::new(
            name,
            [("2020-01-01", 10.0), ("2020-04-01", 12.5)].iter().map(|&(d, v)| {
                Observation::new(ObservationDate::parse(d).expect("valid date"), v)
            }),
        )
    }

    #[test]
    fn writes_header_and_rows_to_prefixed_filename() {
        let dir = tempfile::tempdir().expect("temp dir");
        let series = sample_series("effective_tax_rate_quarterly");

        let path = export_series_csv(&series, "corporate_tax_data", dir.path())
            .expect("export should succeed");

        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("corporate_tax_data_effective_tax_rate_quarterly.csv")
        );

        let contents = std::fs::read_to_string(&path).expect("file was written");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "date,value");
        assert_eq!(lines[1], "2020-01-01,10");
        assert_eq!(lines[2], "2020-04-01,12.5");
    }

    #[test]
    fn empty_series_exports_header_only() {
        let dir = tempfile::tempdir().expect("temp dir");
        let series = Series::empty("empty");

        let path = export_series_csv(&series, "prefix", dir.path()).expect("export should succeed");
        let contents = std::fs::read_to_string(&path).expect("file was written");
        assert_eq!(contents, "date,value\n");
    }
}
