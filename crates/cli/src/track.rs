//! Replay a recorded location track against one authorized area.
//!
//! Input: CSV with `latitude` and `longitude` columns (extra columns are kept).
//! Output: the same frame plus a `containment` column. Rows with a missing
//! coordinate are `UNKNOWN` (never classified), rows failing validation are
//! `INVALID`.

use anyhow::{Context, Result};
use geofence::prelude::*;
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

pub const UNKNOWN: &str = "UNKNOWN";
pub const INVALID: &str = "INVALID";

/// Per-class row counts for one replayed track.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrackSummary {
    pub rows: usize,
    pub inside: usize,
    pub on_border: usize,
    pub outside: usize,
    pub unknown: usize,
    pub invalid: usize,
    /// First row that would trigger a fresh authority query.
    pub first_outside: Option<usize>,
}

impl TrackSummary {
    fn record(&mut self, row: usize, result: ContainmentResult) {
        match result {
            ContainmentResult::Inside => self.inside += 1,
            ContainmentResult::OnBorder => self.on_border += 1,
            ContainmentResult::Outside => {
                self.outside += 1;
                self.first_outside.get_or_insert(row);
            }
        }
    }
}

/// Classify one optional fix; `None` coordinates stay unclassified.
pub fn classify_row<A: AreaShape + ?Sized>(
    area: &A,
    lat: Option<f64>,
    lon: Option<f64>,
) -> std::result::Result<Option<ContainmentResult>, GeofenceError> {
    let (Some(lat), Some(lon)) = (lat, lon) else {
        return Ok(None);
    };
    let point = GeoPoint::new(lat, lon)?;
    Ok(Some(check_location(area, point)))
}

/// Read `input`, classify every row and return the annotated frame.
pub fn classify_track<A: AreaShape + ?Sized>(
    area: &A,
    input: &Path,
) -> Result<(DataFrame, TrackSummary)> {
    let mut df = LazyCsvReader::new(input)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening track {}", input.display()))?
        .collect()
        .with_context(|| format!("reading track {}", input.display()))?;

    let lat = df
        .column("latitude")
        .context("track needs a `latitude` column")?
        .cast(&DataType::Float64)?;
    let lon = df
        .column("longitude")
        .context("track needs a `longitude` column")?
        .cast(&DataType::Float64)?;

    let mut summary = TrackSummary {
        rows: df.height(),
        ..TrackSummary::default()
    };
    let mut labels: Vec<&'static str> = Vec::with_capacity(df.height());
    for (row, (la, lo)) in lat.f64()?.into_iter().zip(lon.f64()?.into_iter()).enumerate() {
        let label = match classify_row(area, la, lo) {
            Ok(Some(result)) => {
                summary.record(row, result);
                result.as_str()
            }
            Ok(None) => {
                summary.unknown += 1;
                UNKNOWN
            }
            Err(err) => {
                tracing::warn!(row, %err, "track_row_rejected");
                summary.invalid += 1;
                INVALID
            }
        };
        labels.push(label);
    }
    df.with_column(Series::new("containment".into(), labels))?;
    tracing::info!(
        rows = summary.rows,
        inside = summary.inside,
        on_border = summary.on_border,
        outside = summary.outside,
        unknown = summary.unknown,
        invalid = summary.invalid,
        "track_classified"
    );
    Ok((df, summary))
}

/// Write `df` as CSV (with header) to `out`, creating parent directories.
pub fn write_csv(df: &mut DataFrame, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn area_at(lat: f64, lon: f64) -> AuthorizedArea {
        let mut draws = FixedDraws::constant(0.5).unwrap();
        let cfg = EllipseCfg {
            center_leeway_degrees: 0.0,
            ..EllipseCfg::default()
        };
        let loc = DeviceLocation::new(GeoPoint::new(lat, lon).unwrap());
        create_area_with(&cfg, &loc, &mut draws).unwrap()
    }

    #[test]
    fn missing_coordinates_are_not_classified() {
        let area = area_at(9.9, 2.5);
        assert_eq!(classify_row(&area, None, Some(2.5)).unwrap(), None);
        assert_eq!(classify_row(&area, Some(9.9), None).unwrap(), None);
        assert_eq!(
            classify_row(&area, Some(9.9), Some(2.5)).unwrap(),
            Some(ContainmentResult::Inside)
        );
        assert!(classify_row(&area, Some(f64::NAN), Some(2.5)).is_err());
        assert!(classify_row(&area, Some(95.0), Some(2.5)).is_err());
    }

    #[test]
    fn track_roundtrip_annotates_each_row() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("drive.csv");
        fs::write(
            &input,
            "t,latitude,longitude\n0,9.9,2.5\n1,9.9,2.502\n2,,2.5\n3,9.9,4.5\n4,91.0,2.5\n5,9.9,2.5\n",
        )
        .unwrap();
        let area = area_at(9.9, 2.5);
        let (mut df, summary) = classify_track(&area, &input).unwrap();
        assert_eq!(
            summary,
            TrackSummary {
                rows: 6,
                inside: 3,
                on_border: 0,
                outside: 1,
                unknown: 1,
                invalid: 1,
                first_outside: Some(3),
            }
        );
        let labels: Vec<Option<&str>> = df.column("containment").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(
            labels,
            vec![
                Some("INSIDE"),
                Some("INSIDE"),
                Some(UNKNOWN),
                Some("OUTSIDE"),
                Some(INVALID),
                Some("INSIDE"),
            ]
        );

        let out = dir.path().join("out").join("classified.csv");
        write_csv(&mut df, &out).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("t,latitude,longitude,containment"));
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn track_without_coordinates_is_an_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.csv");
        fs::write(&input, "t,lat,lon\n0,1.0,2.0\n").unwrap();
        let area = area_at(1.0, 2.0);
        assert!(classify_track(&area, &input).is_err());
    }
}
