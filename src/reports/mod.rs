//! Report generation
//!
//! Renders the derived traffic series as chart artifacts. Rendering is a
//! pure consumer: it receives plain label/value series plus titles and axis
//! labels, and knows nothing about how the series were computed.

pub mod svg;

use crate::Result;
use crate::traffic::Series;
use camino::Utf8Path;
use ohno::IntoAppError;
use std::fs;

const LOG_TARGET: &str = "   reports";

/// Render one chart to a file, creating any missing containing directory.
///
/// An empty series produces no file at all: the write is skipped, not
/// performed with an empty plot.
pub fn write_chart(path: &Utf8Path, series: &Series, title: &str, x_label: &str, y_label: &str) -> Result<()> {
    if series.is_empty() {
        log::debug!(target: LOG_TARGET, "skipping {path}: series is empty");
        return Ok(());
    }

    let mut rendered = String::new();
    svg::generate(series, title, x_label, y_label, &mut rendered)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_app_err_with(|| format!("creating directory '{parent}'"))?;
    }
    fs::write(path, rendered).into_app_err_with(|| format!("writing chart '{path}'"))?;
    log::info!(target: LOG_TARGET, "wrote {path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn chart_path(tmp: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().join("stats/traffic_daily.svg")).unwrap()
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn empty_series_writes_no_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = chart_path(&tmp);

        write_chart(&path, &Series::default(), "Daily Unique Visitors", "date", "unique visitors").unwrap();

        assert!(!path.as_std_path().exists());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn non_empty_series_writes_a_chart() {
        let tmp = tempfile::tempdir().unwrap();
        let path = chart_path(&tmp);

        let series = Series {
            labels: vec!["2025-11-26".to_string(), "2025-11-27".to_string()],
            values: vec![4, 5],
        };
        write_chart(&path, &series, "Daily Unique Visitors", "date", "unique visitors").unwrap();

        let contents = fs::read_to_string(path.as_std_path()).unwrap();
        assert!(contents.contains("Daily Unique Visitors"));
        assert!(contents.trim_end().ends_with("</svg>"));
    }
}
