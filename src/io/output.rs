use chrono::Local;
use std::{
    fs::{self, File, OpenOptions},
    io::{prelude::*, BufWriter},
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{algorithms::aco::IterationReport, error::Result, operators::solution::TourRecord};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressEntry {
    pub iteration: usize,
    pub best_length: f64,
    pub mean_length: f64,
}

impl From<&IterationReport<'_>> for ProgressEntry {
    fn from(report: &IterationReport<'_>) -> Self {
        ProgressEntry {
            iteration: report.iteration,
            best_length: report.best_length,
            mean_length: report.mean_length,
        }
    }
}

pub fn run_folder(results_folder: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
    results_folder.join(stamp)
}

pub fn write_tour(folder: &Path, name: &str, record: &TourRecord) -> Result<()> {
    let mut file = get_file(folder, &format!("{}.tour", name))?;

    writeln!(file, "{}", record.length)?;
    for node in &record.tour {
        writeln!(file, "{}", node)?;
    }

    file.flush()?;
    Ok(())
}

pub fn write_progress(folder: &Path, name: &str, progress: &[ProgressEntry]) -> Result<()> {
    let mut file = get_file(folder, &format!("{}_progress.csv", name))?;

    writeln!(file, "iteration,best_length,mean_length")?;
    for entry in progress {
        writeln!(
            file,
            "{},{},{}",
            entry.iteration, entry.best_length, entry.mean_length
        )?;
    }

    file.flush()?;
    Ok(())
}

pub fn write_running_time(folder: &Path, name: &str, elapsed: Duration) -> Result<()> {
    let mut file = get_file(folder, &format!("{}_running_time.out", name))?;
    write!(file, "{}", elapsed.as_millis())?;

    file.flush()?;
    Ok(())
}

fn get_file(folder: &Path, file: &str) -> Result<BufWriter<File>> {
    fs::create_dir_all(folder)?;
    let path = folder.join(file);

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    Ok(BufWriter::new(file))
}
