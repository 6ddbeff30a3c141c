use glob::glob;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::ChartSpec;
use crate::compare::CompareJob;
use crate::error::{PlotError, Result};
use crate::render::{ChartWriter, Plot, Renderer};

#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Plot(Plot),
    Compare(CompareJob),
}

impl Job {
    pub fn inputs(&self) -> Vec<&Path> {
        match self {
            Job::Plot(plot) => plot.inputs().collect(),
            Job::Compare(job) => vec![job.path_a.as_path(), job.path_b.as_path()],
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Job::Plot(plot) => format!("chart '{}'", plot.spec.title),
            Job::Compare(job) => format!("comparison {}", job.output),
        }
    }

    fn check_inputs(&self) -> Result<()> {
        match self.inputs().into_iter().find(|path| !path.exists()) {
            Some(missing) => Err(PlotError::MissingInput(missing.to_path_buf())),
            None => Ok(()),
        }
    }
}

impl From<Plot> for Job {
    fn from(plot: Plot) -> Job {
        Job::Plot(plot)
    }
}

impl From<CompareJob> for Job {
    fn from(job: CompareJob) -> Job {
        Job::Compare(job)
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<(String, PlotError)>,
}

impl BatchReport {
    pub fn log_summary(&self) {
        log::info!("{} files written, {} jobs skipped", self.written.len(), self.skipped.len());
    }
}

/// Runs the jobs in order. A failing job is logged and skipped; it never
/// stops the jobs after it.
pub fn run_batch<W: ChartWriter>(renderer: &mut Renderer<W>, jobs: &[Job]) -> BatchReport {
    let mut report = BatchReport::default();

    for job in jobs {
        let result = job.check_inputs().and_then(|()| match job {
            Job::Plot(plot) => renderer.render(plot),
            Job::Compare(compare) => compare.run(renderer.output_dir()),
        });

        match result {
            Ok(path) => report.written.push(path),
            Err(err) => {
                log::warn!("skipping {}: {}", job.describe(), err);
                report.skipped.push((job.describe(), err));
            }
        }
    }

    report
}

/// One single-series job per file matching `pattern`, titled by the file stem.
pub fn jobs_from_glob(pattern: &str, y_label: &str, x_label: &str) -> Result<Vec<Job>> {
    let mut jobs: Vec<Job> = Vec::new();
    for entry in glob(pattern)? {
        let path = entry.map_err(|e| e.into_error())?;
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        jobs.push(Plot::single(&path, ChartSpec::new(y_label, x_label, &title)).into());
    }
    Ok(jobs)
}

/// Appends the `extra` jobs whose inputs are not already read by `jobs`.
/// Returns how many were added.
pub fn extend_unique(jobs: &mut Vec<Job>, extra: Vec<Job>) -> usize {
    let mut seen: HashSet<PathBuf> = jobs.iter().flat_map(|job| job.inputs()).map(same_file_key).collect();
    let mut added = 0;
    for job in extra {
        let keys: Vec<PathBuf> = job.inputs().into_iter().map(same_file_key).collect();
        if keys.iter().any(|key| seen.contains(key)) {
            log::debug!("{} already covered, not adding it again", job.describe());
            continue;
        }
        seen.extend(keys);
        jobs.push(job);
        added += 1;
    }
    added
}

// `./io_ms.csv` and `io_ms.csv` are the same file.
fn same_file_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
