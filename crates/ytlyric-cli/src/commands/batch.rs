use anyhow::{bail, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

use ytlyric_core::config::Config;

#[derive(Debug)]
enum Outcome {
    Converted(PathBuf),
    Failed(String),
    Skipped,
}

pub async fn run(
    input: &Path,
    parallel: Option<usize>,
    output_dir: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = Config::load(config_path)?;
    if output_dir.is_some() {
        config.lyrics.output_directory = output_dir;
    }
    let parallel = parallel.unwrap_or(config.batch.max_parallel).max(1);
    let continue_on_error = config.batch.continue_on_error;

    let files = drop_duplicate_outputs(&config, collect_inputs(input).await?);

    if files.is_empty() {
        println!("No subtitle files found in {}", input.display());
        return Ok(());
    }

    println!("Converting {} files with {} parallel workers\n", files.len(), parallel);
    info!("Batch conversion of {} files from {}", files.len(), input.display());

    let results = convert_all(files, &config, parallel).await?;

    // Summary
    let succeeded = results
        .iter()
        .filter(|(_, o)| matches!(o, Outcome::Converted(_)))
        .count();
    let skipped = results
        .iter()
        .filter(|(_, o)| matches!(o, Outcome::Skipped))
        .count();
    let failed: Vec<_> = results
        .iter()
        .filter_map(|(file, o)| match o {
            Outcome::Failed(e) => Some((file, e)),
            _ => None,
        })
        .collect();

    println!("\n=== Batch Complete ===");
    println!("Succeeded: {}", succeeded);
    println!("Failed: {}", failed.len());
    if skipped > 0 {
        println!("Skipped: {}", skipped);
    }

    if !failed.is_empty() {
        println!("\nFailed files:");
        for (file, e) in &failed {
            println!("  {} - {}", file.display(), e);
        }

        if !continue_on_error {
            bail!("Batch stopped after {} failure(s)", failed.len());
        }
    }

    Ok(())
}

/// Convert each file, at most `parallel` at a time.
///
/// Without `continue_on_error`, files not yet started after the first failure
/// are reported as skipped.
async fn convert_all(
    files: Vec<PathBuf>,
    config: &Config,
    parallel: usize,
) -> Result<Vec<(PathBuf, Outcome)>> {
    let total = files.len();
    let continue_on_error = config.batch.continue_on_error;
    let stop = Arc::new(AtomicBool::new(false));
    let multi = MultiProgress::new();

    let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {msg}")?.tick_chars("=>-");

    let results = stream::iter(files.into_iter().enumerate())
        .map(|(idx, file)| {
            let stop = stop.clone();
            let config = config.clone();
            let pb = multi.add(ProgressBar::new_spinner());
            pb.set_style(spinner_style.clone());

            async move {
                let name = file_label(&file);

                if stop.load(Ordering::Relaxed) {
                    pb.finish_with_message(format!("[{}/{}] Skipped: {}", idx + 1, total, name));
                    return (file, Outcome::Skipped);
                }

                pb.set_message(format!("[{}/{}] {}", idx + 1, total, name));
                pb.enable_steady_tick(std::time::Duration::from_millis(100));

                let outcome = match super::lyrics::convert(config, file.clone(), None).await {
                    Ok(Ok(path)) => Outcome::Converted(path),
                    Ok(Err(e)) => Outcome::Failed(e.to_string()),
                    Err(e) => Outcome::Failed(e.to_string()),
                };

                match &outcome {
                    Outcome::Converted(path) => {
                        pb.finish_with_message(format!(
                            "[{}/{}] Done: {}",
                            idx + 1,
                            total,
                            file_label(path)
                        ));
                    }
                    Outcome::Failed(e) => {
                        if !continue_on_error {
                            stop.store(true, Ordering::Relaxed);
                        }
                        pb.finish_with_message(format!("[{}/{}] Failed: {}", idx + 1, total, e));
                    }
                    Outcome::Skipped => {}
                }

                (file, outcome)
            }
        })
        .buffer_unordered(parallel)
        .collect::<Vec<_>>()
        .await;

    Ok(results)
}

/// Expand the batch input into a list of subtitle files.
///
/// A directory yields its `.srt` files (sorted, non-recursive); any other path
/// is read as a list of subtitle paths, one per line, relative to the list.
async fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    let meta = fs::metadata(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    if meta.is_dir() {
        let mut entries = fs::read_dir(input)
            .await
            .context("Failed to read input directory")?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if is_srt(&path) && entry.file_type().await?.is_file() {
                files.push(path);
            }
        }
        files.sort();
        debug!("Found {} subtitle files in {}", files.len(), input.display());
        return Ok(files);
    }

    let content = fs::read_to_string(input)
        .await
        .context("Failed to read input file")?;

    let base = input.parent().unwrap_or_else(|| Path::new(""));

    Ok(content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| base.join(l))
        .collect())
}

/// Keep the first input for each output path; later ones would overwrite it
fn drop_duplicate_outputs(config: &Config, files: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();

    files
        .into_iter()
        .filter(|file| {
            let output = config.lyrics_output_path(file);
            if seen.insert(output.clone()) {
                return true;
            }
            warn!(
                "Skipping {}: output {} is already produced by another input",
                file.display(),
                output.display()
            );
            false
        })
        .collect()
}

fn is_srt(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("srt"))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}
