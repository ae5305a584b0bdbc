use anyhow::Result;
use std::path::{Path, PathBuf};

use ytlyric_core::{
    config::Config,
    lyrics::{convert_with_config, try_srt_to_lrc},
    YtLyricError,
};

pub async fn run(input: &Path, output: Option<&Path>, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    let result = convert(config, input.to_path_buf(), output.map(Path::to_path_buf)).await?;

    match result {
        Ok(path) => {
            println!("Output: {}", path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(e.into())
        }
    }
}

/// Run one conversion off the async runtime.
///
/// An explicit output path wins over the configured output directory.
pub async fn convert(
    config: Config,
    input: PathBuf,
    output: Option<PathBuf>,
) -> Result<Result<PathBuf, YtLyricError>> {
    let result = tokio::task::spawn_blocking(move || match output {
        Some(path) => try_srt_to_lrc(&input, Some(&path)).map_err(YtLyricError::from),
        None => convert_with_config(&config, &input),
    })
    .await?;

    Ok(result)
}
