use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use zidian_config::Config;

/// Runtime config plus where it came from. Loading happens before tracing is
/// up, so the sources are reported by the caller.
pub struct LoadedConfig {
    pub config: Config,
    pub file: Option<PathBuf>,
    pub dotenv: Result<PathBuf, dotenvy::Error>,
}

/// Build the runtime config: file (if any), then `.env`, then process environment
pub fn load_config(path: Option<&Path>) -> anyhow::Result<LoadedConfig> {
    let dotenv = dotenvy::dotenv();

    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => Config::default(),
    };
    config.apply_env();

    Ok(LoadedConfig {
        config,
        file: path.map(Path::to_path_buf),
        dotenv,
    })
}

fn read_config_file(path: &Path) -> anyhow::Result<Config> {
    let file =
        File::open(path).with_context(|| format!("Failed to open config {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse config {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn config_file_values_are_read() {
        let path = std::env::temp_dir().join(format!("zidian-config-{}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        write!(file, r#"{{ "ui": {{ "format": "json", "max_input_chars": 2 }} }}"#).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.file.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.config.ui.format, zidian_config::OutputFormat::Json);
        assert_eq!(loaded.config.ui.max_input_chars, 2);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/zidian.json")))
            .err()
            .expect("missing file must fail");
        assert!(err.to_string().contains("Failed to open config"));
    }
}
