use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::{Args, ProviderKind};
use crate::errors::{Result, SiteGenError};
use crate::history::DEFAULT_RECENT;

pub const CRUD_DATA_FILE: &str = "crud_data.json";
pub const HISTORY_FILE: &str = "promptHistory.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: String,
    pub downloads_dir: String,
    pub provider: ProviderKind,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub openai_base: String,
    pub anthropic_base: String,
    pub anthropic_version: String,
    pub ollama_url: String,
    pub bind: String,
    pub history_limit: usize,
    /// Treat a response without any `File:` marker as a generation failure.
    pub reject_empty_response: bool,
    pub save_transcripts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "data".into(),
            downloads_dir: "public/downloads".into(),
            provider: ProviderKind::OpenAI,
            model: "gpt-4o".into(),
            max_tokens: 2000,
            temperature: 1.0,
            timeout_secs: 2400,
            openai_base: "https://api.openai.com".into(),
            anthropic_base: "https://api.anthropic.com".into(),
            anthropic_version: "2023-06-01".into(),
            ollama_url: "http://localhost:11434".into(),
            bind: "127.0.0.1:5000".into(),
            history_limit: DEFAULT_RECENT,
            reject_empty_response: false,
            save_transcripts: false,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| SiteGenError::Config(e.to_string()))?;
        toml::from_str(&raw)
            .map_err(|e| SiteGenError::Config(format!("{}: {e}", path.display())))
    }

    /// Defaults, then the `--config` file, then any flag given on the command line.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut cfg = match &args.config {
            Some(p) => Self::from_file(Path::new(p))?,
            None => Self::default(),
        };
        if let Some(p) = &args.provider { cfg.provider = p.clone(); }
        if let Some(m) = &args.model { cfg.model = m.clone(); }
        if let Some(d) = &args.data_dir { cfg.data_dir = d.clone(); }
        if let Some(d) = &args.downloads_dir { cfg.downloads_dir = d.clone(); }
        if let Some(t) = args.timeout_secs { cfg.timeout_secs = t; }
        if let Some(b) = &args.bind { cfg.bind = b.clone(); }
        if args.save_transcripts { cfg.save_transcripts = true; }
        Ok(cfg)
    }

    pub fn items_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(CRUD_DATA_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(HISTORY_FILE)
    }

    pub fn transcripts_dir(&self) -> PathBuf {
        Path::new(&self.data_dir).join("tx")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sitegen.toml");
        std::fs::write(&path, "model = \"gpt-4.1-mini\"\nprovider = \"ollama\"\nhistory_limit = 5\n").unwrap();
        let cfg = Config::from_file(&path).unwrap();
        assert_eq!(cfg.model, "gpt-4.1-mini");
        assert!(matches!(cfg.provider, ProviderKind::Ollama));
        assert_eq!(cfg.history_limit, 5);
        assert_eq!(cfg.max_tokens, 2000);
        assert_eq!(cfg.downloads_dir, "public/downloads");
    }

    #[test]
    fn flags_override_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sitegen.toml");
        std::fs::write(&path, "model = \"from-file\"\ndata_dir = \"file-data\"\n").unwrap();
        let args = Args::parse_from([
            "vibe_sitegen",
            "--config", path.to_str().unwrap(),
            "--model", "from-flag",
            "history",
        ]);
        let cfg = Config::resolve(&args).unwrap();
        assert_eq!(cfg.model, "from-flag");
        assert_eq!(cfg.data_dir, "file-data");
        assert_eq!(cfg.history_path(), Path::new("file-data").join("promptHistory.json"));
    }

    #[test]
    fn bad_toml_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sitegen.toml");
        std::fs::write(&path, "max_tokens = \"lots\"").unwrap();
        assert!(matches!(Config::from_file(&path), Err(SiteGenError::Config(_))));
    }
}
