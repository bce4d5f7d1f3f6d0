use chrono::Utc;
use std::path::PathBuf;

use crate::archive::{ArchiveBuilder, BuiltArchive};
use crate::augment::augment;
use crate::classify::classify;
use crate::config::Config;
use crate::errors::{Result, SiteGenError};
use crate::history::HistoryRecorder;
use crate::parse::parse;
use crate::prompt::{select_instructions, user_prompt};
use crate::provider::{invoke, DynProvider};
use crate::safety::is_contained_relative;
use crate::transcript;
use crate::wire::{ApplicationCategory, FileSet, GenerateRequest, GenerateResponse, HistoryEntry};

pub const CRUD_HISTORY_TYPE: &str = "CRUD Application";
pub const DEFAULT_REQUESTED_TYPE: &str = "static";

#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub reject_empty_response: bool,
    pub transcripts_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub id: String,
    pub category: ApplicationCategory,
    /// Files as parsed from the generator, before augmentation.
    pub files: FileSet,
    pub augmented: FileSet,
    pub archive: BuiltArchive,
    pub history_recorded: bool,
}

impl GenerationOutcome {
    pub fn to_response(&self) -> GenerateResponse {
        GenerateResponse {
            success: true,
            files: Some(self.files.clone()),
            download_path: Some(self.archive.download_path.clone()),
            category: Some(self.category),
            error: None,
        }
    }
}

/// classify -> select template -> invoke -> parse -> augment -> archive -> history
pub struct Pipeline {
    provider: DynProvider,
    archives: ArchiveBuilder,
    history: HistoryRecorder,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(provider: DynProvider, archives: ArchiveBuilder, history: HistoryRecorder) -> Self {
        Self { provider, archives, history, options: PipelineOptions::default() }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn from_config(cfg: &Config, provider: DynProvider) -> Self {
        Self::new(
            provider,
            ArchiveBuilder::new(&cfg.downloads_dir),
            HistoryRecorder::new(cfg.history_path()),
        )
        .with_options(PipelineOptions {
            reject_empty_response: cfg.reject_empty_response,
            transcripts_dir: cfg.save_transcripts.then(|| cfg.transcripts_dir()),
        })
    }

    pub fn history(&self) -> &HistoryRecorder {
        &self.history
    }

    pub async fn generate(&self, req: &GenerateRequest) -> Result<GenerationOutcome> {
        if req.prompt.trim().is_empty() {
            return Err(SiteGenError::Validation("Prompt is required".into()));
        }

        let category = classify(&req.prompt);
        let instructions = select_instructions(category);
        log::debug!("classified as {category}, template {}", instructions.version);

        let user = user_prompt(&req.prompt);
        let raw = invoke(self.provider.as_ref(), &instructions, &user).await?;

        let created_at = Utc::now();
        let stamp = created_at.timestamp_millis();
        let id = stamp.to_string();

        if let Some(dir) = &self.options.transcripts_dir {
            match transcript::save(dir, &id, &instructions, &user, &raw) {
                Ok(saved) => log::debug!(
                    "transcript saved: {} / {}",
                    saved.request.display(),
                    saved.response.display()
                ),
                Err(e) => log::warn!("could not save transcript {id}: {e}"),
            }
        }

        let files = parse(&raw);
        if files.is_empty() {
            if self.options.reject_empty_response {
                return Err(SiteGenError::GenerationService(
                    "response contained no `File:` sections".into(),
                ));
            }
            log::warn!("response {id} contained no `File:` sections; archiving defaults");
        } else {
            log::debug!("parsed {} files: {:?}", files.len(), files.paths());
            for path in files.paths().into_iter().filter(|p| !is_contained_relative(p)) {
                log::warn!("ignoring unsafe generated path {path:?}");
            }
        }

        let augmented = augment(&files, category);
        let archive = self.archives.build(&augmented, category, stamp)?;

        let entry = HistoryEntry {
            id: id.clone(),
            prompt: req.prompt.clone(),
            kind: history_type(category, req.requested_type.as_deref()),
            generated_files: files.clone(),
            created_at,
        };
        let history_recorded = match self.history.record(entry).await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("history append failed for {id}: {e}");
                false
            }
        };

        log::info!("generated {} project {} -> {}", category, id, archive.download_path);
        Ok(GenerationOutcome { id, category, files, augmented, archive, history_recorded })
    }

    /// Request boundary: every failure becomes `{ success: false, error }`.
    /// The error comes back next to the body so a transport can pick a status.
    pub async fn handle_generate(
        &self,
        req: &GenerateRequest,
    ) -> (GenerateResponse, Option<SiteGenError>) {
        match self.generate(req).await {
            Ok(outcome) => (outcome.to_response(), None),
            Err(e) => {
                log::error!("generation failed: {e}");
                (GenerateResponse::failure(e.to_string()), Some(e))
            }
        }
    }
}

fn history_type(category: ApplicationCategory, requested: Option<&str>) -> String {
    match category {
        ApplicationCategory::Crud => CRUD_HISTORY_TYPE.to_string(),
        ApplicationCategory::Static => requested
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_REQUESTED_TYPE)
            .to_string(),
    }
}
