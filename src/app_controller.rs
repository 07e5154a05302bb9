use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::{AppError, DocumentError};
use crate::file_utils::FileManager;
use crate::translation::{DocumentRewriter, RewriteSummary, TranslationService};

// @module: Application controller for document translation

/// Outcome of a folder run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FolderSummary {
    /// Documents translated successfully
    pub translated: usize,
    /// Documents that failed
    pub failed: usize,
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Translation service shared by all documents of a run
    translator: TranslationService,
    // @field: Draw progress bars
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        let translator = TranslationService::new(&config.translation)?;
        Ok(Self::with_translator(config, translator))
    }

    /// Create a controller around an existing translation service
    pub fn with_translator(config: Config, translator: TranslationService) -> Self {
        Self {
            config,
            translator,
            show_progress: true,
        }
    }

    /// Enable or disable progress bars
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Translation service used by this controller
    pub fn translator(&self) -> &TranslationService {
        &self.translator
    }

    /// Translate one document
    ///
    /// Without `output` the result is written next to the input as
    /// `<stem>_translated.docx`.
    pub async fn run(&self, input_file: &Path, output_file: Option<PathBuf>) -> Result<RewriteSummary, AppError> {
        self.check_connection().await;

        let multi_progress = MultiProgress::new();
        let summary = self.run_with_progress(input_file, output_file, &multi_progress).await?;

        info!(
            "Translation complete: {} of {} paragraphs translated ({})",
            summary.paragraphs_translated,
            summary.paragraphs_seen,
            self.translator.stats().summary(self.translator.elapsed())
        );
        Ok(summary)
    }

    async fn run_with_progress(
        &self,
        input_file: &Path,
        output_file: Option<PathBuf>,
        multi_progress: &MultiProgress,
    ) -> Result<RewriteSummary, AppError> {
        let start_time = Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(DocumentError::NotFound(input_file.to_path_buf()).into());
        }

        let output_path = output_file.unwrap_or_else(|| FileManager::default_output_path(input_file));
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            FileManager::ensure_dir(parent).map_err(|e| AppError::File(e.to_string()))?;
        }

        info!(
            "{} {} -> {}",
            self.config.translation.provider.display_name(),
            self.config.source_language,
            self.config.target_language
        );

        let progress_bar = self.progress_bar(multi_progress, "paragraphs");
        let pb = progress_bar.clone();
        let rewriter = DocumentRewriter::new(&self.translator);
        let result = rewriter
            .rewrite_document_with_progress(
                input_file,
                &output_path,
                &self.config.source_language,
                &self.config.target_language,
                move |done, total| {
                    pb.set_length(total as u64);
                    pb.set_position(done as u64);
                },
            )
            .await;
        progress_bar.finish_and_clear();

        let summary = result?;
        info!(
            "Success: {} ({})",
            output_path.display(),
            Self::format_duration(start_time.elapsed())
        );
        Ok(summary)
    }

    /// Translate every document under `input_dir`
    ///
    /// Each output lands next to its input. A failing document is logged
    /// and skipped; the run fails if any document failed.
    pub async fn run_folder(&self, input_dir: &Path) -> Result<FolderSummary, AppError> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::File(format!("Input directory does not exist: {:?}", input_dir)));
        }

        let documents = FileManager::find_docx_files(input_dir).map_err(|e| AppError::File(e.to_string()))?;
        if documents.is_empty() {
            return Err(AppError::File(format!("No .docx files found in directory: {:?}", input_dir)));
        }

        self.check_connection().await;

        let multi_progress = MultiProgress::new();
        let folder_pb = self.progress_bar(&multi_progress, "files");
        folder_pb.set_length(documents.len() as u64);
        folder_pb.set_message("Processing files");

        let mut summary = FolderSummary::default();
        for document in &documents {
            let file_name = document
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            match self.run_with_progress(document, None, &multi_progress).await {
                Ok(_) => summary.translated += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.failed += 1;
                }
            }
            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");
        info!(
            "Folder processing completed: {} translated, {} errors in {} ({})",
            summary.translated,
            summary.failed,
            Self::format_duration(start_time.elapsed()),
            self.translator.stats().summary(self.translator.elapsed())
        );

        if summary.failed > 0 {
            warn!("Some documents were not translated");
            return Err(AppError::FolderFailed {
                failed: summary.failed,
                total: documents.len(),
            });
        }
        Ok(summary)
    }

    // A failed check is not fatal: untranslated paragraphs keep their text
    async fn check_connection(&self) {
        match self.translator.test_connection().await {
            Ok(()) => debug!("Connected to {}", self.translator.provider_name()),
            Err(e) => warn!(
                "Connection check for {} failed: {}; untranslated text will be kept as-is",
                self.translator.provider_name(),
                e
            ),
        }
    }

    fn progress_bar(&self, multi_progress: &MultiProgress, unit: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = multi_progress.add(ProgressBar::new(0));
        let template_result = ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
                unit
            ))
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
