// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use docx_translate::app_config::{self, Config, TranslationProvider};
use docx_translate::Controller;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Ollama,
    #[value(name = "openai")]
    OpenAI,
    #[value(name = "lmstudio")]
    LMStudio,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::LMStudio => TranslationProvider::LMStudio,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for docx-translate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// docx-translate - translate Word documents while keeping their formatting
#[derive(Parser, Debug)]
#[command(name = "docx-translate")]
#[command(version)]
#[command(about = "Translate .docx documents while keeping their formatting")]
#[command(long_about = "docx-translate translates every paragraph and table cell of a Word document
and writes the result to a new document, keeping the formatting of each paragraph.

EXAMPLES:
    docx-translate report.docx                     # English to Danish, writes report_translated.docx
    docx-translate -s de -t en brief.docx out.docx # German to English into out.docx
    docx-translate -p ollama -m llama3.2:3b a.docx # Use a local Ollama model
    docx-translate --log-level debug ./letters/    # Translate every .docx in a directory
    docx-translate --init-config                   # Write the default conf.json
    docx-translate completions bash > dt.bash      # Generate bash completions

CONFIGURATION:
    Configuration is read from conf.json by default. You can specify a different
    file with --config. A missing file means built-in defaults.

SUPPORTED PROVIDERS:
    google    - Google Translate web endpoint (default, no key needed)
    ollama    - Local Ollama server (default: llama3.2:3b)
    openai    - OpenAI API (requires API key)
    lmstudio  - LM Studio local server (OpenAI-compatible on http://localhost:1234/v1)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input .docx file or directory to translate
    #[arg(value_name = "INPUT")]
    input_path: Option<PathBuf>,

    /// Output .docx file (single-file mode only)
    #[arg(value_name = "OUTPUT")]
    output_path: Option<PathBuf>,

    /// Source language code (e.g., 'en', 'de', 'auto')
    #[arg(short, long = "source")]
    source_language: Option<String>,

    /// Target language code (e.g., 'da', 'fr', 'zh-CN')
    #[arg(short, long = "target")]
    target_language: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the translation provider
    #[arg(short = 'k', long, env = "DOCX_TRANSLATE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    init_config: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger accepts everything; the global max level does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "docx-translate", &mut std::io::stdout());
        return Ok(());
    }

    run_translate(cli).await
}

/// Apply command line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, options: &CommandLineOptions) {
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(model) = &options.model {
        config.set_model(model.clone());
    }
    if let Some(api_key) = &options.api_key {
        config.set_api_key(api_key.clone());
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

async fn run_translate(options: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.into());
    }

    if options.init_config {
        let mut config = Config::default();
        apply_overrides(&mut config, &options);
        config.save(&options.config_path)?;
        info!("Default configuration written to {}", options.config_path.display());
        return Ok(());
    }

    let mut config = Config::load_or_default(&options.config_path)?;
    apply_overrides(&mut config, &options);
    log::set_max_level(config.log_level.into());

    config.validate().context("Configuration validation failed")?;

    let input_path = options
        .input_path
        .clone()
        .ok_or_else(|| anyhow!("INPUT is required"))?;

    let controller = Controller::with_config(config)?;

    if input_path.is_dir() {
        if options.output_path.is_some() {
            return Err(anyhow!("OUTPUT cannot be used when INPUT is a directory"));
        }
        controller.run_folder(&input_path).await?;
    } else {
        controller
            .run(&input_path, options.output_path.clone())
            .await?;
    }

    Ok(())
}
