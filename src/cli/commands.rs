use crate::cli::args::{Args, Command, ConfigCommand, LogsArgs, ShowArgs};
use crate::cli::output::{ConsoleWriter, OutputWriter};
use crate::core::logs::{cancel_pair, follow_with_interval, tail};
use crate::domain::config::LlmCtlConfig;
use crate::domain::error::{LlmCtlError, LlmCtlResult};
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::paths::LogPaths;
use crate::infrastructure::source::{JsonFileSource, ModelSource};
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};

/// Execute CLI command
pub async fn execute_command(args: Args) -> LlmCtlResult<()> {
    let writer = ConsoleWriter::new(args.output);

    // Load configuration using ConfigManager
    let config_manager = ConfigManager::new()?;
    let config = if let Some(config_path) = &args.config {
        config_manager.load_config_from_path(config_path)?
    } else {
        config_manager.load_config()?
    };

    // Initialize logging
    if !args.quiet {
        let level = if args.debug { "debug" } else { config.global.log_level.as_str() };
        init_logging(level).map_err(|e| LlmCtlError::Config {
            message: format!("Failed to initialize logging: {}", e),
        })?;
    }

    match args.command {
        Command::Show(show_args) => {
            let source = match &show_args.models_dir {
                Some(dir) => JsonFileSource::with_base_dir(dir),
                None => JsonFileSource::new(),
            };
            execute_show_command(&show_args, &source, &writer).await
        }
        Command::Logs(logs_args) => execute_logs_command(&logs_args, &config).await,
        Command::Paths => {
            writer.write_paths(&LogPaths::resolve(&config.logs))?;
            Ok(())
        }
        Command::Config(config_args) => match config_args.command {
            ConfigCommand::Show => {
                writer.write_config(&config)?;
                Ok(())
            }
            ConfigCommand::Init { path } => {
                let path = config_manager.init_config(path.as_deref())?;
                writer.write_message(&format!("Configuration written to {}", path.display()))?;
                Ok(())
            }
        },
        Command::Version => {
            writer.write_message(&format!("llmctl {}", env!("CARGO_PKG_VERSION")))?;
            Ok(())
        }
    }
}

/// Describe a model through `source` and print the report or one raw field
pub async fn execute_show_command(
    args: &ShowArgs,
    source: &dyn ModelSource,
    writer: &dyn OutputWriter,
) -> LlmCtlResult<()> {
    let description = source.describe(&args.model).await?;
    debug!("Loaded description for '{}'", args.model);

    match args.selected_field(&description) {
        Some(field) => writer.write_raw(field)?,
        None => writer.write_description(&description, args.verbose)?,
    }
    Ok(())
}

/// Pick the log file a `logs` invocation reads
pub fn resolve_log_path(args: &LogsArgs, config: &LlmCtlConfig) -> PathBuf {
    if let Some(file) = &args.file {
        return file.clone();
    }
    let paths = LogPaths::resolve(&config.logs);
    if args.app {
        paths.app_log
    } else {
        paths.server_log
    }
}

async fn execute_logs_command(args: &LogsArgs, config: &LlmCtlConfig) -> LlmCtlResult<()> {
    let path = resolve_log_path(args, config);
    let last_n = args.tail.unwrap_or(config.logs.default_tail);
    let mut stdout = io::stdout();

    if !args.follow {
        return tail(&path, last_n, &mut stdout);
    }

    let (handle, token) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, stopping log follow");
            handle.cancel();
        }
    });

    follow_with_interval(token, &path, last_n, &mut stdout, config.logs.poll_interval()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::OutputFormat;
    use crate::domain::model::ModelDescription;
    use async_trait::async_trait;

    struct StaticSource(ModelDescription);

    #[async_trait]
    impl ModelSource for StaticSource {
        async fn describe(&self, _name: &str) -> LlmCtlResult<ModelDescription> {
            Ok(self.0.clone())
        }
    }

    fn show_args(license: bool) -> ShowArgs {
        ShowArgs {
            model: "test".to_string(),
            models_dir: None,
            verbose: false,
            license,
            parameters: false,
            system: false,
            template: false,
            modelfile: false,
        }
    }

    #[tokio::test]
    async fn test_show_prints_raw_license() {
        let source = StaticSource(ModelDescription {
            license: "MIT License\nCopyright (c) Ollama\n".to_string(),
            ..ModelDescription::default()
        });
        let writer = ConsoleWriter::with_sink(OutputFormat::Text, Vec::new());

        execute_show_command(&show_args(true), &source, &writer).await.unwrap();
        assert_eq!(
            String::from_utf8(writer.into_inner()).unwrap(),
            "MIT License\nCopyright (c) Ollama\n"
        );
    }

    #[tokio::test]
    async fn test_show_renders_report() {
        let source = StaticSource(ModelDescription::default());
        let writer = ConsoleWriter::with_sink(OutputFormat::Text, Vec::new());

        execute_show_command(&show_args(false), &source, &writer).await.unwrap();
        assert!(String::from_utf8(writer.into_inner()).unwrap().starts_with("  Model\n"));
    }

    #[test]
    fn test_resolve_log_path() {
        let config = LlmCtlConfig {
            logs: crate::domain::config::LogsConfig {
                dir: Some(PathBuf::from("/srv/logs")),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut args = LogsArgs {
            tail: None,
            follow: false,
            app: false,
            file: None,
        };

        assert_eq!(resolve_log_path(&args, &config), PathBuf::from("/srv/logs/server.log"));
        args.app = true;
        assert_eq!(resolve_log_path(&args, &config), PathBuf::from("/srv/logs/app.log"));
        args.file = Some(PathBuf::from("other.log"));
        assert_eq!(resolve_log_path(&args, &config), PathBuf::from("other.log"));
    }
}
