//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docket_domain::{Report, MAX_REPORT_ITEMS};
use docket_pipeline::{DocketConfig, Pipeline};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let pipeline_config = pipeline_config(&args, config)?;
    let (name, text) = read_brief(&args.file, args.name.as_deref())?;

    let pipeline = Pipeline::from_config(&pipeline_config)?;
    let report = pipeline.analyze_until(&name, text, interrupted()).await?;

    println!("{}", formatter.format_report(&report)?);
    Ok(())
}

/// Analyze a file without waiting on an interrupt.
pub async fn analyze_file(args: &AnalyzeArgs, config: &Config) -> Result<Report> {
    let pipeline_config = pipeline_config(args, config)?;
    let (name, text) = read_brief(&args.file, args.name.as_deref())?;

    let pipeline = Pipeline::from_config(&pipeline_config)?;
    Ok(pipeline.analyze(&name, text).await?)
}

/// Apply command-line overrides on top of the loaded configuration.
pub fn pipeline_config(args: &AnalyzeArgs, config: &Config) -> Result<DocketConfig> {
    let mut pipeline = config.pipeline.clone();

    if let Some(classifier) = args.classifier {
        pipeline.classifier.backend = classifier.into();
    }

    if let Some(model) = &args.model {
        pipeline.classifier.ollama.model = model.clone();
    }

    if let Some(endpoint) = &args.endpoint {
        pipeline.classifier.ollama.endpoint = endpoint.clone();
    }

    if let Some(top) = args.top {
        if top == 0 || top > MAX_REPORT_ITEMS {
            return Err(CliError::InvalidInput(format!(
                "--top must be between 1 and {}",
                MAX_REPORT_ITEMS
            )));
        }
        pipeline.ranker.top_n = top;
        pipeline.ranker.max_per_polarity = pipeline.ranker.max_per_polarity.min(top);
        pipeline.ranker.min_per_polarity = pipeline.ranker.min_per_polarity.min(top / 2);
    }

    pipeline
        .validate()
        .map_err(CliError::Config)?;
    debug!("Using {:?} classifier", pipeline.classifier.backend);
    Ok(pipeline)
}

/// Read a brief, naming it after the file unless a name is given.
pub(crate) fn read_brief(path: &Path, name: Option<&str>) -> Result<(String, String)> {
    let text = fs::read_to_string(path)?;
    let name = match name {
        Some(name) => name.to_string(),
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| CliError::InvalidInput(format!("Not a file: {}", path.display())))?,
    };
    Ok((name, text))
}

/// Completes on Ctrl-C; never completes if the handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ClassifierArg;
    use docket_classifier::BackendKind;
    use std::path::PathBuf;

    fn args(top: Option<usize>) -> AnalyzeArgs {
        AnalyzeArgs {
            file: PathBuf::from("brief.txt"),
            classifier: Some(ClassifierArg::Ollama),
            model: Some("llama3".to_string()),
            endpoint: None,
            top,
            name: None,
        }
    }

    #[test]
    fn test_overrides_applied() {
        let config = pipeline_config(&args(None), &Config::default()).unwrap();
        assert_eq!(config.classifier.backend, BackendKind::Ollama);
        assert_eq!(config.classifier.ollama.model, "llama3");
        assert_eq!(config.ranker.top_n, 10);
    }

    #[test]
    fn test_smaller_top_shrinks_quotas() {
        let config = pipeline_config(&args(Some(5)), &Config::default()).unwrap();
        assert_eq!(config.ranker.top_n, 5);
        assert_eq!(config.ranker.max_per_polarity, 5);
        assert_eq!(config.ranker.min_per_polarity, 2);
    }

    #[test]
    fn test_top_out_of_range() {
        assert!(matches!(
            pipeline_config(&args(Some(11)), &Config::default()),
            Err(CliError::InvalidInput(_))
        ));
        assert!(pipeline_config(&args(Some(0)), &Config::default()).is_err());
    }

    #[test]
    fn test_name_defaults_to_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reply.txt");
        fs::write(&path, "text").unwrap();

        let (name, text) = read_brief(&path, None).unwrap();
        assert_eq!(name, "reply.txt");
        assert_eq!(text, "text");

        let (name, _) = read_brief(&path, Some("Reply Brief")).unwrap();
        assert_eq!(name, "Reply Brief");
    }
}
