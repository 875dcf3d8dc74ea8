//! CLI runner - executes commands

use crate::auth::AuthConfig;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::engine::{Metered, PaginationDriver, TransferResult, TransferStats};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::loader::{
    load_definition, parse_sink_method, render_definition, AuthDefinition, SinkDefinition,
    SourceDefinition, TransferDefinition,
};
use crate::outcome::Outcome;
use crate::sink::{HttpSink, ItemSink, JsonlSink};
use crate::source::{FileSource, HttpPageSource, PageSource};
use crate::template::TemplateContext;
use serde_json::{json, Value};
use std::fs;
use std::time::Duration;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    ///
    /// Returns `Ok(false)` when a transfer ran but failed.
    pub fn run(&self) -> Result<bool> {
        match &self.cli.command {
            Commands::Run { stepwise } => self.transfer(*stepwise),
            Commands::Validate => self.validate().map(|()| true),
        }
    }

    /// Load transfer definition
    fn load_definition(&self) -> Result<TransferDefinition> {
        let path = self
            .cli
            .definition
            .as_ref()
            .ok_or_else(|| Error::config("Transfer definition not specified (use -d flag)"))?;
        load_definition(path)
    }

    /// Load config from inline JSON or file
    fn load_config(&self) -> Result<Value> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return serde_json::from_str(json_str)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")));
        }

        if let Some(path) = &self.cli.config {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
            return serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")));
        }

        Ok(json!({}))
    }

    fn transfer(&self, stepwise: bool) -> Result<bool> {
        let def = self.load_definition()?;
        let mut ctx = TemplateContext::with_config(self.load_config()?);
        ctx.capture_env();
        let def = render_definition(&def, &ctx)?;

        info!(name = %def.name, source = def.source.kind(), sink = def.sink.kind(), "Starting transfer");
        let (result, stats) = Self::execute(&def, stepwise)?;
        let succeeded = result.is_success();
        self.write_message(&summary(&def, &result, &stats)?, message_stream(&def.sink));
        Ok(succeeded)
    }

    /// Build the collaborators of a rendered definition and run the transfer
    pub fn execute(
        def: &TransferDefinition,
        stepwise: bool,
    ) -> Result<(TransferResult, TransferStats)> {
        let source = Metered::new(build_source(def)?);
        let sink = Metered::new(build_sink(def)?);
        let mut driver = PaginationDriver::new(source, sink);

        let result = if stepwise {
            driver.transfer_stepwise()
        } else {
            driver.transfer()
        };

        let (source, sink) = driver.into_parts();
        // dropping the sink here closes its output
        let (_, sink_stats) = sink.into_parts();
        let stats = source.stats().clone().merge(&sink_stats);
        Ok((result, stats))
    }

    /// Validate transfer definition
    fn validate(&self) -> Result<()> {
        let def = self.load_definition()?;

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Transfer '{}' is valid: {} -> {}",
                    def.name,
                    def.source.kind(),
                    def.sink.kind()
                )
            }
        }));

        Ok(())
    }

    /// Output a message on stdout
    fn output_message(&self, msg: &Value) {
        self.write_message(msg, MessageStream::Stdout);
    }

    /// Output a message in the configured format
    fn write_message(&self, msg: &Value, stream: MessageStream) {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg).unwrap_or_default(),
            OutputFormat::Pretty => serde_json::to_string_pretty(msg).unwrap_or_default(),
        };
        match stream {
            MessageStream::Stdout => println!("{text}"),
            MessageStream::Stderr => eprintln!("{text}"),
        }
    }
}

/// Where protocol messages are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageStream {
    Stdout,
    Stderr,
}

/// A stdout sink owns stdout, so messages move to stderr
fn message_stream(sink: &SinkDefinition) -> MessageStream {
    match sink {
        SinkDefinition::Stdout => MessageStream::Stderr,
        SinkDefinition::Http { .. } | SinkDefinition::Jsonl { .. } => MessageStream::Stdout,
    }
}

// ============================================================================
// Collaborator Construction
// ============================================================================

fn http_client(def: &TransferDefinition, auth: Option<&AuthDefinition>) -> Result<HttpClient> {
    let mut builder = HttpClientConfig::builder()
        .timeout(Duration::from_secs(def.http.timeout_secs))
        .headers(def.headers.clone());
    if let Some(agent) = &def.http.user_agent {
        builder = builder.user_agent(agent);
    }

    let auth = match auth {
        Some(auth) => auth.to_config()?,
        None => AuthConfig::None,
    };
    HttpClient::with_auth(builder.build(), auth)
}

fn build_source(def: &TransferDefinition) -> Result<Box<dyn PageSource>> {
    let source: Box<dyn PageSource> = match &def.source {
        SourceDefinition::Http {
            url,
            items_path,
            pagination,
            auth,
            params,
        } => {
            let client = http_client(def, auth.as_ref())?;
            Box::new(
                HttpPageSource::new(
                    client,
                    url,
                    pagination.strategy(),
                    pagination.layout(items_path.as_deref()),
                )
                .with_params(params.clone()),
            )
        }
        SourceDefinition::File { path } => Box::new(FileSource::from_path(path)?),
    };
    Ok(source)
}

fn build_sink(def: &TransferDefinition) -> Result<Box<dyn ItemSink>> {
    let sink: Box<dyn ItemSink> = match &def.sink {
        SinkDefinition::Http { url, method, auth } => {
            let client = http_client(def, auth.as_ref())?;
            Box::new(HttpSink::new(client, url).with_method(parse_sink_method(method)?)?)
        }
        SinkDefinition::Jsonl { path } => Box::new(JsonlSink::create(path)?),
        SinkDefinition::Stdout => Box::new(JsonlSink::stdout()),
    };
    Ok(sink)
}

/// Summary message printed after a transfer
fn summary(def: &TransferDefinition, result: &TransferResult, stats: &TransferStats) -> Result<Value> {
    let mut message = json!({
        "type": "TRANSFER",
        "name": def.name,
        "status": if result.is_success() { "SUCCEEDED" } else { "FAILED" },
        "duration_ms": stats.duration_ms(),
    });
    if let (Value::Object(fields), Value::Object(counts)) =
        (&mut message, serde_json::to_value(stats)?)
    {
        fields.extend(counts);
    }
    if let Outcome::Failure(error) = result {
        message["error"] = json!(error.to_string());
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_definition_from_str;
    use pretty_assertions::assert_eq;

    fn write_pages(dir: &std::path::Path) -> std::path::PathBuf {
        let path = dir.join("pages.json");
        fs::write(
            &path,
            r#"[
                {"items": [{"payload": {"sku": "a"}}, {"payload": {"sku": "b"}}], "hasMore": true},
                {"items": [{"payload": {"sku": "c"}}], "hasMore": false}
            ]"#,
        )
        .unwrap();
        path
    }

    fn file_definition(input: &std::path::Path, output: &std::path::Path) -> TransferDefinition {
        load_definition_from_str(&format!(
            "name: replay\nsource: {{ type: file, path: '{}' }}\nsink: {{ type: jsonl, path: '{}' }}\n",
            input.display(),
            output.display()
        ))
        .unwrap()
    }

    #[test]
    fn test_execute_file_to_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_pages(dir.path());
        let output = dir.path().join("out.jsonl");
        let def = file_definition(&input, &output);

        let (result, stats) = Runner::execute(&def, false).unwrap();
        assert!(result.success().unwrap());
        assert_eq!(stats.pages_fetched, 2);
        assert_eq!(stats.pages_published, 2);
        assert_eq!(stats.items_published, 3);

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_execute_stepwise_matches_lazy() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_pages(dir.path());
        let def = file_definition(&input, &dir.path().join("lazy.jsonl"));
        let (_, lazy) = Runner::execute(&def, false).unwrap();
        let def = file_definition(&input, &dir.path().join("stepwise.jsonl"));
        let (_, stepwise) = Runner::execute(&def, true).unwrap();

        assert_eq!(lazy.pages_fetched, stepwise.pages_fetched);
        assert_eq!(lazy.items_published, stepwise.items_published);
    }

    #[test]
    fn test_execute_missing_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let def = file_definition(&dir.path().join("absent.json"), &dir.path().join("out.jsonl"));
        assert!(matches!(
            Runner::execute(&def, false),
            Err(Error::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_summary_leaves_stdout_to_stdout_sink() {
        let stdout = load_definition_from_str(
            "name: t\nsource: { type: file, path: in.json }\nsink: { type: stdout }\n",
        )
        .unwrap();
        assert_eq!(message_stream(&stdout.sink), MessageStream::Stderr);

        let jsonl = load_definition_from_str(
            "name: t\nsource: { type: file, path: in.json }\nsink: { type: jsonl, path: out.jsonl }\n",
        )
        .unwrap();
        assert_eq!(message_stream(&jsonl.sink), MessageStream::Stdout);
    }

    #[test]
    fn test_summary_message() {
        let def = load_definition_from_str(
            "name: t\nsource: { type: file, path: in.json }\nsink: { type: stdout }\n",
        )
        .unwrap();
        let mut stats = TransferStats::new();
        stats.add_fetched(2);
        stats.add_published(2);

        let ok = summary(&def, &Outcome::Success(true), &stats).unwrap();
        assert_eq!(ok["type"], "TRANSFER");
        assert_eq!(ok["status"], "SUCCEEDED");
        assert_eq!(ok["items_published"], 2);
        assert!(ok.get("error").is_none());

        let failed = Outcome::Failure(Error::publish(Error::other("closed")));
        let message = summary(&def, &failed, &stats).unwrap();
        assert_eq!(message["status"], "FAILED");
        assert_eq!(message["error"], "Failed to publish items: closed");
    }
}
