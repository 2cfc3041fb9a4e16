use std::path::PathBuf;

use apitest::{
    CaseDefinition, CaseType, Config, HttpMethod, Instance, OutputFormat, OutputLevel,
    OutputTarget,
};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use serde_json::json;
use tracing::error;

/// Run the sample cases against a built-in `/hello` handler.
#[derive(Debug, Parser)]
#[command(name = "apitest-demo", version)]
struct Args {
    /// TOML config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print protocol details for failed cases
    #[arg(short, long)]
    verbose: bool,

    /// Print response bodies for passed cases
    #[arg(long)]
    show_result: bool,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,

    /// Colour statuses and performance labels
    #[arg(long)]
    color: bool,

    /// Also write the report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Exit with code 1 if any case failed
    #[arg(long)]
    exit_on_failure: bool,

    /// Only run cases issued with this method (any case)
    #[arg(long, value_name = "METHOD")]
    method: Option<HttpMethod>,
}

impl Args {
    fn into_config(self) -> apitest::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if self.verbose {
            config.level = OutputLevel::Verbose;
        }
        if self.show_result {
            config.show_result = true;
        }
        if self.json {
            config.format = OutputFormat::Json;
        }
        if self.color {
            config.color = true;
        }
        if let Some(path) = self.report {
            config.output = OutputTarget::Both;
            config.report_path = Some(path);
        }
        if self.exit_on_failure {
            config.exit_on_failure = true;
        }

        Ok(config)
    }
}

async fn hello() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "message": "hello world!" })))
}

fn router() -> Router {
    Router::new().route("/hello", get(hello))
}

fn cases() -> Vec<CaseDefinition> {
    vec![
        CaseDefinition::new("TC_01", HttpMethod::Get, "/hello", 200)
            .case_type(CaseType::HappyPath)
            .details("Sample case"),
        CaseDefinition::new("TC_02", HttpMethod::Get, "/hello", 400)
            .case_type(CaseType::NegativeCase)
            .details("Another sample case"),
        CaseDefinition::new("TC_03", HttpMethod::Post, "/hello", 405)
            .case_type(CaseType::EdgeCase)
            .details("Method not allowed"),
        CaseDefinition::new("TC_04", HttpMethod::Get, "/hello", 200)
            .details("Ignored case")
            .skip(true),
    ]
}

async fn run(args: Args) -> apitest::Result<()> {
    let method = args.method;
    let config = args.into_config()?;
    let mut instance = Instance::start(config, router()).await?;

    for case in cases()
        .into_iter()
        .filter(|case| method.is_none_or(|m| m == case.method))
    {
        instance.add(case).await?;
    }

    instance.dump()?;
    instance.shutdown().await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    apitest::logging::init(args.verbose);

    if let Err(err) = run(args).await {
        error!(error = %err, "api test run failed");
        std::process::exit(2);
    }
}
