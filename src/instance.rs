use std::time::Duration;

use axum::Router;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::http::client::{build_client, execute};
use crate::report::{self, Report};
use crate::server::TestServer;
use crate::testing::{CaseDefinition, ResultSequence, RunSummary};

/// One test run: the embedded server, the client that drives it, every
/// recorded result and the totals of the last report.
#[derive(Debug)]
pub struct Instance {
    server: TestServer,
    client: Client,
    cases: ResultSequence,
    config: Config,
    summary: RunSummary,
}

impl Instance {
    /// Validate `config`, then serve `router` on a loopback port.
    ///
    /// ```no_run
    /// use apitest::{Config, Instance};
    /// use axum::{Router, routing::get};
    ///
    /// # async fn run() -> apitest::Result<()> {
    /// let router = Router::new().route("/hello", get(|| async { "hello" }));
    /// let instance = Instance::start(Config::default(), router).await?;
    /// instance.shutdown().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn start(config: Config, router: Router) -> Result<Self> {
        config.validate()?;

        let client = build_client(config.request_timeout_ms.map(Duration::from_millis))?;
        let server = TestServer::start(router).await?;

        Ok(Self {
            server,
            client,
            cases: ResultSequence::new(),
            config,
            summary: RunSummary::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.server.base_url()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cases(&self) -> &ResultSequence {
        &self.cases
    }

    /// Totals stored by the last [`Instance::dump`].
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Execute `case` and record its result. Skipped cases are neither sent
    /// nor recorded. On error nothing is recorded.
    pub async fn add(&mut self, case: CaseDefinition) -> Result<()> {
        if case.skip {
            debug!(id = %case.id, "skipping case");
            return Ok(());
        }

        let record = execute(&self.client, self.server.base_url(), &case).await?;
        self.cases.append(record);
        Ok(())
    }

    /// Analyze every recorded result once and return the classified items.
    pub fn report(&self) -> Report<'_> {
        Report::analyze(&self.cases)
    }

    /// Analyze, render and emit the report, then store its totals.
    ///
    /// With `exit_on_failure` set the process exits with code 1 when a case
    /// failed.
    pub fn dump(&mut self) -> Result<RunSummary> {
        let (output, summary) = {
            let report = self.report();
            let output = report::formatter_for(&self.config).render(&report)?;
            (output, report.summary)
        };

        report::emit(&output, &self.config)?;
        self.summary = summary;

        if self.config.exit_on_failure && summary.has_failures() {
            info!(failed = summary.failed, "exiting after failed cases");
            std::process::exit(report::exit_code(&summary));
        }

        Ok(summary)
    }

    /// Stop the embedded server.
    pub async fn shutdown(self) -> Result<()> {
        self.server.shutdown().await
    }
}
