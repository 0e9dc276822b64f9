//! CLI command handlers.

use anyhow::{Context, Result};
use claimquery::{create_backend, Config, QueryExecutor};

use super::output;

/// Run the ask command: answer a question from the configured records.
pub async fn run_ask(
    config: Config,
    question: String,
    filter: Option<String>,
    json_output: bool,
) -> Result<()> {
    let backend = create_backend(&config)
        .await
        .context("Failed to open claim records")?;
    let executor = QueryExecutor::new(backend);

    let answer = executor.answer(&question, filter.as_deref()).await;
    output::print_answer(answer.as_ref(), json_output)
}

/// Run the plan command: show the backend request a question maps to.
pub fn run_plan(question: String, filter: Option<String>, json_output: bool) -> Result<()> {
    let plan = claimquery::query::plan_request(&question, filter.as_deref());
    output::print_plan(plan.as_ref(), json_output)
}
