//! Command dispatch logic for prompt-eval

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use prompt_eval_core::chat::AnthropicClient;
use prompt_eval_core::config::Config;
use prompt_eval_core::debug_time;
use prompt_eval_core::error::{EvalError, Result};
use tracing::debug;

use crate::cli::{ApiArgs, Cli, Commands};
use crate::commands::{ask, generate, grade, report, run};
use crate::output;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: Config,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, config: Config, start: Instant) -> Self {
        Self { cli, config, start }
    }

    /// Build the API client for the model under test.
    ///
    /// Flags win over config; a missing key fails here, before any request.
    pub fn client(&self, api: &ApiArgs) -> Result<AnthropicClient> {
        let api_key = api.api_key.clone().unwrap_or_default();
        let api_base = api
            .api_base
            .clone()
            .unwrap_or_else(|| self.config.model.api_base.clone());
        let model = api
            .model
            .clone()
            .unwrap_or_else(|| self.config.model.name.clone());

        AnthropicClient::new(api_key, api_base, model)
    }

    /// Attach a sink that echoes streamed text to stdout, in human mode only.
    pub fn echo_stream(&self, client: AnthropicClient) -> AnthropicClient {
        if self.cli.chatty() {
            client.with_delta_sink(Arc::new(output::print_delta))
        } else {
            client
        }
    }

    /// Drive an async command to completion on a single-threaded runtime.
    pub fn block_on<F: Future>(&self, future: F) -> Result<F::Output> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| EvalError::Other(format!("failed to start async runtime: {}", e)))?;
        Ok(runtime.block_on(future))
    }
}

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::resolve(cli.config.as_deref(), &cwd)?;
    debug!(elapsed = ?start.elapsed(), "load_config");

    let ctx = CommandContext::new(cli, config, start);

    let result = match &cli.command {
        Commands::Run(args) => run::execute(&ctx, args),
        Commands::Report(args) => report::execute(&ctx, args),
        Commands::Grade(args) => grade::execute(&ctx, args),
        Commands::Ask(args) => ask::execute(&ctx, args),
        Commands::Generate(args) => generate::execute(&ctx, args),
    };

    debug_time!(ctx.start, "execute_command");
    result
}
