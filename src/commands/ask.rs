//! `prompt-eval ask`

use prompt_eval_core::chat::{ChatSession, SendOptions};
use prompt_eval_core::error::Result;

use crate::cli::{AskArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;
use crate::output;

pub fn execute(ctx: &CommandContext, args: &AskArgs) -> Result<()> {
    let client = ctx.client(&args.api)?;
    let echo = args.stream && ctx.cli.chatty();
    let client = if echo {
        ctx.echo_stream(client)
    } else {
        client
    };

    let mut session = ChatSession::new();
    session.add_user_message(args.prompt.as_str());
    if let Some(prefill) = &args.prefill {
        session.add_assistant_message(prefill.as_str());
    }

    let mut options = SendOptions::new(args.max_tokens)
        .with_stream(args.stream)
        .with_stop_sequences(args.stop.clone());
    if let Some(system) = &args.system {
        options = options.with_system(system.as_str());
    }

    if echo {
        output::print_delta(args.prefill.as_deref().unwrap_or_default());
    }
    let reply = ctx.block_on(session.send(&client, None, options))??;

    match ctx.cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reply)?),
        OutputFormat::Human => {
            if echo {
                println!();
            } else {
                println!("{}{}", args.prefill.as_deref().unwrap_or_default(), reply.answer);
            }
            if !ctx.cli.quiet {
                output::print_usage(&reply);
            }
        }
    }
    Ok(())
}
