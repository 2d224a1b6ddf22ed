// llmctl - Model inspection and log tailing
use anyhow::Context;
use clap::Parser;
use llmctl::cli::output::ConsoleWriter;
use llmctl::cli::{execute_command, Args, OutputWriter};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let writer = ConsoleWriter::new(args.output);

    if let Err(e) = run(args).await {
        if writer.write_error(&format!("{:#}", e)).is_err() {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let command = args.command.name();
    execute_command(args)
        .await
        .with_context(|| format!("llmctl {}", command))
}
