use anyhow::Result;
use clap::Parser;
use cognibank::api::BackendClient;
use cognibank::cli::{AdminCommand, Cli, Commands};
use cognibank::commands::{self, CalcArgs, CommandContext};
use cognibank::config::resolve_config;
use cognibank::observability::{init_logging, install_panic_hook, set_operation, Operation};
use std::io::Write;

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // init must work even when an existing config file is invalid
    if let Commands::Init { force } = cli.command {
        return commands::init_config(force);
    }

    let config = {
        let _op = set_operation(Operation::ConfigLoad);
        resolve_config(cli.api_url.as_deref(), cli.demo)?
    };
    let ctx = CommandContext::new(config, cli.format, cli.plain);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Calc {
            loan_type,
            amount,
            credit_score,
            tenure,
            policy,
        } => {
            let args = CalcArgs {
                loan_type,
                amount,
                credit_score,
                tenure,
                policy,
            };
            commands::run_calc(&ctx, &args, &mut out)
        }
        Commands::LoanTypes => commands::show_loan_types(&ctx, &mut out),
        command => run_backend_command(&ctx, command, &mut out),
    }
}

// Commands that talk to the backend share one runtime and client
fn run_backend_command(ctx: &CommandContext, command: Commands, out: &mut dyn Write) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let cwd = std::env::current_dir()?;

    runtime.block_on(async {
        let client = BackendClient::from_config(&ctx.config);
        tracing::debug!(base_url = %ctx.config.base_url(), "backend client ready");

        match command {
            Commands::Chat { loan_type } => {
                let input = tokio::io::BufReader::new(tokio::io::stdin());
                let fmt = ctx.formatter();
                commands::run_chat(&client, loan_type, input, out, fmt.as_ref()).await
            }
            Commands::Health => commands::check_health(ctx, &client, out).await,
            Commands::Admin { command } => match command {
                AdminCommand::Stats => commands::show_stats(ctx, &client, out).await,
                AdminCommand::Applications { loan_type, limit } => {
                    commands::show_applications(ctx, &client, loan_type, limit, out).await
                }
                AdminCommand::Exports => commands::show_exports(ctx, &client, out).await,
                AdminCommand::Export { loan_type, output } => {
                    commands::download_export(ctx, &client, loan_type, output, &cwd, out)
                        .await
                        .map(|_| ())
                }
                AdminCommand::GenerateReport { loan_type } => {
                    commands::generate_report(ctx, &client, loan_type, out).await
                }
            },
            Commands::Calc { .. } | Commands::LoanTypes | Commands::Init { .. } => {
                unreachable!("local commands are handled before the runtime starts")
            }
        }
    })
}
