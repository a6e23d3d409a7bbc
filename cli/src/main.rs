use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod infrastructure;
mod services;
mod tools;
mod ui;

use cli::{Cli, Commands};
use commands::deploy::DeployArgs;
use commands::generate::GenerateArgs;
use config::ConfigOverrides;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging with LOGGING env var support
    // LOGGING=debug,info,warn,error or just LOGGING=debug
    let log_level = std::env::var("LOGGING")
        .or_else(|_| std::env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| {
            if cli.verbose {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

    // Logs go to stderr so `--json` output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .init();

    if let Err(e) = run(cli.command).await {
        ui::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Generate {
            service_name,
            image_repository,
            git_repo_url,
            region,
            services_dir,
            templates_dir,
            output_dir,
            force,
            config,
            json,
        } => {
            let report = commands::generate::execute(GenerateArgs {
                service_name,
                overrides: ConfigOverrides {
                    image_repository,
                    git_repo_url,
                    region,
                    services_dir,
                    templates_dir,
                    output_dir,
                },
                force,
                config,
                json,
            })?;

            if !report.is_success() {
                anyhow::bail!(
                    "{} of {} service(s) failed to generate",
                    report.fail_count(),
                    report.outcomes.len()
                );
            }
        }
        Commands::Deploy {
            service_name,
            skip_namespace_creation,
            output_dir,
            context,
            dry_run,
            config,
            json,
        } => {
            let report = commands::deploy::execute(DeployArgs {
                service_name,
                skip_namespace: skip_namespace_creation,
                output_dir,
                context,
                dry_run,
                config,
                json,
            })
            .await?;

            if !report.is_success() {
                anyhow::bail!(
                    "{} of {} service(s) failed to deploy",
                    report.fail_count(),
                    report.outcomes.len()
                );
            }
        }
        Commands::List {
            services_dir,
            output_dir,
            config,
        } => {
            commands::list::execute(services_dir, output_dir, config)?;
        }
        Commands::Name {
            app_name,
            environment,
            flavor,
            region,
            name_override,
        } => {
            commands::name::execute(app_name, environment, flavor, region, name_override);
        }
    }

    Ok(())
}
