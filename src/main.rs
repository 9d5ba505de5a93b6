use clap::Parser;
use release_branch_rust::cli::{self, Cli, Command};
use release_branch_rust::config::Config;
use release_branch_rust::output;
use release_branch_rust::prompt::TerminalPrompter;
use release_branch_rust::{release, update};

fn main() {
    let cli = Cli::parse_from(cli::normalize_args(std::env::args()));
    let config = cli.config();

    if let Err(err) = run(cli.command, config) {
        output::print_error(&err);
        std::process::exit(1);
    }
}

fn run(command: Command, config: Config) -> anyhow::Result<()> {
    let repo = std::env::current_dir()?;
    let prompter = TerminalPrompter;

    match command {
        Command::New { .. } => {
            let summary = release::run(&repo, &config, &prompter, |step| {
                output::print_step(&config, &step.to_string());
            })?;
            output::print_success(
                &config,
                &format!("created '{}' from '{}'", summary.branch, summary.base),
            );
        }
        Command::Update { branch } => {
            let target = cli::resolve_update_target(branch, &prompter)?;
            let progress = output::BuildProgress::new(config);
            match update::run(&repo, &target, &prompter, |step| progress.update(step)) {
                Ok(summary) => {
                    let commit = summary.commit.get(..7).unwrap_or(&summary.commit);
                    progress.finish_success(&format!(
                        "'{}' now at {} ({} files updated, {} removed)",
                        summary.branch, commit, summary.files_copied, summary.files_deleted
                    ));
                }
                Err(err) => {
                    progress.abandon();
                    return Err(err);
                }
            }
        }
    }
    Ok(())
}
