use crate::brief::{run_brief, run_themes, BriefArgs, ThemesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use opshub::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Restaurant Ops Hub",
    about = "Serve the restaurant ops API or print today's pre-shift brief from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the pre-shift brief and optionally write the HTML document
    Brief(BriefArgs),
    /// Print complaint themes found in recent reviews
    Themes(ThemesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Brief(args) => run_brief(args),
        Command::Themes(args) => run_themes(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["opshub-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn brief_accepts_date_window_and_output() {
        let cli = Cli::try_parse_from([
            "opshub-api",
            "brief",
            "--today",
            "2025-05-02",
            "--days",
            "3",
            "--html",
            "brief.html",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Brief(args)) => {
                assert_eq!(args.days, Some(3));
                assert!(args.today.is_some());
                assert!(args.html.is_some());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn brief_rejects_malformed_date() {
        let result = Cli::try_parse_from(["opshub-api", "brief", "--today", "05/02/2025"]);
        assert!(result.is_err());
    }
}
