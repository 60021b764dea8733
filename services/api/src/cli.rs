use crate::report::{run_batch, run_rubric, run_score, BatchArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use intro_rubric::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Introduction Rubric Scorer",
    about = "Score spoken self-introduction transcripts against the rubric",
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
    /// Score a single transcript from a file or stdin
    Score(ScoreArgs),
    /// Score every row of a `transcript,duration_sec` CSV file
    Batch(BatchArgs),
    /// Print the rubric categories, weights, and scoring buckets
    Rubric,
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
        Command::Score(args) => run_score(args),
        Command::Batch(args) => run_batch(args),
        Command::Rubric => run_rubric(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["intro-rubric-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_score_arguments() {
        let cli = Cli::try_parse_from([
            "intro-rubric-api",
            "score",
            "--duration",
            "45",
            "--file",
            "intro.txt",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.duration, Some(45.0));
                assert_eq!(args.file.as_deref(), Some(std::path::Path::new("intro.txt")));
                assert!(args.json);
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }
}
