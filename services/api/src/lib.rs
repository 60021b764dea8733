mod cli;
mod infra;
mod report;
mod routes;
mod server;

use intro_rubric::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
