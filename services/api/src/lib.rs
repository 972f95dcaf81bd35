mod brief;
mod cli;
mod infra;
mod routes;
mod server;

use opshub::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
