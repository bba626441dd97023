mod cli;
mod commands;
mod infra;
mod render;

use leanlog::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
