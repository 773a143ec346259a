mod cli;
mod demo;
mod infra;
mod replay;

use labor_core::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
