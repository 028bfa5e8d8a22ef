use thiserror::Error;

use crate::quiz::{BankError, SessionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),
}
