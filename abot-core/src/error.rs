use thiserror::Error;

#[derive(Error, Debug)]
pub enum AbotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AbotError>;
