use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("Unknown command: {0}. Type help for a list of commands.")]
    Unknown(String),

    #[error("Usage: {usage}")]
    MissingArgument { command: String, usage: String },

    #[error("{command}: invalid {argument} '{value}'")]
    InvalidArgument {
        command: String,
        argument: &'static str,
        value: String,
    },

    #[error("Usage: {usage}")]
    TooManyArguments { command: String, usage: String },
}
