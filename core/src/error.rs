use thiserror::Error;

#[derive(Error, Debug)]
pub enum WfmError {
    #[error("Invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Numeric overflow while computing {context}")]
    NumericOverflow { context: &'static str },

    #[error(
        "Capacity search exhausted: no agent count up to {ceiling} meets the target \
         (volume {volume}, aht {aht_seconds}s)"
    )]
    SearchExhausted {
        ceiling: u32,
        volume: f64,
        aht_seconds: f64,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type WfmResult<T> = Result<T, WfmError>;
