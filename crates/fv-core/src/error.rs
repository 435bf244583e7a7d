use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Empty axis: {axis}")]
    EmptyAxis { axis: &'static str },

    #[error("Duplicate value on {axis} axis: {value}")]
    DuplicateAxisValue { axis: &'static str, value: u32 },

    #[error("Duplicate run id: {id}")]
    DuplicateRunId { id: u32 },

    #[error("Run {id} has {axis} {value} which is not on the {axis} axis")]
    OffAxis {
        id: u32,
        axis: &'static str,
        value: u32,
    },

    #[error("Runs {first} and {second} share amount={amount}, duration={duration}")]
    DuplicatePair {
        first: u32,
        second: u32,
        amount: u32,
        duration: u32,
    },

    #[error("Catalog has no runs")]
    EmptyCatalog,
}
