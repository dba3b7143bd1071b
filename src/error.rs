use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("to-do id `{0}` appears more than once")]
    DuplicateId(String),
    #[error("no row is rendered at position {0}")]
    NoSuchRow(usize),
    #[error("no button labelled `{0}`")]
    NoSuchButton(String),
    #[error("unknown key policy `{0}`, expected `index` or `id`")]
    UnknownKeyPolicy(String),
    #[error("unknown draft binding `{0}`, expected `local` or `record`")]
    UnknownDraftBinding(String),
}
