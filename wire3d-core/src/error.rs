//! Errors raised where a front end names shapes or axes by string

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown shape `{0}` (expected cube, pyramid or sphere)")]
    UnknownShape(String),
    #[error("unknown rotation axis `{0}` (expected x, y or z)")]
    UnknownAxis(String),
}
