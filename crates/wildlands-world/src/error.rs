//! Errors raised while assembling static world data.

use thiserror::Error;

use crate::area::AreaId;

#[derive(Debug, Error, PartialEq)]
pub enum WorldError {
    #[error("duplicate area id: {0}")]
    DuplicateArea(AreaId),

    #[error("area {0} has empty or inverted bounds")]
    EmptyBounds(AreaId),

    #[error("area {a} overlaps area {b}")]
    OverlappingAreas { a: AreaId, b: AreaId },
}
