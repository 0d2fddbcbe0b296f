//! Application layer: sketch input capture and filesystem materialization.
//!
//! Everything that can fail lives here; the parsing core below is total.

pub mod error;
pub mod error_ext;
pub mod input;
pub mod materialize;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use materialize::{MaterializeOptions, MaterializeReport, Materializer, OnExists};
