//! This crate provides common funcionality shared by all mappers

#![deny(unused_imports, unused_crate_dependencies)]
#![warn(missing_docs)]

mod error;
mod mapper_trait;

pub use error::{MapperError, Result};
pub use mapper_trait::LinearMapper;
