//! Command implementations

pub mod completions;
pub mod form;
pub mod init;
pub mod respond;
pub mod responses;
pub mod summary;
