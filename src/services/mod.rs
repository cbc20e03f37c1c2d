//! Domain services for the presigning API.

pub mod storage;
pub mod upload;
