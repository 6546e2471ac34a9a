//! Uploads furniture images to imgbb and asks the furniture analysis API to
//! describe them.

pub mod analysis;
pub mod config;
pub mod error;
pub mod imgbb;
pub mod upload;
pub mod utils;
