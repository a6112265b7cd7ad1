//! JSON configuration for the command-line tools.

pub mod autocrop;
pub mod labels;
