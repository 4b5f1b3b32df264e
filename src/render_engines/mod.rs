//! Render engines module
//!
//! Image scaling and the t-shirt mockup built on top of it.

pub mod halfblocks;
pub mod mockup;
