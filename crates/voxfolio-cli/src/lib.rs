//! Support code for the `voxelize` command-line driver.

pub mod manifest;
pub mod report;
