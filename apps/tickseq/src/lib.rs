//! # tickseq
//!
//! Command-line front end for `tickseq-core`: headless intro runs, location
//! classification and save block management.

pub mod cli;
pub mod config;
