//! Directory of regenerative communities backed by a single JSON file.
//!
//! [`storage::Store`] loads and saves the list, [`filter::filter`] narrows it
//! for the directory search, and [`submission::submit`] appends new entries.
//! [`gui`] is the iced front end over those three.

pub mod config;
pub mod error;
pub mod filter;
pub mod gui;
pub mod models;
pub mod storage;
pub mod submission;
pub mod utils;
