//! CLI module - Command-line interface for seasonsurvey
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use crate::domain::Season;
use crate::results::ResultType;
use clap::{Parser, Subcommand};

/// Seasonal anime survey results
#[derive(Parser)]
#[command(name = "seasonsurvey")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every anime's results for one survey
    #[command(alias = "r")]
    Results {
        year: i32,
        /// winter, spring, summer, fall (or 0-3)
        season: Season,
        /// pre or post
        phase: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the best anime of one survey for a result type
    #[command(alias = "t")]
    Top {
        year: i32,
        season: Season,
        phase: String,
        /// Result type, e.g. popularity or gender-popularity-ratio
        #[arg(long = "type", default_value = "popularity")]
        result_type: ResultType,
        /// Number of entries to show
        #[arg(long, default_value = "10")]
        count: usize,
        /// Lowest values first
        #[arg(long)]
        ascending: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List surveys with their top results
    #[command(alias = "ls")]
    Index {
        /// Only surveys from this year
        #[arg(long)]
        year: Option<i32>,
    },

    /// Show respondent demographics for one survey
    Summary {
        year: i32,
        season: Season,
        phase: String,
    },

    /// Drop every cached result
    PurgeCache,
}

pub use commands::*;
