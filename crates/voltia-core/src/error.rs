// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Voltia.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Error types for the analysis engine

use thiserror::Error;

/// Hard failures of the engine.
///
/// Short series, empty windows and missing baselines are not errors; they are
/// reported as empty / `None` results.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("window width must be at least 1 hour, got {0}")]
    InvalidWindowWidth(usize),

    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("invalid price {price} at {date_time}")]
    InvalidPrice { date_time: String, price: f64 },

    #[error("series of {len} hourly prices does not cover whole days")]
    IncompleteDay { len: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
