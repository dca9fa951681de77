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

use serde::{Deserialize, Serialize};

/// Hour-of-day aligned values for charting.
///
/// Either empty (nothing to draw), 24 slots (00:00-23:00) or 25 slots when
/// the period runs until midnight and the last value is repeated at 24:00.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaddedProjection(Vec<Option<f64>>);

impl PaddedProjection {
    #[must_use]
    pub fn new(slots: Vec<Option<f64>>) -> Self {
        Self(slots)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<f64>] {
        &self.0
    }

    #[must_use]
    pub fn into_slots(self) -> Vec<Option<f64>> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at the given slot, `None` when absent or out of range
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<f64> {
        self.0.get(slot).copied().flatten()
    }
}

/// All datasets needed to draw one day's price chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// X axis labels (e.g. "13:00")
    pub labels: Vec<String>,

    /// Hourly price line
    pub price: Vec<f64>,

    /// Flat baseline line (one value per label), empty without a baseline
    pub baseline: Vec<f64>,

    /// One projection per visible cheap period
    pub cheap: Vec<PaddedProjection>,

    /// One projection per visible expensive period
    pub expensive: Vec<PaddedProjection>,

    /// Prices of the current and the next hour, aligned with `labels`
    pub current: Vec<Option<f64>>,
}
