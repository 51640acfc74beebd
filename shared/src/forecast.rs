//! Linear-trend extrapolation of the seven-day price forecast
//!
//! Fits an ordinary least-squares line through the seven daily prices
//! (x = 1..7) and evaluates it at days 8, 9 and 10.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, PredictionError};
use crate::types::{decimal_from_f64, round_price};

/// Number of observed days in a forecast series
pub const HISTORY_DAYS: usize = 7;

/// Day indices produced by the extrapolation
pub const EXTRAPOLATED_DAYS: [u32; 3] = [8, 9, 10];

/// Seven consecutive daily prices, day 1 first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    prices: [Decimal; HISTORY_DAYS],
}

impl HistoricalSeries {
    /// Build a series from exactly seven prices
    pub fn new(prices: &[Decimal]) -> CoreResult<Self> {
        let prices: [Decimal; HISTORY_DAYS] = prices.try_into().map_err(|_| {
            PredictionError::invalid(format!(
                "price series must contain exactly {} values, got {}",
                HISTORY_DAYS,
                prices.len()
            ))
        })?;
        Ok(Self { prices })
    }

    pub fn from_array(prices: [Decimal; HISTORY_DAYS]) -> Self {
        Self { prices }
    }

    /// Build a series from floats, rejecting NaN and infinities
    pub fn from_f64(values: &[f64]) -> CoreResult<Self> {
        let prices = values
            .iter()
            .enumerate()
            .map(|(i, v)| decimal_from_f64(*v, &format!("day_{}", i + 1)))
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(&prices)
    }

    pub fn prices(&self) -> &[Decimal] {
        &self.prices
    }

    /// (day index, price) pairs, day index starting at 1
    pub fn points(&self) -> impl Iterator<Item = (u32, Decimal)> + '_ {
        (1u32..).zip(self.prices.iter().copied())
    }

    /// Project the trend to days 8, 9 and 10, rounded to 2 decimal places
    pub fn extrapolate(&self) -> CoreResult<[ExtrapolatedPoint; 3]> {
        let fit = fit_linear(&self.prices)?;
        let mut points = [ExtrapolatedPoint::default(); 3];
        for (point, day) in points.iter_mut().zip(EXTRAPOLATED_DAYS) {
            *point = ExtrapolatedPoint {
                day,
                price: round_price(fit.at(Decimal::from(day))?),
            };
        }
        Ok(points)
    }
}

/// A projected price for a future day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtrapolatedPoint {
    pub day: u32,
    pub price: Decimal,
}

/// Extrapolated prices keyed the way the prediction page reads them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextThreeDays {
    pub day_8: Decimal,
    pub day_9: Decimal,
    pub day_10: Decimal,
}

impl From<[ExtrapolatedPoint; 3]> for NextThreeDays {
    fn from(points: [ExtrapolatedPoint; 3]) -> Self {
        Self {
            day_8: points[0].price,
            day_9: points[1].price,
            day_10: points[2].price,
        }
    }
}

impl NextThreeDays {
    pub fn points(&self) -> [ExtrapolatedPoint; 3] {
        [
            ExtrapolatedPoint { day: 8, price: self.day_8 },
            ExtrapolatedPoint { day: 9, price: self.day_9 },
            ExtrapolatedPoint { day: 10, price: self.day_10 },
        ]
    }
}

/// Least-squares line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearFit {
    pub slope: Decimal,
    pub intercept: Decimal,
}

impl LinearFit {
    pub fn at(&self, x: Decimal) -> CoreResult<Decimal> {
        checked(self.slope.checked_mul(x).and_then(|v| v.checked_add(self.intercept)))
    }
}

/// Fit a least-squares line through `values`, using x = 1..=n.
///
/// Needs at least two points.
pub fn fit_linear(values: &[Decimal]) -> CoreResult<LinearFit> {
    if values.len() < 2 {
        return Err(PredictionError::invalid(format!(
            "linear fit needs at least 2 values, got {}",
            values.len()
        )));
    }

    let n = Decimal::from(values.len());
    let mut sum_x = Decimal::ZERO;
    let mut sum_y = Decimal::ZERO;
    let mut sum_xy = Decimal::ZERO;
    let mut sum_x2 = Decimal::ZERO;

    for (x, y) in (1u64..).map(Decimal::from).zip(values.iter().copied()) {
        sum_x += x;
        sum_x2 += x * x;
        sum_y = checked(sum_y.checked_add(y))?;
        sum_xy = checked(x.checked_mul(y).and_then(|xy| sum_xy.checked_add(xy)))?;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator.is_zero() {
        return Err(PredictionError::invalid("degenerate series for linear fit"));
    }

    let numerator = checked(
        n.checked_mul(sum_xy)
            .zip(sum_x.checked_mul(sum_y))
            .and_then(|(a, b)| a.checked_sub(b)),
    )?;
    let slope = checked(numerator.checked_div(denominator))?;
    let intercept = checked(
        slope
            .checked_mul(sum_x)
            .and_then(|s| sum_y.checked_sub(s))
            .and_then(|r| r.checked_div(n)),
    )?;

    Ok(LinearFit { slope, intercept })
}

/// Extrapolate a raw seven-value series to days 8, 9 and 10
pub fn extrapolate_next_days(values: &[Decimal]) -> CoreResult<[ExtrapolatedPoint; 3]> {
    HistoricalSeries::new(values)?.extrapolate()
}

fn checked(value: Option<Decimal>) -> CoreResult<Decimal> {
    value.ok_or_else(|| PredictionError::invalid("price values are too large to fit a trend"))
}
