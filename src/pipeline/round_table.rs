//! Tables produced by the pipeline: one per round, and one per season.

use crate::types::session::TIME_COLUMN;
use polars::prelude::*;

pub const ROUND_COLUMN: &str = "Round";
pub const SEASON_COLUMN: &str = "Season";

/// Laps of one race joined with the weather recorded for each lap.
///
/// Rows are aligned by position. The frame always has as many rows as the lap
/// frame it was built from.
#[derive(Debug, Clone)]
pub struct RoundTable {
    pub season: i32,
    pub round: u32,
    pub frame: DataFrame,
}

impl RoundTable {
    /// Concatenates `laps` and `weather` side by side, dropping the weather
    /// `Time` column and appending `Round` and `Season` columns.
    ///
    /// A weather frame of a different height is truncated or padded with nulls
    /// to the lap count.
    pub fn join(
        season: i32,
        round: u32,
        laps: &DataFrame,
        weather: &DataFrame,
    ) -> PolarsResult<Self> {
        let weather = match weather.get_column_index(TIME_COLUMN) {
            Some(_) => weather.drop(TIME_COLUMN)?,
            None => weather.clone(),
        };
        let weather = align_height(weather, laps.height())?;

        let mut frame = laps.hstack(weather.get_columns())?;
        let height = frame.height();
        frame.with_column(Column::new(
            ROUND_COLUMN.into(),
            vec![round as i32; height],
        ))?;
        frame.with_column(Column::new(SEASON_COLUMN.into(), vec![season; height]))?;

        Ok(Self {
            season,
            round,
            frame,
        })
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }
}

/// Truncates or null-pads every column of `df` to `height` rows.
pub(crate) fn align_height(df: DataFrame, height: usize) -> PolarsResult<DataFrame> {
    if df.height() >= height {
        return Ok(df.slice(0, height));
    }
    let pad = height - df.height();
    let columns = df
        .get_columns()
        .iter()
        .map(|c| {
            let mut series = c.as_materialized_series().clone();
            series.append(&Series::full_null(c.name().clone(), pad, c.dtype()))?;
            Ok(Column::from(series))
        })
        .collect::<PolarsResult<Vec<_>>>()?;
    DataFrame::new(columns)
}

/// All rounds of a season stacked in ascending round order.
#[derive(Debug, Clone)]
pub struct SeasonTable {
    pub season: i32,
    pub frame: DataFrame,
}

impl SeasonTable {
    /// Stacks round tables vertically, in the order given.
    /// Column types are widened to a common supertype where rounds differ.
    pub fn concat(season: i32, rounds: Vec<RoundTable>) -> PolarsResult<Self> {
        let frames: Vec<LazyFrame> = rounds.into_iter().map(|r| r.frame.lazy()).collect();
        let frame = concat(
            frames,
            UnionArgs {
                rechunk: true,
                to_supertypes: true,
                ..Default::default()
            },
        )?
        .collect()?;
        Ok(Self { season, frame })
    }

    pub fn shape(&self) -> (usize, usize) {
        self.frame.shape()
    }
}
