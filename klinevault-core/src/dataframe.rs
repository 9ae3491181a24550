//! Conversion of a candle series into a polars `DataFrame`.

use polars::prelude::{Column, DataFrame, DataType as PlDataType, PolarsResult, TimeUnit};

use crate::{CANONICAL_COLUMNS, CandleSeries};

/// Extension trait adding a dataframe view to [`CandleSeries`].
pub trait CandleFrameExt {
    /// Build a `DataFrame` with one column per canonical field, in canonical
    /// order. Instants become `Datetime(Microseconds)` columns.
    ///
    /// # Errors
    /// Propagates polars construction errors.
    fn to_dataframe(&self) -> PolarsResult<DataFrame>;
}

impl CandleFrameExt for CandleSeries {
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let micros = PlDataType::Datetime(TimeUnit::Microseconds, None);
        let [
            c_date_time,
            c_open,
            c_high,
            c_low,
            c_close,
            c_volume,
            c_close_date_time,
            c_quote_volume,
            c_trades_count,
            c_taker_base,
            c_taker_quote,
        ] = CANONICAL_COLUMNS;

        let f64_col = |name: &str, pick: fn(&crate::Candle) -> Option<f64>| {
            Column::new(name.into(), self.iter().map(pick).collect::<Vec<_>>())
        };

        let date_time = Column::new(
            c_date_time.into(),
            self.iter()
                .map(|c| c.date_time.timestamp_micros())
                .collect::<Vec<_>>(),
        )
        .cast(&micros)?;
        let close_date_time = Column::new(
            c_close_date_time.into(),
            self.iter()
                .map(|c| c.close_date_time.map(|t| t.timestamp_micros()))
                .collect::<Vec<_>>(),
        )
        .cast(&micros)?;
        let trades_count = Column::new(
            c_trades_count.into(),
            self.iter().map(|c| c.trades_count).collect::<Vec<_>>(),
        );

        DataFrame::new(vec![
            date_time,
            f64_col(c_open, |c| c.open),
            f64_col(c_high, |c| c.high),
            f64_col(c_low, |c| c.low),
            f64_col(c_close, |c| c.close),
            f64_col(c_volume, |c| c.volume),
            close_date_time,
            f64_col(c_quote_volume, |c| c.quote_volume),
            trades_count,
            f64_col(c_taker_base, |c| c.taker_buy_base_volume),
            f64_col(c_taker_quote, |c| c.taker_buy_quote_volume),
        ])
    }
}
