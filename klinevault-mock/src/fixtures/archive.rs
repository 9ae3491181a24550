use std::fs;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

use klinevault_core::{ArchiveLocator, Candle, EpochUnit};
use zip::write::SimpleFileOptions;

fn cell<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Render candles as the vendor's headerless 12-column kline CSV.
///
/// Epochs are written in `unit`. A candle without `close_date_time` reuses
/// its open time so the row stays well formed.
///
/// # Errors
/// Returns an I/O error if a record cannot be written.
pub fn kline_csv(candles: &[Candle], unit: EpochUnit) -> io::Result<Vec<u8>> {
    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for c in candles {
        let close_at = c.close_date_time.unwrap_or(c.date_time);
        w.write_record([
            unit.encode(c.date_time).to_string(),
            cell(c.open),
            cell(c.high),
            cell(c.low),
            cell(c.close),
            cell(c.volume),
            unit.encode(close_at).to_string(),
            cell(c.quote_volume),
            cell(c.trades_count),
            cell(c.taker_buy_base_volume),
            cell(c.taker_buy_quote_volume),
            "0".to_string(),
        ])?;
    }
    w.into_inner().map_err(|e| e.into_error())
}

/// Build an in-memory zip archive holding one member.
///
/// # Errors
/// Returns an I/O error if the archive cannot be assembled.
pub fn zip_member(member: &str, bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut zw = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zw.start_file(member, SimpleFileOptions::default())
        .map_err(io::Error::other)?;
    zw.write_all(bytes)?;
    let cursor = zw.finish().map_err(io::Error::other)?;
    Ok(cursor.into_inner())
}

/// Write the archive for `locator` under `root`, creating directories, with
/// the correctly named member holding `candles`.
///
/// # Errors
/// Returns an I/O error if any directory or the archive cannot be written.
pub fn write_archive(
    root: &Path,
    locator: &ArchiveLocator,
    candles: &[Candle],
    unit: EpochUnit,
) -> io::Result<PathBuf> {
    let path = root.join(locator.relative_path());
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let bytes = zip_member(&locator.member_name(), &kline_csv(candles, unit)?)?;
    fs::write(&path, bytes)?;
    Ok(path)
}
