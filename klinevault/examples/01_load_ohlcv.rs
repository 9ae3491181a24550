use chrono::{TimeZone, Utc};
use klinevault::{InstrumentType, Interval, RequestIdentity, RowSource, Vault};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "klinevault=info".to_string()),
        )
        .init();

    // 1. Point the vault at a local mirror of the archive tree.
    let root = std::env::args()
        .nth(1)
        .ok_or("usage: 01_load_ohlcv <archive-root> [SYMBOL]")?;
    let symbol = std::env::args().nth(2).unwrap_or_else(|| "BTCUSDT".to_string());
    let vault = Vault::open(&root)?;

    // 2. Load one month of spot 1m candles.
    let id = RequestIdentity::klines(InstrumentType::Spot, Interval::M1, symbol);
    let start = Utc.with_ymd_and_hms(2020, 1, 30, 0, 0, 0).single().ok_or("bad start")?;
    let end = Utc.with_ymd_and_hms(2020, 3, 2, 0, 0, 0).single().ok_or("bad end")?;
    let report = vault.load_ohlcv(&id, start, end)?;

    // 3. Summarize.
    println!("{} rows for {}", report.series.len(), id.label());
    println!("null cells: {}", report.series.null_count());
    println!(
        "rows from daily: {}, monthly: {}, missing: {}",
        report.attribution.rows_from(RowSource::Daily),
        report.attribution.rows_from(RowSource::Monthly),
        report.attribution.rows_from(RowSource::Missing),
    );
    println!("ambiguous rows: {}", report.ambiguous_rows());
    for c in report.conflicts.iter().take(5) {
        println!(
            " - {} {}: daily={:?} monthly={:?}",
            c.date_time, c.field, c.daily, c.monthly
        );
    }

    // 4. Export as canonical CSV on stdout when asked.
    if std::env::var("KLINEVAULT_EXPORT_CSV").is_ok() {
        klinevault::write_canonical_csv(&report.series, std::io::stdout().lock())?;
    }
    Ok(())
}
