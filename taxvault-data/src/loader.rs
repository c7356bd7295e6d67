use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use taxvault_core::{Regime, ScheduleError, SlabSchedule, TaxSlab, TaxTable};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading slab table data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlabLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown regime '{0}' (expected NEW or OLD)")]
    UnknownRegime(String),

    #[error("Invalid {regime} slab table: {source}")]
    Schedule {
        regime: Regime,
        #[source]
        source: ScheduleError,
    },

    #[error("No slab records found")]
    Empty,
}

impl From<csv::Error> for SlabLoaderError {
    fn from(err: csv::Error) -> Self {
        SlabLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of the slab CSV file.
///
/// - `regime`: `NEW` or `OLD` (case-insensitive)
/// - `lower_bound`: taxable income where the slab starts
/// - `upper_bound`: where it ends (empty for the unbounded top slab)
/// - `rate`: percentage, e.g. `5` for 5%
/// - `label`: display name such as `₹3L - ₹7L`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SlabRecord {
    pub regime: String,
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    pub label: String,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for slab tables stored as CSV.
///
/// Records for each regime are read in file order and validated as a whole
/// by [`SlabSchedule::new`]; a regime missing from the file keeps the slabs
/// of the table it is applied to.
pub struct SlabTableLoader;

impl SlabTableLoader {
    /// Parse slab records from any CSV reader (a file, a byte slice, ...).
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SlabRecord>, SlabLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SlabRecord = result?;
            records.push(record);
        }

        debug!(count = records.len(), "parsed slab records");
        Ok(records)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Vec<SlabRecord>, SlabLoaderError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| SlabLoaderError::CsvParse(format!("{}: {e}", path.display())))?;
        Self::parse(file)
    }

    /// Group records by regime and validate each group as a schedule.
    pub fn build_schedules(
        records: &[SlabRecord]
    ) -> Result<BTreeMap<Regime, SlabSchedule>, SlabLoaderError> {
        if records.is_empty() {
            return Err(SlabLoaderError::Empty);
        }

        let mut grouped: BTreeMap<Regime, Vec<TaxSlab>> = BTreeMap::new();
        for record in records {
            let regime: Regime = record
                .regime
                .parse()
                .map_err(|_| SlabLoaderError::UnknownRegime(record.regime.clone()))?;
            grouped.entry(regime).or_default().push(TaxSlab::new(
                record.lower_bound,
                record.upper_bound,
                record.rate,
                record.label.trim(),
            ));
        }

        grouped
            .into_iter()
            .map(|(regime, slabs)| {
                SlabSchedule::new(slabs)
                    .map(|schedule| (regime, schedule))
                    .map_err(|source| SlabLoaderError::Schedule { regime, source })
            })
            .collect()
    }

    /// Replace `table`'s slabs with those found in `records`.
    pub fn apply(
        table: TaxTable,
        records: &[SlabRecord],
    ) -> Result<TaxTable, SlabLoaderError> {
        let schedules = Self::build_schedules(records)?;
        let regimes: Vec<_> = schedules.keys().map(Regime::as_str).collect();
        info!(?regimes, financial_year = %table.financial_year, "applying slab table");

        Ok(schedules
            .into_iter()
            .fold(table, |table, (regime, schedule)| table.with_slabs(regime, schedule)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const HEADER: &str = "regime,lower_bound,upper_bound,rate,label\n";

    fn csv(rows: &str) -> String {
        format!("{HEADER}{rows}")
    }

    // =========================================================================
    // parse
    // =========================================================================

    #[test]
    fn parse_single_record() {
        let records = SlabTableLoader::parse(csv("NEW,300000,700000,5,₹3L - ₹7L").as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![SlabRecord {
                regime: "NEW".to_string(),
                lower_bound: dec!(300000),
                upper_bound: Some(dec!(700000)),
                rate: dec!(5),
                label: "₹3L - ₹7L".to_string(),
            }]
        );
    }

    #[test]
    fn parse_empty_upper_bound_is_unbounded() {
        let records = SlabTableLoader::parse(csv("OLD,1000000,,30,Above ₹10L").as_bytes()).unwrap();

        assert_eq!(records[0].upper_bound, None);
        assert_eq!(records[0].rate, dec!(30));
    }

    #[test]
    fn parse_missing_column_is_csv_error() {
        let err = SlabTableLoader::parse("regime,lower_bound\nNEW,0".as_bytes()).unwrap_err();

        let SlabLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {err:?}");
        };
        assert!(msg.contains("missing field"), "got: {msg}");
    }

    #[test]
    fn parse_bad_decimal_is_csv_error() {
        let err = SlabTableLoader::parse(csv("NEW,abc,300000,0,x").as_bytes()).unwrap_err();

        assert!(matches!(err, SlabLoaderError::CsvParse(_)), "got: {err:?}");
    }

    #[test]
    fn parse_header_only_gives_no_records() {
        assert!(SlabTableLoader::parse(HEADER.as_bytes()).unwrap().is_empty());
    }

    // =========================================================================
    // build_schedules
    // =========================================================================

    #[test]
    fn build_groups_by_regime() {
        let records = SlabTableLoader::parse(
            csv("new,0,300000,0,a\nOLD,0,,10,flat\nNEW,300000,,5,b").as_bytes(),
        )
        .unwrap();

        let schedules = SlabTableLoader::build_schedules(&records).unwrap();

        assert_eq!(schedules.len(), 2);
        assert_eq!(schedules[&Regime::New].slabs().len(), 2);
        assert_eq!(schedules[&Regime::Old].slabs()[0].label, "flat");
    }

    #[test]
    fn build_rejects_unknown_regime() {
        let records = SlabTableLoader::parse(csv("MIDDLE,0,,10,flat").as_bytes()).unwrap();

        assert_eq!(
            SlabTableLoader::build_schedules(&records),
            Err(SlabLoaderError::UnknownRegime("MIDDLE".to_string()))
        );
    }

    #[test]
    fn build_rejects_gap_between_slabs() {
        let records =
            SlabTableLoader::parse(csv("NEW,0,300000,0,a\nNEW,400000,,5,b").as_bytes()).unwrap();

        assert_eq!(
            SlabTableLoader::build_schedules(&records),
            Err(SlabLoaderError::Schedule {
                regime: Regime::New,
                source: ScheduleError::Gap {
                    label: "b".to_string(),
                    expected: dec!(300000),
                    found: dec!(400000),
                },
            })
        );
    }

    #[test]
    fn build_rejects_no_records() {
        assert_eq!(SlabTableLoader::build_schedules(&[]), Err(SlabLoaderError::Empty));
    }

    // =========================================================================
    // apply
    // =========================================================================

    #[test]
    fn apply_keeps_regimes_absent_from_file() {
        let records = SlabTableLoader::parse(csv("NEW,0,,10,flat").as_bytes()).unwrap();

        let table = SlabTableLoader::apply(TaxTable::default(), &records).unwrap();

        assert_eq!(table.new_regime.slabs.slabs().len(), 1);
        assert_eq!(table.old_regime, TaxTable::default().old_regime);
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = SlabTableLoader::load_from_file("does/not/exist.csv").unwrap_err();

        let SlabLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {err:?}");
        };
        assert!(msg.contains("exist.csv"), "got: {msg}");
    }
}
