use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TaxSlab;

/// Reasons a slab table is rejected as configuration data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("slab table is empty")]
    Empty,

    #[error("first slab must start at 0, got {0}")]
    NonZeroStart(Decimal),

    #[error("slab '{label}' has upper bound {upper} not above its lower bound {lower}")]
    EmptyBand {
        label: String,
        lower: Decimal,
        upper: Decimal,
    },

    #[error("slab '{label}' starts at {found}, expected {expected} to stay contiguous")]
    Gap {
        label: String,
        expected: Decimal,
        found: Decimal,
    },

    #[error("slab '{0}' is unbounded but is not the last slab")]
    UnboundedBeforeEnd(String),

    #[error("last slab '{0}' must be unbounded")]
    BoundedLastSlab(String),

    #[error("slab '{label}' rate must be between 0 and 100, got {rate}")]
    InvalidRate { label: String, rate: Decimal },

    #[error("slab '{label}' rate {rate} is lower than the preceding slab's {previous}")]
    DecreasingRate {
        label: String,
        rate: Decimal,
        previous: Decimal,
    },
}

/// An ordered, contiguous slab table for one regime.
///
/// Construction validates the table, so every `SlabSchedule` in the program
/// starts at zero, has no gaps or overlaps, ends in a single unbounded slab,
/// and has non-decreasing rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxSlab>", into = "Vec<TaxSlab>")]
pub struct SlabSchedule {
    slabs: Vec<TaxSlab>,
}

impl SlabSchedule {
    /// Validates `slabs` and wraps them.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScheduleError`] found walking the slabs in order.
    pub fn new(slabs: Vec<TaxSlab>) -> Result<Self, ScheduleError> {
        let first = slabs.first().ok_or(ScheduleError::Empty)?;
        if first.lower_bound != Decimal::ZERO {
            return Err(ScheduleError::NonZeroStart(first.lower_bound));
        }

        let last_index = slabs.len() - 1;
        let mut expected_lower = Decimal::ZERO;
        let mut previous_rate = Decimal::ZERO;

        for (index, slab) in slabs.iter().enumerate() {
            if slab.lower_bound != expected_lower {
                return Err(ScheduleError::Gap {
                    label: slab.label.clone(),
                    expected: expected_lower,
                    found: slab.lower_bound,
                });
            }
            if slab.rate < Decimal::ZERO || slab.rate > Decimal::ONE_HUNDRED {
                return Err(ScheduleError::InvalidRate {
                    label: slab.label.clone(),
                    rate: slab.rate,
                });
            }
            if slab.rate < previous_rate {
                return Err(ScheduleError::DecreasingRate {
                    label: slab.label.clone(),
                    rate: slab.rate,
                    previous: previous_rate,
                });
            }
            previous_rate = slab.rate;

            match slab.upper_bound {
                Some(_) if index == last_index => {
                    return Err(ScheduleError::BoundedLastSlab(slab.label.clone()));
                }
                Some(upper) if upper <= slab.lower_bound => {
                    return Err(ScheduleError::EmptyBand {
                        label: slab.label.clone(),
                        lower: slab.lower_bound,
                        upper,
                    });
                }
                Some(upper) => expected_lower = upper,
                None if index != last_index => {
                    return Err(ScheduleError::UnboundedBeforeEnd(slab.label.clone()));
                }
                None => {}
            }
        }

        Ok(Self { slabs })
    }

    pub fn slabs(&self) -> &[TaxSlab] {
        &self.slabs
    }

    /// Income up to which no tax is levied at all.
    ///
    /// This is the upper bound of a leading 0% slab, or zero when the first
    /// slab already carries a rate.
    pub fn zero_rate_threshold(&self) -> Decimal {
        match self.slabs.first() {
            Some(slab) if slab.rate.is_zero() => slab.upper_bound.unwrap_or(Decimal::MAX),
            _ => Decimal::ZERO,
        }
    }

    /// The highest slab that `taxable_income` reaches into.
    ///
    /// Income at or below the first slab's lower bound reports the first slab.
    pub fn slab_for(
        &self,
        taxable_income: Decimal,
    ) -> &TaxSlab {
        self.slabs
            .iter()
            .rev()
            .find(|slab| taxable_income > slab.lower_bound)
            .unwrap_or(&self.slabs[0])
    }
}

impl TryFrom<Vec<TaxSlab>> for SlabSchedule {
    type Error = ScheduleError;

    fn try_from(slabs: Vec<TaxSlab>) -> Result<Self, Self::Error> {
        Self::new(slabs)
    }
}

impl From<SlabSchedule> for Vec<TaxSlab> {
    fn from(schedule: SlabSchedule) -> Self {
        schedule.slabs
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn slab(
        lower: Decimal,
        upper: Option<Decimal>,
        rate: Decimal,
        label: &str,
    ) -> TaxSlab {
        TaxSlab::new(lower, upper, rate, label)
    }

    fn three_band_slabs() -> Vec<TaxSlab> {
        vec![
            slab(dec!(0), Some(dec!(250000)), dec!(0), "A"),
            slab(dec!(250000), Some(dec!(500000)), dec!(5), "B"),
            slab(dec!(500000), None, dec!(20), "C"),
        ]
    }

    // =========================================================================
    // validation
    // =========================================================================

    #[test]
    fn accepts_well_formed_table() {
        let schedule = SlabSchedule::new(three_band_slabs()).unwrap();

        assert_eq!(schedule.slabs().len(), 3);
    }

    #[test]
    fn rejects_empty_table() {
        assert_eq!(SlabSchedule::new(vec![]), Err(ScheduleError::Empty));
    }

    #[test]
    fn rejects_table_not_starting_at_zero() {
        let slabs = vec![slab(dec!(100), None, dec!(5), "A")];

        assert_eq!(
            SlabSchedule::new(slabs),
            Err(ScheduleError::NonZeroStart(dec!(100)))
        );
    }

    #[test]
    fn rejects_gap_between_slabs() {
        let mut slabs = three_band_slabs();
        slabs[1].lower_bound = dec!(260000);

        assert_eq!(
            SlabSchedule::new(slabs),
            Err(ScheduleError::Gap {
                label: "B".to_string(),
                expected: dec!(250000),
                found: dec!(260000),
            })
        );
    }

    #[test]
    fn rejects_bounded_last_slab() {
        let mut slabs = three_band_slabs();
        slabs[2].upper_bound = Some(dec!(900000));

        assert_eq!(
            SlabSchedule::new(slabs),
            Err(ScheduleError::BoundedLastSlab("C".to_string()))
        );
    }

    #[test]
    fn rejects_unbounded_middle_slab() {
        let mut slabs = three_band_slabs();
        slabs[1].upper_bound = None;

        assert_eq!(
            SlabSchedule::new(slabs),
            Err(ScheduleError::UnboundedBeforeEnd("B".to_string()))
        );
    }

    #[test]
    fn rejects_empty_band() {
        let slabs = vec![
            slab(dec!(0), Some(dec!(0)), dec!(0), "A"),
            slab(dec!(0), None, dec!(5), "B"),
        ];

        assert!(matches!(
            SlabSchedule::new(slabs),
            Err(ScheduleError::EmptyBand { .. })
        ));
    }

    #[test]
    fn rejects_decreasing_rate() {
        let mut slabs = three_band_slabs();
        slabs[2].rate = dec!(4);

        assert_eq!(
            SlabSchedule::new(slabs),
            Err(ScheduleError::DecreasingRate {
                label: "C".to_string(),
                rate: dec!(4),
                previous: dec!(5),
            })
        );
    }

    #[test]
    fn rejects_rate_above_one_hundred() {
        let mut slabs = three_band_slabs();
        slabs[2].rate = dec!(120);

        assert!(matches!(
            SlabSchedule::new(slabs),
            Err(ScheduleError::InvalidRate { .. })
        ));
    }

    // =========================================================================
    // lookups
    // =========================================================================

    #[test]
    fn zero_rate_threshold_is_top_of_nil_slab() {
        let schedule = SlabSchedule::new(three_band_slabs()).unwrap();

        assert_eq!(schedule.zero_rate_threshold(), dec!(250000));
    }

    #[test]
    fn zero_rate_threshold_is_zero_without_nil_slab() {
        let schedule = SlabSchedule::new(vec![slab(dec!(0), None, dec!(10), "flat")]).unwrap();

        assert_eq!(schedule.zero_rate_threshold(), Decimal::ZERO);
    }

    #[test]
    fn slab_for_reports_highest_reached_slab() {
        let schedule = SlabSchedule::new(three_band_slabs()).unwrap();

        assert_eq!(schedule.slab_for(dec!(0)).label, "A");
        assert_eq!(schedule.slab_for(dec!(250000)).label, "A");
        assert_eq!(schedule.slab_for(dec!(250001)).label, "B");
        assert_eq!(schedule.slab_for(dec!(5000000)).label, "C");
    }
}
