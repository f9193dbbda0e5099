//! Built-in reference series.
//!
//! Average pre-tax income per adult for each quintile of the Philippines,
//! poorest first. Used when no CSV file is configured.

use crate::domain::{Country, MeasureKind, Selection};

#[derive(Debug, Clone, Copy)]
pub struct ReferenceSeries {
    pub country: Country,
    pub year: i32,
    pub kind: MeasureKind,
    pub income: &'static [f64],
}

pub const REFERENCE_SERIES: [ReferenceSeries; 3] = [
    ReferenceSeries {
        country: Country::Philippines,
        year: 2000,
        kind: MeasureKind::Income,
        income: &[1135.707949, 1892.846582, 2828.135482, 4453.756665, 11958.33664],
    },
    ReferenceSeries {
        country: Country::Philippines,
        year: 2015,
        kind: MeasureKind::Income,
        income: &[4088.076278, 6716.125314, 9782.182522, 15111.28196, 37230.69467],
    },
    ReferenceSeries {
        country: Country::Philippines,
        year: 2018,
        kind: MeasureKind::Income,
        income: &[2640.00233, 4215.487592, 5961.295584, 8814.201328, 20949.69591],
    },
];

/// Look up the reference series for a selection.
pub fn reference_series(selection: &Selection) -> Option<&'static ReferenceSeries> {
    REFERENCE_SERIES.iter().find(|s| {
        s.country == selection.country && s.year == selection.year && s.kind == selection.kind
    })
}
