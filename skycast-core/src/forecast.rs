use crate::model::ForecastEntry;

/// Forecast steps per calendar day: the API delivers entries at a fixed
/// 3-hour cadence, so every 8th entry is 24 hours apart.
pub const ENTRIES_PER_DAY: usize = 8;

/// Reduce the 3-hour-cadence forecast list to one entry per day.
///
/// Positional rule: keep indices 0, 8, 16, ... of the list as delivered,
/// which for the usual 40-entry response yields 5 samples. The first
/// entry always survives, so a short list still produces one sample.
pub fn sample_daily(entries: Vec<ForecastEntry>) -> Vec<ForecastEntry> {
    entries.into_iter().step_by(ENTRIES_PER_DAY).collect()
}
