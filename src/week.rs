use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::filter::{filter_and_sort_tables, FilterResult, TableFilters};
use crate::generator::TableGenerator;

pub const WEEK_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
	pub date: NaiveDate,
	pub visible_count: usize,
	pub cash_count: usize,
	pub tournament_count: usize,
	pub sponsored_count: usize,
}

impl DaySummary {
	fn from_result(date: NaiveDate, result: &FilterResult) -> Self {
		let tables = &result.filtered_tables;
		Self {
			date,
			visible_count: result.visible_count,
			cash_count: tables.iter().filter(|t| t.is_cash()).count(),
			tournament_count: tables.iter().filter(|t| t.is_tournament()).count(),
			sponsored_count: tables.iter().filter(|t| t.is_sponsored).count(),
		}
	}
}

fn week_dates(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
	(0..WEEK_DAYS).map_while(move |offset| start.checked_add_days(Days::new(offset)))
}

/// Filtered day schedules for seven days from `start`. Stops early if the
/// calendar runs out.
pub fn week_tables(generator: &TableGenerator, start: NaiveDate, filters: &TableFilters) -> Vec<(NaiveDate, FilterResult)> {
	week_dates(start)
		.map(|date| {
			let tables = generator.day_schedule(date);
			(date, filter_and_sort_tables(&tables, filters))
		})
		.collect()
}

/// Per-day counts for the home screen; each count is the day schedule's
/// `visible_count` under the same filters.
pub fn summarize_week(generator: &TableGenerator, start: NaiveDate, filters: &TableFilters) -> Vec<DaySummary> {
	week_tables(generator, start, filters)
		.iter()
		.map(|(date, result)| DaySummary::from_result(*date, result))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::filter::{GameTypeFilter, TableSize};

	fn start() -> NaiveDate {
		NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
	}

	#[test]
	fn test_week_has_seven_consecutive_days() {
		let summary = summarize_week(&TableGenerator::default(), start(), &TableFilters::default());
		assert_eq!(summary.len(), 7);
		assert_eq!(summary[0].date, start());
		assert_eq!(summary[6].date, NaiveDate::from_ymd_opt(2025, 6, 7).unwrap());
	}

	#[test]
	fn test_unfiltered_day_counts() {
		let summary = summarize_week(&TableGenerator::default(), start(), &TableFilters::default());
		for day in summary {
			assert_eq!(day.visible_count, 10);
			assert_eq!(day.cash_count, 7);
			assert_eq!(day.tournament_count, 3);
		}
	}

	#[test]
	fn test_summary_matches_day_schedule() {
		let generator = TableGenerator::default();
		let filters = TableFilters::default()
			.with_game_type(GameTypeFilter::Cash)
			.with_table_size(TableSize::SixMax);
		let summary = summarize_week(&generator, start(), &filters);

		for day in summary {
			let tables = generator.day_schedule(day.date);
			let result = filter_and_sort_tables(&tables, &filters);
			assert_eq!(day.visible_count, result.visible_count);
			assert_eq!(day.tournament_count, 0);
		}
	}

	#[test]
	fn test_week_stops_at_end_of_calendar() {
		let last = NaiveDate::MAX;
		let days = week_tables(&TableGenerator::default(), last, &TableFilters::default());
		assert_eq!(days.len(), 1);
		assert_eq!(days[0].1.visible_count, 0);
	}
}
