use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::table::{TableFormat, TableRecord, TableType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameTypeFilter {
	#[default]
	All,
	Cash,
	Tournament,
	#[serde(other)]
	Unknown,
}

impl FromStr for GameTypeFilter {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s.to_lowercase().as_str() {
			"all" => GameTypeFilter::All,
			"cash" => GameTypeFilter::Cash,
			"tournament" => GameTypeFilter::Tournament,
			_ => GameTypeFilter::Unknown,
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableSize {
	#[serde(rename = "6max")]
	SixMax,
	#[serde(rename = "9max")]
	NineMax,
	#[serde(other)]
	Unknown,
}

impl TableSize {
	fn matches(&self, total_seats: u32) -> bool {
		match self {
			TableSize::SixMax => total_seats <= 6,
			TableSize::NineMax => total_seats > 6,
			TableSize::Unknown => false,
		}
	}
}

impl FromStr for TableSize {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s.to_lowercase().as_str() {
			"6max" => TableSize::SixMax,
			"9max" => TableSize::NineMax,
			_ => TableSize::Unknown,
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuyinRange {
	Low,
	Medium,
	High,
	#[serde(other)]
	Unknown,
}

impl BuyinRange {
	pub const LOW_MAX: f64 = 50.0;
	pub const HIGH_MIN: f64 = 200.0;

	fn matches(&self, buy_in_min: f64, buy_in_max: f64) -> bool {
		match self {
			BuyinRange::Low => buy_in_max <= Self::LOW_MAX,
			BuyinRange::Medium => buy_in_min >= Self::LOW_MAX && buy_in_max <= Self::HIGH_MIN,
			BuyinRange::High => buy_in_min >= Self::HIGH_MIN,
			BuyinRange::Unknown => false,
		}
	}
}

impl FromStr for BuyinRange {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s.to_lowercase().as_str() {
			"low" => BuyinRange::Low,
			"medium" => BuyinRange::Medium,
			"high" => BuyinRange::High,
			_ => BuyinRange::Unknown,
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
	#[default]
	Distance,
	BuyinLowHigh,
	BuyinHighLow,
	StartTime,
	/// Leaves the filtered tables in their original order.
	#[serde(other)]
	Unknown,
}

impl FromStr for SortBy {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"distance" => SortBy::Distance,
			"buyinLowHigh" => SortBy::BuyinLowHigh,
			"buyinHighLow" => SortBy::BuyinHighLow,
			"startTime" => SortBy::StartTime,
			_ => SortBy::Unknown,
		})
	}
}

/// Active query. Empty sets put no restriction on their axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFilters {
	pub game_type: GameTypeFilter,
	/// Variant codes, e.g. `nlh`, `plo`; compared without regard to case.
	pub game_variants: BTreeSet<String>,
	pub table_sizes: Vec<TableSize>,
	pub buyin_ranges: Vec<BuyinRange>,
	pub sort_by: SortBy,
}

impl TableFilters {
	pub fn with_game_type(mut self, game_type: GameTypeFilter) -> Self {
		self.game_type = game_type;
		self
	}

	pub fn with_variant(mut self, variant: &str) -> Self {
		self.game_variants.insert(variant.to_lowercase());
		self
	}

	pub fn with_table_size(mut self, size: TableSize) -> Self {
		self.table_sizes.push(size);
		self
	}

	pub fn with_buyin_range(mut self, range: BuyinRange) -> Self {
		self.buyin_ranges.push(range);
		self
	}

	pub fn sorted_by(mut self, sort_by: SortBy) -> Self {
		self.sort_by = sort_by;
		self
	}
}

pub fn matches_filters(table: &TableRecord, filters: &TableFilters) -> bool {
	let type_ok = match filters.game_type {
		GameTypeFilter::All => true,
		GameTypeFilter::Cash => table.table_type() == TableType::Cash,
		GameTypeFilter::Tournament => table.table_type() == TableType::Tournament,
		GameTypeFilter::Unknown => false,
	};
	if !type_ok {
		return false;
	}

	if !filters.game_variants.is_empty()
		&& !filters
			.game_variants
			.iter()
			.any(|variant| variant.eq_ignore_ascii_case(&table.game_type))
	{
		return false;
	}

	// Size and buy-in axes only constrain cash games.
	if let TableFormat::Cash { total_seats, buy_in_min, buy_in_max, .. } = table.format {
		if !filters.table_sizes.is_empty()
			&& !filters.table_sizes.iter().any(|size| size.matches(total_seats))
		{
			return false;
		}

		if !filters.buyin_ranges.is_empty()
			&& !filters.buyin_ranges.iter().any(|range| range.matches(buy_in_min, buy_in_max))
		{
			return false;
		}
	}

	true
}

/// Stable; returns a new vector and leaves `tables` untouched.
pub fn sort_tables(tables: &[TableRecord], sort_by: SortBy) -> Vec<TableRecord> {
	let mut sorted = tables.to_vec();
	match sort_by {
		SortBy::Distance => {
			sorted.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
		}
		SortBy::BuyinLowHigh => {
			sorted.sort_by(|a, b| a.min_buy_in().total_cmp(&b.min_buy_in()));
		}
		SortBy::BuyinHighLow => {
			sorted.sort_by(|a, b| b.max_buy_in().total_cmp(&a.max_buy_in()));
		}
		SortBy::StartTime => {
			sorted.sort_by(|a, b| match (a.start_time(), b.start_time()) {
				(Some(x), Some(y)) => x.cmp(&y),
				(Some(_), None) => Ordering::Less,
				(None, Some(_)) => Ordering::Greater,
				(None, None) => Ordering::Equal,
			});
		}
		SortBy::Unknown => {}
	}
	sorted
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterResult {
	pub filtered_tables: Vec<TableRecord>,
	/// Number of tables that passed the filters, regardless of how many are shown.
	pub visible_count: usize,
}

pub fn filter_and_sort_tables(tables: &[TableRecord], filters: &TableFilters) -> FilterResult {
	let matching: Vec<TableRecord> = tables
		.iter()
		.filter(|t| matches_filters(t, filters))
		.cloned()
		.collect();
	let filtered_tables = sort_tables(&matching, filters.sort_by);
	let visible_count = filtered_tables.len();
	FilterResult {
		filtered_tables,
		visible_count,
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a> {
	pub items: &'a [TableRecord],
	pub page: usize,
	pub page_size: usize,
	pub total_pages: usize,
	pub visible_count: usize,
	pub has_more: bool,
}

/// Zero-based page of an already filtered result. Out-of-range pages are empty.
pub fn paginate(result: &FilterResult, page: usize, page_size: usize) -> Page<'_> {
	let tables = &result.filtered_tables;
	let page_size = page_size.max(1);
	let total_pages = tables.len().div_ceil(page_size);
	let start = page.saturating_mul(page_size).min(tables.len());
	let end = start.saturating_add(page_size).min(tables.len());
	Page {
		items: &tables[start..end],
		page,
		page_size,
		total_pages,
		visible_count: result.visible_count,
		has_more: end < tables.len(),
	}
}
