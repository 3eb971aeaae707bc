//! Reproducible table listings for a calendar date.
//!
//! Every value is drawn from a linear-congruential sequence seeded by the
//! date, so two screens asking for the same date see the same tables without
//! sharing any state.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::fmt;
use std::sync::OnceLock;

use crate::config::{GenerationProfile, GeneratorConfig};
use crate::logging;
use crate::table::{GeneratedId, IdKind, TableFormat, TableRecord, TableType};

pub const DAY_SCHEDULE_SIZE: usize = 10;
pub const DAY_SCHEDULE_CASH: usize = 7;

/// (hour, minute) UTC; the first seven are cash slots, the last three tournaments.
const DAY_SLOTS: [(u32, u32); DAY_SCHEDULE_SIZE] = [
	(10, 0),
	(11, 0),
	(12, 30),
	(14, 0),
	(15, 30),
	(17, 0),
	(19, 0),
	(12, 0),
	(18, 0),
	(21, 0),
];

const MINUTE_MARKS: [u32; 4] = [0, 15, 30, 45];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
	seed: i64,
}

impl Lcg {
	const MULTIPLIER: i64 = 9301;
	const INCREMENT: i64 = 49297;
	const MODULUS: i64 = 233_280;

	/// Any seed is accepted; it is reduced into `0..MODULUS` first.
	pub fn new(seed: i64) -> Self {
		Self {
			seed: seed.rem_euclid(Self::MODULUS),
		}
	}

	pub fn seed(&self) -> i64 {
		self.seed
	}

	/// Returns a value in `[0, 1)` and the generator for the next draw.
	pub fn next(self) -> (f64, Lcg) {
		let seed = (self.seed * Self::MULTIPLIER + Self::INCREMENT).rem_euclid(Self::MODULUS);
		(seed as f64 / Self::MODULUS as f64, Lcg { seed })
	}

	/// `items` must not be empty.
	pub fn pick<T>(self, items: &[T]) -> (&T, Lcg) {
		let (value, rng) = self.next();
		let index = ((value * items.len() as f64).floor() as usize).min(items.len() - 1);
		(&items[index], rng)
	}

	/// Uniform integer in `0..n`; `n` must be positive.
	pub fn below(self, n: u32) -> (u32, Lcg) {
		let (value, rng) = self.next();
		let drawn = (value * n as f64).floor() as u32;
		(drawn.min(n.saturating_sub(1)), rng)
	}

	pub fn chance(self, probability: f64) -> (bool, Lcg) {
		let (value, rng) = self.next();
		(value < probability, rng)
	}
}

/// Sum of the year, month and day components of the ISO date.
pub fn date_seed(date: NaiveDate) -> i64 {
	date.year() as i64 + date.month() as i64 + date.day() as i64
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDate {
	pub input: String,
	pub reason: String,
}

impl fmt::Display for InvalidDate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "invalid date '{}': {}", self.input, self.reason)
	}
}

impl std::error::Error for InvalidDate {}

/// Only dates that render as `YYYY-MM-DD` can be seeded and appear in IDs.
pub fn validate_date(date: NaiveDate) -> Result<NaiveDate, InvalidDate> {
	if (1..=9999).contains(&date.year()) {
		Ok(date)
	} else {
		Err(InvalidDate {
			input: date.to_string(),
			reason: "year must be between 1 and 9999".to_string(),
		})
	}
}

pub fn parse_schedule_date(input: &str) -> Result<NaiveDate, InvalidDate> {
	let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| InvalidDate {
		input: input.to_string(),
		reason: e.to_string(),
	})?;
	validate_date(date)
}

fn start_time(date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
	date.and_hms_opt(hour, minute, 0).map(|t| t.and_utc())
}

fn iso(time: DateTime<Utc>) -> String {
	time.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn round1(value: f64) -> f64 {
	(value * 10.0).round() / 10.0
}

pub struct TableGenerator {
	config: GeneratorConfig,
}

impl Default for TableGenerator {
	fn default() -> Self {
		Self {
			config: GeneratorConfig::default(),
		}
	}
}

impl TableGenerator {
	pub fn new(config: GeneratorConfig) -> Result<Self, String> {
		config.validate()?;
		Ok(Self { config })
	}

	pub fn config(&self) -> &GeneratorConfig {
		&self.config
	}

	/// Exactly ten tables at fixed slots: seven cash games, then three tournaments.
	pub fn day_schedule(&self, date: NaiveDate) -> Vec<TableRecord> {
		let date_label = date.to_string();
		if validate_date(date).is_err() {
			logging::generator::invalid_date("day-schedule", &date_label);
			return Vec::new();
		}

		let profile = &self.config.day_schedule;
		let mut rng = Lcg::new(date_seed(date));
		let mut tables = Vec::with_capacity(DAY_SCHEDULE_SIZE);

		for (index, &(hour, minute)) in DAY_SLOTS.iter().enumerate() {
			let table_type = if index < DAY_SCHEDULE_CASH {
				TableType::Cash
			} else {
				TableType::Tournament
			};
			let Some(start) = start_time(date, hour, minute) else {
				logging::generator::invalid_date("day-schedule", &date_label);
				return Vec::new();
			};
			let id = GeneratedId::new(date, table_type.into(), index).to_string();
			let (record, next) = synthesize(profile, id, table_type, start, rng);
			tables.push(record);
			rng = next;
		}

		tables
	}

	/// `count` tables (the configured default when `None`) with the type of
	/// each drawn against the configured tournament ratio.
	pub fn tables_for_date(&self, date: NaiveDate, count: Option<usize>) -> Vec<TableRecord> {
		let date_label = date.to_string();
		if validate_date(date).is_err() {
			logging::generator::invalid_date("arbitrary", &date_label);
			return Vec::new();
		}

		let count = count.unwrap_or(self.config.default_count);
		let profile = &self.config.arbitrary;
		let mut rng = Lcg::new(date_seed(date));
		let mut tables = Vec::with_capacity(count);

		for index in 0..count {
			let (is_tournament, next) = rng.chance(self.config.tournament_ratio);
			let table_type = if is_tournament { TableType::Tournament } else { TableType::Cash };
			let (hour, next) = next.below(14);
			let (&minute, next) = next.pick(&MINUTE_MARKS);
			let Some(start) = start_time(date, 10 + hour, minute) else {
				logging::generator::invalid_date("arbitrary", &date_label);
				return Vec::new();
			};
			let id = GeneratedId::new(date, IdKind::Game, index).to_string();
			let (record, next) = synthesize(profile, id, table_type, start, next);
			tables.push(record);
			rng = next;
		}

		tables
	}
}

fn synthesize(
	profile: &GenerationProfile,
	id: String,
	table_type: TableType,
	start: DateTime<Utc>,
	rng: Lcg,
) -> (TableRecord, Lcg) {
	let (venue, rng) = rng.pick(&profile.venues);
	let (&currency, rng) = rng.pick(&profile.currencies);
	let (distance, rng) = rng.next();
	let (is_sponsored, rng) = rng.chance(profile.sponsored_ratio);
	let (is_live, rng) = rng.chance(profile.live_ratio);

	let (name, game_type, stakes, format, rng) = match table_type {
		TableType::Cash => {
			let (name, rng) = rng.pick(&profile.cash_names);
			let (variant, rng) = rng.pick(&profile.cash_variants);
			let (tier, rng) = rng.pick(&profile.stakes);
			let (&total_seats, rng) = rng.pick(&profile.seat_options);
			let (seated_count, rng) = rng.below(total_seats + 1);
			let format = TableFormat::Cash {
				total_seats,
				seated_count,
				buy_in_min: tier.buy_in_min,
				buy_in_max: tier.buy_in_max,
			};
			let stakes = tier.label.replace('$', currency.symbol());
			(name, variant, stakes, format, rng)
		}
		TableType::Tournament => {
			let (name, rng) = rng.pick(&profile.tournament_names);
			let (variant, rng) = rng.pick(&profile.tournament_variants);
			let (tier, rng) = rng.pick(&profile.entries);
			let (&player_cap, rng) = rng.pick(&profile.player_caps);
			let (players_registered, rng) = rng.below(player_cap + 1);
			let format = TableFormat::Tournament {
				player_cap,
				players_registered,
				entry: tier.entry,
				fee: tier.fee,
			};
			let c = currency.symbol();
			let stakes = format!("{}{:.0}+{}{:.0}", c, tier.entry, c, tier.fee);
			(name, variant, stakes, format, rng)
		}
	};

	let record = TableRecord {
		id,
		name: name.clone(),
		game_type: game_type.clone(),
		stakes,
		venue: venue.clone(),
		distance_miles: round1(distance * profile.max_distance_miles),
		start_time_iso: iso(start),
		currency,
		is_sponsored,
		is_live,
		format,
	};
	(record, rng)
}

fn default_generator() -> &'static TableGenerator {
	static GENERATOR: OnceLock<TableGenerator> = OnceLock::new();
	GENERATOR.get_or_init(TableGenerator::default)
}

pub fn generate_day_schedule_tables(date: NaiveDate) -> Vec<TableRecord> {
	default_generator().day_schedule(date)
}

pub fn generate_tables_for_date(date: NaiveDate, count: Option<usize>) -> Vec<TableRecord> {
	default_generator().tables_for_date(date, count)
}
