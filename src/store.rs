//! Table details keyed by ID: hand-authored entries from the static
//! dictionary, plus details synthesized on first lookup of a generated ID.

use chrono::{DateTime, Duration, NaiveTime, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::config;
use crate::logging;
use crate::table::{calculate_payouts, BlindLevel, Currency, GeneratedId, TableFormat, TableRecord, TableType};

fn lock_mutex<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
	pub id: String,
	pub name: String,
	pub avatar: String,
	pub rating: f64,
	#[serde(default)]
	pub is_online: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub join_time: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub registration_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentSchedule {
	pub registration_opens: String,
	pub late_registration_until: String,
	pub break_every_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentStructure {
	pub starting_stack: u32,
	pub level_minutes: u32,
	pub blind_levels: Vec<BlindLevel>,
	pub payout_percentages: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentInfo {
	pub schedule: TournamentSchedule,
	pub structure: TournamentStructure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedTableDetails {
	#[serde(flatten)]
	pub table: TableRecord,
	pub address: String,
	pub description: String,
	#[serde(default)]
	pub players: Vec<Player>,
	/// House rules; cash tables only.
	#[serde(default)]
	pub rules: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tournament: Option<TournamentInfo>,
}

impl ExtendedTableDetails {
	pub fn id(&self) -> &str {
		&self.table.id
	}

	pub fn prize_pool(&self) -> Option<f64> {
		match self.table.format {
			TableFormat::Tournament { players_registered, entry, .. } => {
				Some(entry * players_registered as f64)
			}
			TableFormat::Cash { .. } => None,
		}
	}

	pub fn estimated_payouts(&self) -> Vec<f64> {
		match (&self.tournament, self.prize_pool()) {
			(Some(info), Some(pool)) => calculate_payouts(pool, &info.structure.payout_percentages),
			_ => Vec::new(),
		}
	}

	pub fn online_players(&self) -> usize {
		self.players.iter().filter(|p| p.is_online).count()
	}
}

/// Caller-supplied overrides used when synthesizing details for a generated ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailHints {
	pub table_type: Option<TableType>,
	pub name: Option<String>,
	pub game_type: Option<String>,
	pub stakes: Option<String>,
	pub start_time: Option<String>,
	/// Falls back to the symbol on the stakes hint, then dollars.
	pub currency: Option<Currency>,
}

impl DetailHints {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_type(mut self, table_type: TableType) -> Self {
		self.table_type = Some(table_type);
		self
	}

	pub fn with_name(mut self, name: &str) -> Self {
		self.name = Some(name.to_string());
		self
	}

	pub fn with_game_type(mut self, game_type: &str) -> Self {
		self.game_type = Some(game_type.to_string());
		self
	}

	pub fn with_stakes(mut self, stakes: &str) -> Self {
		self.stakes = Some(stakes.to_string());
		self
	}

	pub fn with_start_time(mut self, start_time: &str) -> Self {
		self.start_time = Some(start_time.to_string());
		self
	}

	pub fn with_currency(mut self, currency: Currency) -> Self {
		self.currency = Some(currency);
		self
	}

	pub fn from_record(record: &TableRecord) -> Self {
		Self {
			table_type: Some(record.table_type()),
			name: Some(record.name.clone()),
			game_type: Some(record.game_type.clone()),
			stakes: Some(record.stakes.clone()),
			start_time: Some(record.start_time_iso.clone()),
			currency: Some(record.currency),
		}
	}

	fn can_synthesize(&self) -> bool {
		self.table_type.is_some() || self.name.is_some()
	}
}

struct StoreState {
	synthesized: HashMap<String, Arc<ExtendedTableDetails>>,
	rng: StdRng,
}

/// Memoizing detail store. Synthesized entries live for the lifetime of the
/// store; there is no eviction.
pub struct TableDetailStore {
	static_tables: HashMap<String, Arc<ExtendedTableDetails>>,
	state: Mutex<StoreState>,
}

impl TableDetailStore {
	pub fn new(static_tables: Vec<ExtendedTableDetails>) -> Self {
		Self::with_rng(static_tables, StdRng::from_os_rng())
	}

	pub fn with_seed(static_tables: Vec<ExtendedTableDetails>, seed: u64) -> Self {
		Self::with_rng(static_tables, StdRng::seed_from_u64(seed))
	}

	fn with_rng(static_tables: Vec<ExtendedTableDetails>, rng: StdRng) -> Self {
		let static_tables = static_tables
			.into_iter()
			.map(|d| (d.table.id.clone(), Arc::new(d)))
			.collect();
		Self {
			static_tables,
			state: Mutex::new(StoreState {
				synthesized: HashMap::new(),
				rng,
			}),
		}
	}

	pub fn load() -> Result<Self, String> {
		let tables = config::load_static_tables_auto()?;
		logging::store::loaded(tables.len());
		Ok(Self::new(tables))
	}

	pub fn static_count(&self) -> usize {
		self.static_tables.len()
	}

	pub fn synthesized_count(&self) -> usize {
		lock_mutex(&self.state).synthesized.len()
	}

	/// Static dictionary first, then anything already synthesized. Never synthesizes.
	pub fn get_table_by_id(&self, id: &str) -> Option<Arc<ExtendedTableDetails>> {
		if let Some(details) = self.static_tables.get(id) {
			return Some(Arc::clone(details));
		}
		lock_mutex(&self.state).synthesized.get(id).cloned()
	}

	pub fn get_table_by_id_with_fallback(&self, id: &str, hints: &DetailHints) -> Option<Arc<ExtendedTableDetails>> {
		if let Some(details) = self.static_tables.get(id) {
			return Some(Arc::clone(details));
		}

		// Check and insert under one lock so each ID is synthesized at most once.
		let mut state = lock_mutex(&self.state);
		if let Some(details) = state.synthesized.get(id) {
			return Some(Arc::clone(details));
		}

		let generated = match GeneratedId::parse(id) {
			Some(generated) if hints.can_synthesize() => generated,
			_ => {
				logging::store::miss(id);
				return None;
			}
		};

		let details = Arc::new(synthesize(id, &generated, hints, &mut state.rng));
		logging::store::synthesized(id, details.table.table_type().as_str());
		state.synthesized.insert(id.to_string(), Arc::clone(&details));
		Some(details)
	}

	pub fn details_for_record(&self, record: &TableRecord) -> Option<Arc<ExtendedTableDetails>> {
		self.get_table_by_id_with_fallback(&record.id, &DetailHints::from_record(record))
	}
}

static DEFAULT_STORE: OnceLock<TableDetailStore> = OnceLock::new();

/// Process-wide store over the configured static dictionary.
pub fn default_store() -> &'static TableDetailStore {
	DEFAULT_STORE.get_or_init(|| {
		TableDetailStore::load().unwrap_or_else(|e| {
			logging::config::error(&e);
			TableDetailStore::new(Vec::new())
		})
	})
}

pub fn get_table_by_id(id: &str) -> Option<Arc<ExtendedTableDetails>> {
	default_store().get_table_by_id(id)
}

pub fn get_table_by_id_with_fallback(id: &str, hints: &DetailHints) -> Option<Arc<ExtendedTableDetails>> {
	default_store().get_table_by_id_with_fallback(id, hints)
}

const VENUES: &[(&str, &str)] = &[
	("Bellagio Poker Room", "3600 S Las Vegas Blvd, Las Vegas, NV"),
	("Aria Poker Room", "3730 S Las Vegas Blvd, Las Vegas, NV"),
	("Wynn Poker Room", "3131 S Las Vegas Blvd, Las Vegas, NV"),
	("Commerce Casino", "6131 Telegraph Rd, Commerce, CA"),
	("Borgata Poker Room", "1 Borgata Way, Atlantic City, NJ"),
	("Seminole Hard Rock", "1 Seminole Way, Hollywood, FL"),
];

const PLAYER_NAMES: &[&str] = &[
	"Alex", "Jordan", "Sam", "Taylor", "Morgan", "Casey", "Riley", "Jamie",
	"Avery", "Quinn", "Drew", "Robin", "Parker", "Reese", "Skyler", "Rowan",
];

const CASH_RULES: &[&str] = &[
	"English only at the table",
	"One player to a hand",
	"Cards speak at showdown",
	"No string bets",
	"Phones away during a hand",
	"Time bank of 60 seconds per decision",
	"Straddles allowed from the button",
	"Table stakes apply",
];

const FLAVOR: &[&str] = &[
	"A friendly game with a regular crowd.",
	"Fast action and deep stacks.",
	"Popular with tourists and locals alike.",
	"Full dealer service with table-side dining.",
];

const BLIND_SCHEDULE: &[(f64, f64)] = &[
	(100.0, 200.0),
	(200.0, 400.0),
	(300.0, 600.0),
	(400.0, 800.0),
	(500.0, 1000.0),
	(600.0, 1200.0),
	(800.0, 1600.0),
	(1000.0, 2000.0),
];

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
	&items[rng.random_range(0..items.len())]
}

fn round1(value: f64) -> f64 {
	(value * 10.0).round() / 10.0
}

fn iso(time: DateTime<Utc>) -> String {
	time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Non-negative, finite amount with an optional currency symbol.
fn amount(text: &str) -> Option<f64> {
	let value: f64 = text.trim().trim_start_matches(['$', '€', '£']).parse().ok()?;
	(value.is_finite() && value >= 0.0).then_some(value)
}

/// "$1/$2" -> 2.0
fn big_blind(stakes: &str) -> Option<f64> {
	let (_, big) = stakes.split_once('/')?;
	amount(big)
}

/// "$100+$20" -> (100.0, 20.0)
fn entry_and_fee(stakes: &str) -> Option<(f64, f64)> {
	let (entry, fee) = stakes.split_once('+')?;
	Some((amount(entry)?, amount(fee)?))
}

fn synthesize(id: &str, generated: &GeneratedId, hints: &DetailHints, rng: &mut StdRng) -> ExtendedTableDetails {
	let table_type = hints
		.table_type
		.or_else(|| generated.kind.table_type())
		.unwrap_or(TableType::Cash);

	let (venue, address) = *pick(rng, VENUES);

	let start = hints
		.start_time
		.as_deref()
		.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
		.map(|t| t.with_timezone(&Utc))
		.unwrap_or_else(|| {
			let evening = NaiveTime::from_hms_opt(19, 0, 0).unwrap_or_default();
			generated.date.and_time(evening).and_utc()
		});

	let name = hints
		.name
		.clone()
		.unwrap_or_else(|| format!("{} {}", venue, table_type));
	let game_type = hints.game_type.clone().unwrap_or_else(|| "NLH".to_string());
	let currency = hints
		.currency
		.or_else(|| hints.stakes.as_deref().and_then(Currency::of_stakes))
		.unwrap_or(Currency::Dollar);
	let c = currency.symbol();

	let (format, stakes, players, rules, tournament) = match table_type {
		TableType::Cash => {
			let stakes = hints.stakes.clone().unwrap_or_else(|| format!("{}1/{}2", c, c));
			let big = big_blind(&stakes).unwrap_or(2.0);
			let total_seats = *pick(rng, &[6u32, 9]);
			let seated_count = rng.random_range(0..=total_seats);
			let players = (0..seated_count)
				.map(|i| {
					let mut player = random_player(rng, id, i);
					player.join_time = Some(format!("{} min ago", rng.random_range(1..=180)));
					player
				})
				.collect();

			let mut rules: Vec<String> = Vec::new();
			while rules.len() < 4 {
				let rule = pick(rng, CASH_RULES).to_string();
				if !rules.contains(&rule) {
					rules.push(rule);
				}
			}

			let format = TableFormat::Cash {
				total_seats,
				seated_count,
				buy_in_min: big * 20.0,
				buy_in_max: big * 100.0,
			};
			(format, stakes, players, rules, None)
		}
		TableType::Tournament => {
			let (entry, fee) = hints
				.stakes
				.as_deref()
				.and_then(entry_and_fee)
				.unwrap_or((100.0, 20.0));
			let stakes = hints
				.stakes
				.clone()
				.unwrap_or_else(|| format!("{}{:.0}+{}{:.0}", c, entry, c, fee));
			let player_cap = *pick(rng, &[50u32, 100, 200]);
			let players_registered = rng.random_range(0..=player_cap);
			let players = (0..players_registered.min(12))
				.map(|i| {
					let mut player = random_player(rng, id, i);
					let minutes = rng.random_range(5..=240);
					player.registration_time = Some(iso(start - Duration::minutes(minutes)));
					player
				})
				.collect();

			let blind_levels = BLIND_SCHEDULE
				.iter()
				.enumerate()
				.map(|(i, &(small, big))| BlindLevel {
					level: i as u32 + 1,
					small,
					big,
					ante: if i >= 3 { big } else { 0.0 },
					minutes: 20,
				})
				.collect();
			let payout_percentages = if players_registered >= 50 {
				vec![0.4, 0.25, 0.15, 0.1, 0.1]
			} else {
				vec![0.5, 0.3, 0.2]
			};

			let info = TournamentInfo {
				schedule: TournamentSchedule {
					registration_opens: iso(start - Duration::minutes(60)),
					late_registration_until: iso(start + Duration::minutes(120)),
					break_every_minutes: 60,
				},
				structure: TournamentStructure {
					starting_stack: 20_000,
					level_minutes: 20,
					blind_levels,
					payout_percentages,
				},
			};

			let format = TableFormat::Tournament {
				player_cap,
				players_registered,
				entry,
				fee,
			};
			(format, stakes, players, Vec::new(), Some(info))
		}
	};

	let description = format!("{} at {}. {}", name, venue, pick(rng, FLAVOR));

	ExtendedTableDetails {
		table: TableRecord {
			id: id.to_string(),
			name,
			game_type,
			stakes,
			venue: venue.to_string(),
			distance_miles: round1(rng.random_range(0.5..25.0)),
			start_time_iso: iso(start),
			currency,
			is_sponsored: false,
			is_live: rng.random_bool(0.3),
			format,
		},
		address: address.to_string(),
		description,
		players,
		rules,
		tournament,
	}
}

fn random_player(rng: &mut StdRng, table_id: &str, index: u32) -> Player {
	let name = pick(rng, PLAYER_NAMES);
	Player {
		id: format!("{}-p{}", table_id, index),
		name: name.to_string(),
		avatar: format!("avatars/{}.png", name.to_lowercase()),
		rating: round1(rng.random_range(3.0..=5.0)),
		is_online: rng.random_bool(0.7),
		join_time: None,
		registration_time: None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn static_details() -> ExtendedTableDetails {
		ExtendedTableDetails {
			table: TableRecord {
				id: "bellagio-nlh-2-5".to_string(),
				name: "Bellagio 2/5".to_string(),
				game_type: "NLH".to_string(),
				stakes: "$2/$5".to_string(),
				venue: "Bellagio Poker Room".to_string(),
				distance_miles: 1.2,
				start_time_iso: "2025-06-01T18:00:00.000Z".to_string(),
				currency: Currency::Dollar,
				is_sponsored: true,
				is_live: true,
				format: TableFormat::Cash {
					total_seats: 9,
					seated_count: 7,
					buy_in_min: 200.0,
					buy_in_max: 1000.0,
				},
			},
			address: "3600 S Las Vegas Blvd, Las Vegas, NV".to_string(),
			description: "The flagship game.".to_string(),
			players: Vec::new(),
			rules: vec!["No string bets".to_string()],
			tournament: None,
		}
	}

	fn test_store() -> TableDetailStore {
		TableDetailStore::with_seed(vec![static_details()], 7)
	}

	#[test]
	fn test_static_lookup() {
		let store = test_store();
		let details = store.get_table_by_id("bellagio-nlh-2-5").unwrap();
		assert_eq!(details.table.name, "Bellagio 2/5");
		assert_eq!(store.static_count(), 1);
	}

	#[test]
	fn test_unknown_id_returns_none() {
		let store = test_store();
		assert!(store.get_table_by_id("nonexistent").is_none());
		assert!(store.get_table_by_id_with_fallback("nonexistent", &DetailHints::new()).is_none());
		assert_eq!(store.synthesized_count(), 0);
	}

	#[test]
	fn test_static_wins_over_hints() {
		let store = test_store();
		let hints = DetailHints::new().with_type(TableType::Tournament).with_name("Other");
		let details = store.get_table_by_id_with_fallback("bellagio-nlh-2-5", &hints).unwrap();
		assert_eq!(details.table.name, "Bellagio 2/5");
		assert_eq!(store.synthesized_count(), 0);
	}

	#[test]
	fn test_generated_id_without_hints_is_not_synthesized() {
		let store = test_store();
		assert!(store.get_table_by_id_with_fallback("2025-06-01-cash-3", &DetailHints::new()).is_none());
	}

	#[test]
	fn test_non_generated_id_with_hints_is_not_synthesized() {
		let store = test_store();
		let hints = DetailHints::new().with_type(TableType::Cash).with_name("X");
		assert!(store.get_table_by_id_with_fallback("my-home-game", &hints).is_none());
	}

	#[test]
	fn test_synthesis_is_idempotent() {
		let store = test_store();
		let hints = DetailHints::new().with_type(TableType::Cash).with_name("X");
		let first = store.get_table_by_id_with_fallback("2025-06-01-cash-3", &hints).unwrap();
		let second = store.get_table_by_id_with_fallback("2025-06-01-cash-3", &hints).unwrap();
		assert_eq!(*first, *second);
		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(store.synthesized_count(), 1);

		let cached = store.get_table_by_id("2025-06-01-cash-3").unwrap();
		assert_eq!(*cached, *first);

		let no_hints = store.get_table_by_id_with_fallback("2025-06-01-cash-3", &DetailHints::new()).unwrap();
		assert_eq!(*no_hints, *first);
	}

	#[test]
	fn test_synthesized_cash_uses_hints() {
		let store = test_store();
		let hints = DetailHints::new()
			.with_type(TableType::Cash)
			.with_name("Lunch Special")
			.with_game_type("PLO")
			.with_stakes("$1/$3")
			.with_start_time("2025-06-01T12:00:00.000Z");
		let details = store.get_table_by_id_with_fallback("2025-06-01-cash-2", &hints).unwrap();

		assert_eq!(details.table.name, "Lunch Special");
		assert_eq!(details.table.game_type, "PLO");
		assert_eq!(details.table.stakes, "$1/$3");
		assert_eq!(details.table.start_time_iso, "2025-06-01T12:00:00.000Z");
		assert!(details.table.is_cash());
		assert_eq!(details.rules.len(), 4);
		assert!(details.tournament.is_none());

		match details.table.format {
			TableFormat::Cash { total_seats, seated_count, buy_in_min, buy_in_max } => {
				assert!(seated_count <= total_seats);
				assert_eq!(buy_in_min, 60.0);
				assert_eq!(buy_in_max, 300.0);
				assert_eq!(details.players.len(), seated_count as usize);
			}
			_ => panic!("expected cash format"),
		}
	}

	#[test]
	fn test_synthesized_tournament() {
		let store = test_store();
		let hints = DetailHints::new()
			.with_type(TableType::Tournament)
			.with_stakes("$200+$25");
		let details = store.get_table_by_id_with_fallback("2025-06-01-tournament-8", &hints).unwrap();

		assert!(details.table.is_tournament());
		assert!(details.rules.is_empty());
		let info = details.tournament.as_ref().unwrap();
		assert_eq!(info.structure.blind_levels.len(), 8);
		assert_eq!(info.schedule.registration_opens, "2025-06-01T18:00:00.000Z");
		assert_eq!(info.schedule.late_registration_until, "2025-06-01T21:00:00.000Z");

		match details.table.format {
			TableFormat::Tournament { player_cap, players_registered, entry, fee } => {
				assert!(players_registered <= player_cap);
				assert_eq!(entry, 200.0);
				assert_eq!(fee, 25.0);
			}
			_ => panic!("expected tournament format"),
		}

		let total: f64 = details.estimated_payouts().iter().sum();
		assert!((total - details.prize_pool().unwrap()).abs() < 0.01);
	}

	#[test]
	fn test_name_hint_alone_infers_type_from_id() {
		let store = test_store();
		let hints = DetailHints::new().with_name("Evening Bounty");
		let details = store.get_table_by_id_with_fallback("2025-06-01-tournament-9", &hints).unwrap();
		assert!(details.table.is_tournament());
	}

	#[test]
	fn test_details_for_record() {
		let store = test_store();
		let mut record = static_details().table;
		record.id = "2025-06-01-game-17".to_string();
		let details = store.details_for_record(&record).unwrap();
		assert_eq!(details.table.name, record.name);
		assert_eq!(details.table.stakes, "$2/$5");
	}

	#[test]
	fn test_concurrent_lookups_synthesize_once() {
		let store = Arc::new(test_store());
		let handles: Vec<_> = (0..8)
			.map(|_| {
				let store = Arc::clone(&store);
				std::thread::spawn(move || {
					let hints = DetailHints::new().with_type(TableType::Cash).with_name("X");
					store.get_table_by_id_with_fallback("2025-06-02-cash-1", &hints).unwrap()
				})
			})
			.collect();

		let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
		for details in &results {
			assert!(Arc::ptr_eq(details, &results[0]));
		}
		assert_eq!(store.synthesized_count(), 1);
	}

	#[test]
	fn test_stakes_parsing() {
		assert_eq!(big_blind("$1/$2"), Some(2.0));
		assert_eq!(big_blind("€5/€10"), Some(10.0));
		assert_eq!(big_blind("NLH"), None);
		assert_eq!(entry_and_fee("$100+$20"), Some((100.0, 20.0)));
		assert_eq!(entry_and_fee("$100"), None);
		assert_eq!(big_blind("$1/-2"), None);
		assert_eq!(big_blind("$1/$inf"), None);
		assert_eq!(entry_and_fee("$-100+$20"), None);
		assert_eq!(entry_and_fee("$100+NaN"), None);
	}

	#[test]
	fn test_negative_stakes_fall_back_to_defaults() {
		let store = test_store();
		let cash = DetailHints::new().with_type(TableType::Cash).with_stakes("$1/-2");
		let details = store.get_table_by_id_with_fallback("2025-06-01-cash-3", &cash).unwrap();
		match details.table.format {
			TableFormat::Cash { buy_in_min, buy_in_max, .. } => {
				assert!(buy_in_min >= 0.0);
				assert!(buy_in_min <= buy_in_max);
				assert_eq!(buy_in_min, 40.0);
				assert_eq!(buy_in_max, 200.0);
			}
			_ => panic!("expected cash format"),
		}

		let tournament = DetailHints::new().with_type(TableType::Tournament).with_stakes("$-100+$20");
		let details = store.get_table_by_id_with_fallback("2025-06-01-tournament-8", &tournament).unwrap();
		match details.table.format {
			TableFormat::Tournament { entry, fee, .. } => {
				assert_eq!(entry, 100.0);
				assert_eq!(fee, 20.0);
			}
			_ => panic!("expected tournament format"),
		}
	}

	#[test]
	fn test_details_keep_listing_currency() {
		let store = test_store();
		let mut record = static_details().table;
		record.id = "2025-06-01-game-4".to_string();
		record.currency = Currency::Euro;
		record.stakes = "€20+€5".to_string();
		record.format = TableFormat::Tournament {
			player_cap: 100,
			players_registered: 10,
			entry: 20.0,
			fee: 5.0,
		};
		let details = store.details_for_record(&record).unwrap();
		assert_eq!(details.table.currency, Currency::Euro);
		assert_eq!(details.table.stakes, "€20+€5");
	}

	#[test]
	fn test_currency_inferred_from_stakes_hint() {
		let store = test_store();
		let hints = DetailHints::new().with_type(TableType::Cash).with_stakes("£2/£5");
		let details = store.get_table_by_id_with_fallback("2025-06-01-cash-1", &hints).unwrap();
		assert_eq!(details.table.currency, Currency::Pound);
		assert_eq!(details.table.summary(), "NLH £2/£5 £100-£500");
	}

	#[test]
	fn test_default_stakes_use_currency_hint() {
		let store = test_store();
		let cash = DetailHints::new().with_type(TableType::Cash).with_currency(Currency::Euro);
		let details = store.get_table_by_id_with_fallback("2025-06-01-cash-5", &cash).unwrap();
		assert_eq!(details.table.stakes, "€1/€2");

		let tournament = DetailHints::new().with_type(TableType::Tournament).with_currency(Currency::Pound);
		let details = store.get_table_by_id_with_fallback("2025-06-01-tournament-7", &tournament).unwrap();
		assert_eq!(details.table.stakes, "£100+£20");
		assert_eq!(details.table.currency, Currency::Pound);
	}

	#[test]
	fn test_get_table_by_id_sees_cached_synthesis() {
		let store = test_store();
		assert!(store.get_table_by_id("2025-06-01-tournament-9").is_none());

		let hints = DetailHints::new().with_type(TableType::Tournament).with_name("Evening Bounty");
		let synthesized = store.get_table_by_id_with_fallback("2025-06-01-tournament-9", &hints).unwrap();

		let cached = store.get_table_by_id("2025-06-01-tournament-9").unwrap();
		assert!(Arc::ptr_eq(&cached, &synthesized));
		assert_eq!(store.synthesized_count(), 1);
		assert!(test_store().get_table_by_id("2025-06-01-tournament-9").is_none());
	}

	#[test]
	fn test_online_players_counts_flags() {
		let mut details = static_details();
		let online = Player {
			id: "p1".to_string(),
			name: "Alex".to_string(),
			avatar: "avatars/alex.png".to_string(),
			rating: 4.5,
			is_online: true,
			join_time: None,
			registration_time: None,
		};
		let offline = Player {
			id: "p2".to_string(),
			is_online: false,
			..online.clone()
		};
		details.players = vec![online.clone(), offline, online];
		assert_eq!(details.online_players(), 2);
	}

	#[test]
	fn test_details_serialize_flat() {
		let json = serde_json::to_value(static_details()).unwrap();
		assert_eq!(json["id"], "bellagio-nlh-2-5");
		assert_eq!(json["type"], "cash");
		assert_eq!(json["address"], "3600 S Las Vegas Blvd, Las Vegas, NV");
		assert!(json.get("tournament").is_none());

		let back: ExtendedTableDetails = serde_json::from_value(json).unwrap();
		assert_eq!(back, static_details());
	}
}
