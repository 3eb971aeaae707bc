use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults;
use crate::logging;
use crate::store::ExtendedTableDetails;
use crate::table::Currency;

fn config_paths(filename: &str) -> Vec<PathBuf> {
	let mut paths = Vec::new();

	if let Some(config_dir) = dirs::config_dir() {
		paths.push(config_dir.join("poker-finder").join(filename));
	}

	paths.push(PathBuf::from("config").join(filename));

	paths
}

fn find_config(filename: &str) -> Option<PathBuf> {
	config_paths(filename).into_iter().find(|p| p.exists())
}

pub fn resolve_config(filename: &str) -> Result<PathBuf, String> {
	find_config(filename).ok_or_else(|| {
		let searched: Vec<_> = config_paths(filename)
			.iter()
			.map(|p| p.display().to_string())
			.collect();
		format!("Config file '{}' not found. Searched: {}", filename, searched.join(", "))
	})
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StakesTier {
	pub label: String,
	pub buy_in_min: f64,
	pub buy_in_max: f64,
}

impl StakesTier {
	fn new(label: &str, buy_in_min: f64, buy_in_max: f64) -> Self {
		Self { label: label.to_string(), buy_in_min, buy_in_max }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EntryTier {
	pub entry: f64,
	pub fee: f64,
}

/// Lookup tables and bands the generator draws from in one mode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerationProfile {
	pub venues: Vec<String>,
	pub cash_names: Vec<String>,
	pub tournament_names: Vec<String>,
	pub cash_variants: Vec<String>,
	pub tournament_variants: Vec<String>,
	pub stakes: Vec<StakesTier>,
	pub entries: Vec<EntryTier>,
	pub seat_options: Vec<u32>,
	pub player_caps: Vec<u32>,
	pub currencies: Vec<Currency>,
	pub max_distance_miles: f64,
	pub sponsored_ratio: f64,
	pub live_ratio: f64,
}

fn strings(items: &[&str]) -> Vec<String> {
	items.iter().map(|s| s.to_string()).collect()
}

impl GenerationProfile {
	pub fn day_schedule() -> Self {
		Self {
			venues: strings(&[
				"Bellagio Poker Room",
				"Aria Poker Room",
				"Wynn Poker Room",
				"Venetian Poker Room",
				"MGM Grand Poker Room",
				"Caesars Palace Poker Room",
			]),
			cash_names: strings(&[
				"Main Room Cash",
				"High Limit Cash",
				"Lunch Special",
				"Rail Side Cash",
				"Late Night Cash",
			]),
			tournament_names: strings(&[
				"Daily Deepstack",
				"Noon Freezeout",
				"Evening Bounty",
				"Nightly Turbo",
			]),
			cash_variants: strings(&["NLH", "PLO"]),
			tournament_variants: strings(&["NLH"]),
			stakes: vec![
				StakesTier::new("$0.25/$0.50", 20.0, 50.0),
				StakesTier::new("$1/$2", 50.0, 200.0),
				StakesTier::new("$2/$5", 200.0, 1000.0),
				StakesTier::new("$5/$10", 500.0, 2000.0),
			],
			entries: vec![
				EntryTier { entry: 50.0, fee: 10.0 },
				EntryTier { entry: 100.0, fee: 20.0 },
				EntryTier { entry: 200.0, fee: 25.0 },
				EntryTier { entry: 500.0, fee: 50.0 },
			],
			seat_options: vec![6, 9],
			player_caps: vec![40, 60, 80, 120],
			currencies: vec![Currency::Dollar],
			max_distance_miles: 15.0,
			sponsored_ratio: 0.15,
			live_ratio: 0.3,
		}
	}

	pub fn arbitrary() -> Self {
		Self {
			venues: strings(&[
				"Bellagio Poker Room",
				"Aria Poker Room",
				"Wynn Poker Room",
				"Venetian Poker Room",
				"MGM Grand Poker Room",
				"Caesars Palace Poker Room",
				"Commerce Casino",
				"Bicycle Casino",
				"Borgata Poker Room",
				"Seminole Hard Rock",
				"Foxwoods Poker Room",
				"Hustler Casino",
			]),
			cash_names: strings(&[
				"Main Room Cash",
				"High Limit Cash",
				"Lunch Special",
				"Rail Side Cash",
				"Late Night Cash",
				"Bad Beat Jackpot Table",
				"Mixed Game Table",
			]),
			tournament_names: strings(&[
				"Daily Deepstack",
				"Noon Freezeout",
				"Evening Bounty",
				"Nightly Turbo",
				"Weekend Main Event",
				"Mystery Bounty",
				"Satellite Qualifier",
			]),
			cash_variants: strings(&["NLH", "PLO", "PLO5", "Stud", "Mixed"]),
			tournament_variants: strings(&["NLH", "PLO", "Mixed"]),
			stakes: vec![
				StakesTier::new("$0.25/$0.50", 20.0, 50.0),
				StakesTier::new("$1/$2", 50.0, 200.0),
				StakesTier::new("$1/$3", 100.0, 300.0),
				StakesTier::new("$2/$5", 200.0, 1000.0),
				StakesTier::new("$5/$10", 500.0, 2000.0),
				StakesTier::new("$10/$20", 1000.0, 4000.0),
			],
			entries: vec![
				EntryTier { entry: 20.0, fee: 5.0 },
				EntryTier { entry: 50.0, fee: 10.0 },
				EntryTier { entry: 100.0, fee: 20.0 },
				EntryTier { entry: 200.0, fee: 25.0 },
				EntryTier { entry: 500.0, fee: 50.0 },
				EntryTier { entry: 1000.0, fee: 100.0 },
				EntryTier { entry: 1500.0, fee: 150.0 },
			],
			seat_options: vec![6, 8, 9, 10],
			player_caps: vec![30, 50, 100, 200, 400],
			currencies: vec![Currency::Dollar, Currency::Euro, Currency::Pound],
			max_distance_miles: 40.0,
			sponsored_ratio: 0.1,
			live_ratio: 0.25,
		}
	}

	pub fn validate(&self, name: &str) -> Result<(), String> {
		let lists = [
			("venues", self.venues.len()),
			("cash_names", self.cash_names.len()),
			("tournament_names", self.tournament_names.len()),
			("cash_variants", self.cash_variants.len()),
			("tournament_variants", self.tournament_variants.len()),
			("stakes", self.stakes.len()),
			("entries", self.entries.len()),
			("seat_options", self.seat_options.len()),
			("player_caps", self.player_caps.len()),
			("currencies", self.currencies.len()),
		];
		for (field, len) in lists {
			if len == 0 {
				return Err(format!("{}.{} must not be empty", name, field));
			}
		}

		for tier in &self.stakes {
			if tier.buy_in_min < 0.0 || tier.buy_in_min > tier.buy_in_max {
				return Err(format!(
					"{}.stakes '{}': buy-in band {}-{} is invalid",
					name, tier.label, tier.buy_in_min, tier.buy_in_max
				));
			}
		}

		if self.entries.iter().any(|e| e.entry < 0.0 || e.fee < 0.0) {
			return Err(format!("{}.entries must not be negative", name));
		}
		if self.seat_options.contains(&0) || self.player_caps.contains(&0) {
			return Err(format!("{}: seat options and player caps must be positive", name));
		}
		if !(self.max_distance_miles >= 0.0) {
			return Err(format!("{}.max_distance_miles must not be negative", name));
		}
		for (field, ratio) in [("sponsored_ratio", self.sponsored_ratio), ("live_ratio", self.live_ratio)] {
			if !(0.0..=1.0).contains(&ratio) {
				return Err(format!("{}.{} must be between 0 and 1", name, field));
			}
		}
		Ok(())
	}
}

/// A `[generator.*]` profile table as written; fields left out keep the
/// built-in value for that mode.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfileOverrides {
	venues: Option<Vec<String>>,
	cash_names: Option<Vec<String>>,
	tournament_names: Option<Vec<String>>,
	cash_variants: Option<Vec<String>>,
	tournament_variants: Option<Vec<String>>,
	stakes: Option<Vec<StakesTier>>,
	entries: Option<Vec<EntryTier>>,
	seat_options: Option<Vec<u32>>,
	player_caps: Option<Vec<u32>>,
	currencies: Option<Vec<Currency>>,
	max_distance_miles: Option<f64>,
	sponsored_ratio: Option<f64>,
	live_ratio: Option<f64>,
}

impl ProfileOverrides {
	fn apply(self, base: GenerationProfile) -> GenerationProfile {
		GenerationProfile {
			venues: self.venues.unwrap_or(base.venues),
			cash_names: self.cash_names.unwrap_or(base.cash_names),
			tournament_names: self.tournament_names.unwrap_or(base.tournament_names),
			cash_variants: self.cash_variants.unwrap_or(base.cash_variants),
			tournament_variants: self.tournament_variants.unwrap_or(base.tournament_variants),
			stakes: self.stakes.unwrap_or(base.stakes),
			entries: self.entries.unwrap_or(base.entries),
			seat_options: self.seat_options.unwrap_or(base.seat_options),
			player_caps: self.player_caps.unwrap_or(base.player_caps),
			currencies: self.currencies.unwrap_or(base.currencies),
			max_distance_miles: self.max_distance_miles.unwrap_or(base.max_distance_miles),
			sponsored_ratio: self.sponsored_ratio.unwrap_or(base.sponsored_ratio),
			live_ratio: self.live_ratio.unwrap_or(base.live_ratio),
		}
	}
}

fn day_schedule_profile<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GenerationProfile, D::Error> {
	Ok(ProfileOverrides::deserialize(deserializer)?.apply(GenerationProfile::day_schedule()))
}

fn arbitrary_profile<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GenerationProfile, D::Error> {
	Ok(ProfileOverrides::deserialize(deserializer)?.apply(GenerationProfile::arbitrary()))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
	/// Share of tournaments when generating an arbitrary count for a date.
	pub tournament_ratio: f64,
	pub default_count: usize,
	#[serde(deserialize_with = "day_schedule_profile")]
	pub day_schedule: GenerationProfile,
	#[serde(deserialize_with = "arbitrary_profile")]
	pub arbitrary: GenerationProfile,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			tournament_ratio: 0.6,
			default_count: 100,
			day_schedule: GenerationProfile::day_schedule(),
			arbitrary: GenerationProfile::arbitrary(),
		}
	}
}

impl GeneratorConfig {
	pub fn validate(&self) -> Result<(), String> {
		if !(0.0..=1.0).contains(&self.tournament_ratio) {
			return Err("generator.tournament_ratio must be between 0 and 1".to_string());
		}
		self.day_schedule.validate("generator.day_schedule")?;
		self.arbitrary.validate("generator.arbitrary")
	}
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PosterStyle {
	pub background_image: String,
	pub overlay_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RowConfig {
	pub ad_interval: usize,
	pub poster_interval: usize,
	pub palette: Vec<PosterStyle>,
}

impl Default for RowConfig {
	fn default() -> Self {
		Self {
			ad_interval: 7,
			poster_interval: 12,
			palette: vec![
				PosterStyle {
					background_image: "posters/felt-green.jpg".to_string(),
					overlay_opacity: 0.55,
				},
				PosterStyle {
					background_image: "posters/chips-stack.jpg".to_string(),
					overlay_opacity: 0.6,
				},
				PosterStyle {
					background_image: "posters/neon-strip.jpg".to_string(),
					overlay_opacity: 0.7,
				},
			],
		}
	}
}

impl RowConfig {
	pub fn validate(&self) -> Result<(), String> {
		if self.ad_interval == 0 || self.poster_interval == 0 {
			return Err("rows: ad_interval and poster_interval must be positive".to_string());
		}
		if self.palette.is_empty() {
			return Err("rows.palette must not be empty".to_string());
		}
		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
	pub page_size: usize,
	pub generator: GeneratorConfig,
	pub rows: RowConfig,
}

impl Default for FinderConfig {
	fn default() -> Self {
		Self {
			page_size: 20,
			generator: GeneratorConfig::default(),
			rows: RowConfig::default(),
		}
	}
}

impl FinderConfig {
	pub fn validate(&self) -> Result<(), String> {
		if self.page_size == 0 {
			return Err("page_size must be positive".to_string());
		}
		self.generator.validate()?;
		self.rows.validate()
	}
}

pub fn parse_finder_config(content: &str) -> Result<FinderConfig, String> {
	let config: FinderConfig = toml::from_str(content)
		.map_err(|e| format!("Failed to parse finder config: {}", e))?;
	config.validate()?;
	Ok(config)
}

pub fn load_finder_config<P: AsRef<Path>>(path: P) -> Result<FinderConfig, String> {
	let content = fs::read_to_string(&path)
		.map_err(|e| format!("Failed to read {}: {}", path.as_ref().display(), e))?;
	parse_finder_config(&content)
}

/// User or working-directory `finder.toml`, then the embedded copy.
pub fn load_finder_config_auto() -> Result<FinderConfig, String> {
	if let Some(path) = find_config("finder.toml") {
		logging::config::loaded(&path.display().to_string());
		return load_finder_config(&path);
	}
	match defaults::embedded("finder.toml") {
		Some(content) => {
			logging::config::loaded("embedded finder.toml");
			parse_finder_config(content)
		}
		None => Ok(FinderConfig::default()),
	}
}

#[derive(Debug, Clone, Deserialize)]
struct StaticTablesFile {
	#[serde(default)]
	tables: Vec<ExtendedTableDetails>,
}

pub fn parse_static_tables(content: &str) -> Result<Vec<ExtendedTableDetails>, String> {
	let file: StaticTablesFile = toml::from_str(content)
		.map_err(|e| format!("Failed to parse tables config: {}", e))?;
	Ok(file.tables)
}

pub fn load_static_tables<P: AsRef<Path>>(path: P) -> Result<Vec<ExtendedTableDetails>, String> {
	let content = fs::read_to_string(&path)
		.map_err(|e| format!("Failed to read {}: {}", path.as_ref().display(), e))?;
	parse_static_tables(&content)
}

pub fn load_static_tables_auto() -> Result<Vec<ExtendedTableDetails>, String> {
	if let Some(path) = find_config("tables.toml") {
		logging::config::loaded(&path.display().to_string());
		return load_static_tables(&path);
	}
	match defaults::embedded("tables.toml") {
		Some(content) => parse_static_tables(content),
		None => Ok(Vec::new()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_config_is_valid() {
		assert!(FinderConfig::default().validate().is_ok());
	}

	#[test]
	fn test_default_ratios() {
		let config = GeneratorConfig::default();
		assert_eq!(config.tournament_ratio, 0.6);
		assert_eq!(config.default_count, 100);
	}

	#[test]
	fn test_partial_config_keeps_defaults() {
		let config = parse_finder_config("page_size = 5\n[rows]\nad_interval = 3\n").unwrap();
		assert_eq!(config.page_size, 5);
		assert_eq!(config.rows.ad_interval, 3);
		assert_eq!(config.rows.poster_interval, 12);
		assert_eq!(config.generator, GeneratorConfig::default());
	}

	#[test]
	fn test_partial_profile_keeps_mode_defaults() {
		let content = "[generator.day_schedule]\nvenues = [\"Home Game\"]\n\n[generator.arbitrary]\nlive_ratio = 0.5\n";
		let config = parse_finder_config(content).unwrap();
		let day = &config.generator.day_schedule;
		assert_eq!(day.venues, vec!["Home Game".to_string()]);
		assert_eq!(day.stakes, GenerationProfile::day_schedule().stakes);
		assert_eq!(day.live_ratio, 0.3);

		let arbitrary = &config.generator.arbitrary;
		assert_eq!(arbitrary.live_ratio, 0.5);
		assert_eq!(arbitrary.venues, GenerationProfile::arbitrary().venues);
		assert_eq!(arbitrary.currencies.len(), 3);
	}

	#[test]
	fn test_tournament_ratio_override() {
		let config = parse_finder_config("[generator]\ntournament_ratio = 0.3\n").unwrap();
		assert_eq!(config.generator.tournament_ratio, 0.3);
		assert_eq!(config.generator.default_count, 100);
	}

	#[test]
	fn test_rejects_inverted_band() {
		let mut config = GeneratorConfig::default();
		config.day_schedule.stakes[0].buy_in_min = 500.0;
		let err = config.validate().unwrap_err();
		assert!(err.contains("day_schedule"));
	}

	#[test]
	fn test_rejects_empty_lists() {
		let mut config = GeneratorConfig::default();
		config.arbitrary.venues.clear();
		assert!(config.validate().unwrap_err().contains("venues"));
	}

	#[test]
	fn test_rejects_bad_ratio() {
		let result = parse_finder_config("[generator]\ntournament_ratio = 1.5\n");
		assert!(result.is_err());
	}

	#[test]
	fn test_rejects_zero_interval() {
		let result = parse_finder_config("[rows]\nad_interval = 0\n");
		assert!(result.is_err());
	}

	#[test]
	fn test_embedded_config_parses() {
		let content = defaults::embedded("finder.toml").unwrap();
		let config = parse_finder_config(content).unwrap();
		assert_eq!(config, FinderConfig::default());
	}

	#[test]
	fn test_embedded_tables_parse() {
		let content = defaults::embedded("tables.toml").unwrap();
		let tables = parse_static_tables(content).unwrap();
		assert!(!tables.is_empty());
		for details in tables {
			assert!(!details.table.id.is_empty());
			assert!(!details.table.name.is_empty());
		}
	}

	#[test]
	fn test_missing_config_path_message() {
		let err = resolve_config("does-not-exist.toml").unwrap_err();
		assert!(err.contains("does-not-exist.toml"));
	}
}
