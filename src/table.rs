use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
	Cash,
	Tournament,
}

impl TableType {
	pub fn as_str(&self) -> &'static str {
		match self {
			TableType::Cash => "cash",
			TableType::Tournament => "tournament",
		}
	}

	pub fn from_name(name: &str) -> Option<TableType> {
		match name.to_lowercase().as_str() {
			"cash" => Some(TableType::Cash),
			"tournament" => Some(TableType::Tournament),
			_ => None,
		}
	}
}

impl fmt::Display for TableType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TableType::Cash => write!(f, "Cash"),
			TableType::Tournament => write!(f, "Tournament"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
	#[serde(rename = "$")]
	Dollar,
	#[serde(rename = "€")]
	Euro,
	#[serde(rename = "£")]
	Pound,
}

impl Currency {
	pub const ALL: [Currency; 3] = [Currency::Dollar, Currency::Euro, Currency::Pound];

	pub fn symbol(&self) -> &'static str {
		match self {
			Currency::Dollar => "$",
			Currency::Euro => "€",
			Currency::Pound => "£",
		}
	}

	/// Accepts the symbol or its ISO code (`usd`, `eur`, `gbp`).
	pub fn from_name(s: &str) -> Option<Currency> {
		match s.trim().to_lowercase().as_str() {
			"$" | "usd" => Some(Currency::Dollar),
			"€" | "eur" => Some(Currency::Euro),
			"£" | "gbp" => Some(Currency::Pound),
			_ => None,
		}
	}

	/// Currency of a stakes label such as `€1/€2` or `£100+£20`.
	pub fn of_stakes(stakes: &str) -> Option<Currency> {
		let stakes = stakes.trim_start();
		Self::ALL.into_iter().find(|c| stakes.starts_with(c.symbol()))
	}
}

impl fmt::Display for Currency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.symbol())
	}
}

/// Capacity and economics, discriminated by the `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TableFormat {
	Cash {
		total_seats: u32,
		seated_count: u32,
		buy_in_min: f64,
		buy_in_max: f64,
	},
	Tournament {
		player_cap: u32,
		players_registered: u32,
		entry: f64,
		fee: f64,
	},
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
	pub id: String,
	pub name: String,
	pub game_type: String,
	pub stakes: String,
	pub venue: String,
	pub distance_miles: f64,
	pub start_time_iso: String,
	pub currency: Currency,
	#[serde(default)]
	pub is_sponsored: bool,
	#[serde(default)]
	pub is_live: bool,
	#[serde(flatten)]
	pub format: TableFormat,
}

impl TableRecord {
	pub fn table_type(&self) -> TableType {
		match self.format {
			TableFormat::Cash { .. } => TableType::Cash,
			TableFormat::Tournament { .. } => TableType::Tournament,
		}
	}

	pub fn is_cash(&self) -> bool {
		matches!(self.format, TableFormat::Cash { .. })
	}

	pub fn is_tournament(&self) -> bool {
		matches!(self.format, TableFormat::Tournament { .. })
	}

	pub fn min_buy_in(&self) -> f64 {
		match self.format {
			TableFormat::Cash { buy_in_min, .. } => buy_in_min,
			TableFormat::Tournament { entry, fee, .. } => entry + fee,
		}
	}

	pub fn max_buy_in(&self) -> f64 {
		match self.format {
			TableFormat::Cash { buy_in_max, .. } => buy_in_max,
			TableFormat::Tournament { entry, fee, .. } => entry + fee,
		}
	}

	pub fn start_time(&self) -> Option<DateTime<Utc>> {
		DateTime::parse_from_rfc3339(&self.start_time_iso)
			.ok()
			.map(|t| t.with_timezone(&Utc))
	}

	pub fn seats_label(&self) -> String {
		match self.format {
			TableFormat::Cash { total_seats, seated_count, .. } => {
				format!("{}/{} seated", seated_count, total_seats)
			}
			TableFormat::Tournament { player_cap, players_registered, .. } => {
				format!("{}/{} registered", players_registered, player_cap)
			}
		}
	}

	pub fn summary(&self) -> String {
		let c = self.currency.symbol();
		match self.format {
			TableFormat::Cash { buy_in_min, buy_in_max, .. } => {
				format!("{} {} {}{:.0}-{}{:.0}", self.game_type, self.stakes, c, buy_in_min, c, buy_in_max)
			}
			TableFormat::Tournament { entry, fee, .. } => {
				format!("{} {}{:.0}+{}{:.0}", self.game_type, c, entry, c, fee)
			}
		}
	}
}

/// Segment naming the generation mode inside a generated table ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
	Cash,
	Tournament,
	Game,
}

impl IdKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			IdKind::Cash => "cash",
			IdKind::Tournament => "tournament",
			IdKind::Game => "game",
		}
	}

	pub fn from_name(name: &str) -> Option<IdKind> {
		match name {
			"cash" => Some(IdKind::Cash),
			"tournament" => Some(IdKind::Tournament),
			"game" => Some(IdKind::Game),
			_ => None,
		}
	}

	pub fn table_type(&self) -> Option<TableType> {
		match self {
			IdKind::Cash => Some(TableType::Cash),
			IdKind::Tournament => Some(TableType::Tournament),
			IdKind::Game => None,
		}
	}
}

impl From<TableType> for IdKind {
	fn from(table_type: TableType) -> Self {
		match table_type {
			TableType::Cash => IdKind::Cash,
			TableType::Tournament => IdKind::Tournament,
		}
	}
}

/// `{YYYY-MM-DD}-{kind}-{index}`, stable for a given (date, mode, index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeneratedId {
	pub date: NaiveDate,
	pub kind: IdKind,
	pub index: usize,
}

impl GeneratedId {
	pub fn new(date: NaiveDate, kind: IdKind, index: usize) -> Self {
		Self { date, kind, index }
	}

	pub fn parse(id: &str) -> Option<GeneratedId> {
		let mut parts = id.rsplitn(3, '-');
		let index = parts.next()?.parse::<usize>().ok()?;
		let kind = IdKind::from_name(parts.next()?)?;
		let date = parts.next()?;
		if date.len() != 10 {
			return None;
		}
		let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
		Some(GeneratedId { date, kind, index })
	}
}

impl fmt::Display for GeneratedId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}-{}", self.date.format("%Y-%m-%d"), self.kind.as_str(), self.index)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlindLevel {
	pub level: u32,
	pub small: f64,
	pub big: f64,
	#[serde(default)]
	pub ante: f64,
	pub minutes: u32,
}

pub fn calculate_payouts(prize_pool: f64, payout_percentages: &[f64]) -> Vec<f64> {
	payout_percentages.iter().map(|p| prize_pool * p).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cash_record() -> TableRecord {
		TableRecord {
			id: "2025-06-01-cash-0".to_string(),
			name: "Main Room".to_string(),
			game_type: "NLH".to_string(),
			stakes: "$1/$2".to_string(),
			venue: "Bellagio".to_string(),
			distance_miles: 2.5,
			start_time_iso: "2025-06-01T10:00:00.000Z".to_string(),
			currency: Currency::Dollar,
			is_sponsored: false,
			is_live: true,
			format: TableFormat::Cash {
				total_seats: 9,
				seated_count: 4,
				buy_in_min: 100.0,
				buy_in_max: 300.0,
			},
		}
	}

	fn tournament_record() -> TableRecord {
		TableRecord {
			id: "2025-06-01-tournament-7".to_string(),
			format: TableFormat::Tournament {
				player_cap: 60,
				players_registered: 12,
				entry: 100.0,
				fee: 20.0,
			},
			..cash_record()
		}
	}

	#[test]
	fn test_type_guards() {
		assert!(cash_record().is_cash());
		assert!(!cash_record().is_tournament());
		assert!(tournament_record().is_tournament());
		assert_eq!(tournament_record().table_type(), TableType::Tournament);
	}

	#[test]
	fn test_effective_buy_ins() {
		let cash = cash_record();
		assert_eq!(cash.min_buy_in(), 100.0);
		assert_eq!(cash.max_buy_in(), 300.0);

		let tournament = tournament_record();
		assert_eq!(tournament.min_buy_in(), 120.0);
		assert_eq!(tournament.max_buy_in(), 120.0);
	}

	#[test]
	fn test_start_time_parses() {
		assert!(cash_record().start_time().is_some());
		let broken = TableRecord {
			start_time_iso: "not a date".to_string(),
			..cash_record()
		};
		assert!(broken.start_time().is_none());
	}

	#[test]
	fn test_serializes_with_type_tag() {
		let json = serde_json::to_value(cash_record()).unwrap();
		assert_eq!(json["type"], "cash");
		assert_eq!(json["total_seats"], 9);
		assert_eq!(json["currency"], "$");

		let back: TableRecord = serde_json::from_value(json).unwrap();
		assert_eq!(back, cash_record());
	}

	#[test]
	fn test_generated_id_display_and_parse() {
		let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
		let id = GeneratedId::new(date, IdKind::Cash, 3);
		assert_eq!(id.to_string(), "2025-06-01-cash-3");
		assert_eq!(GeneratedId::parse("2025-06-01-cash-3"), Some(id));

		let game = GeneratedId::parse("2025-12-31-game-42").unwrap();
		assert_eq!(game.kind, IdKind::Game);
		assert_eq!(game.index, 42);
	}

	#[test]
	fn test_generated_id_rejects_other_shapes() {
		assert_eq!(GeneratedId::parse("nonexistent"), None);
		assert_eq!(GeneratedId::parse("bellagio-nlh-2-5"), None);
		assert_eq!(GeneratedId::parse("2025-06-01-poker-3"), None);
		assert_eq!(GeneratedId::parse("2025-13-01-cash-3"), None);
		assert_eq!(GeneratedId::parse("2025-06-01-cash-x"), None);
	}

	#[test]
	fn test_table_type_display() {
		assert_eq!(format!("{}", TableType::Cash), "Cash");
		assert_eq!(TableType::from_name("Tournament"), Some(TableType::Tournament));
		assert_eq!(TableType::from_name("sng"), None);
	}

	#[test]
	fn test_currency_names() {
		assert_eq!(Currency::from_name("€"), Some(Currency::Euro));
		assert_eq!(Currency::from_name("GBP"), Some(Currency::Pound));
		assert_eq!(Currency::from_name("yen"), None);
		assert_eq!(Currency::of_stakes("€20+€5"), Some(Currency::Euro));
		assert_eq!(Currency::of_stakes("£1/£2"), Some(Currency::Pound));
		assert_eq!(Currency::of_stakes("1/2"), None);
	}

	#[test]
	fn test_summary() {
		assert_eq!(cash_record().summary(), "NLH $1/$2 $100-$300");
		assert_eq!(tournament_record().summary(), "NLH $100+$20");
		assert_eq!(tournament_record().seats_label(), "12/60 registered");
	}

	#[test]
	fn test_payouts() {
		let payouts = calculate_payouts(1000.0, &[0.5, 0.3, 0.2]);
		assert_eq!(payouts.len(), 3);
		assert!((payouts[0] - 500.0).abs() < 0.01);
		assert!((payouts[2] - 200.0).abs() < 0.01);
	}
}
