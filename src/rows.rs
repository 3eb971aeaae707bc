use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{PosterStyle, RowConfig};
use crate::table::TableRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdRow {
	pub id: String,
	/// 1-based position of this ad among the ads in the list.
	pub slot: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SponsoredTablePosterRow {
	pub id: String,
	pub table: TableRecord,
	pub background_image: String,
	pub overlay_opacity: f64,
}

/// Display-only list entry. Only `Row::Table` counts as a shown table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Row {
	Table(TableRecord),
	Ad(AdRow),
	SponsoredTablePoster(SponsoredTablePosterRow),
}

impl Row {
	pub fn kind(&self) -> &'static str {
		match self {
			Row::Table(_) => "table",
			Row::Ad(_) => "ad",
			Row::SponsoredTablePoster(_) => "sponsored-table-poster",
		}
	}

	pub fn is_table(&self) -> bool {
		matches!(self, Row::Table(_))
	}

	pub fn as_table(&self) -> Option<&TableRecord> {
		match self {
			Row::Table(table) => Some(table),
			_ => None,
		}
	}

	pub fn key(&self) -> &str {
		match self {
			Row::Table(table) => &table.id,
			Row::Ad(ad) => &ad.id,
			Row::SponsoredTablePoster(poster) => &poster.id,
		}
	}
}

pub fn count_tables(rows: &[Row]) -> usize {
	rows.iter().filter(|r| r.is_table()).count()
}

pub struct RowBuilder {
	config: RowConfig,
}

impl Default for RowBuilder {
	fn default() -> Self {
		Self {
			config: RowConfig::default(),
		}
	}
}

impl RowBuilder {
	pub fn new(config: RowConfig) -> Result<Self, String> {
		config.validate()?;
		Ok(Self { config })
	}

	pub fn build(&self, tables: &[TableRecord]) -> Vec<Row> {
		let mut rng = rand::rng();
		let millis = Utc::now().timestamp_millis();
		let mut rows = Vec::with_capacity(tables.len() + tables.len() / self.config.ad_interval + 1);
		let mut ads = 0;
		let mut posters = 0;

		for (i, table) in tables.iter().enumerate() {
			rows.push(Row::Table(table.clone()));
			let position = i + 1;

			if position % self.config.ad_interval == 0 {
				ads += 1;
				rows.push(Row::Ad(AdRow {
					id: row_id("ad", i, millis, &mut rng),
					slot: ads,
				}));
			}

			if position % self.config.poster_interval == 0 && table.is_sponsored {
				let style = self.style(posters);
				posters += 1;
				rows.push(Row::SponsoredTablePoster(SponsoredTablePosterRow {
					id: row_id("poster", i, millis, &mut rng),
					table: table.clone(),
					background_image: style.background_image.clone(),
					overlay_opacity: style.overlay_opacity,
				}));
			}
		}

		rows
	}

	fn style(&self, n: usize) -> &PosterStyle {
		&self.config.palette[n % self.config.palette.len()]
	}
}

fn row_id(prefix: &str, index: usize, millis: i64, rng: &mut impl Rng) -> String {
	let suffix: u32 = rng.random_range(0..0x100_0000);
	format!("{}-{}-{}-{:06x}", prefix, index, millis, suffix)
}

pub fn generate_rows_with_ads(tables: &[TableRecord]) -> Vec<Row> {
	RowBuilder::default().build(tables)
}
