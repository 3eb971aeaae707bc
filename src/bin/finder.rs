use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use poker_finder::config::{load_finder_config_auto, FinderConfig};
use poker_finder::defaults;
use poker_finder::filter::{filter_and_sort_tables, paginate, BuyinRange, GameTypeFilter, SortBy, TableFilters, TableSize};
use poker_finder::generator::{parse_schedule_date, TableGenerator};
use poker_finder::logging;
use poker_finder::rows::{count_tables, RowBuilder};
use poker_finder::store::{DetailHints, TableDetailStore};
use poker_finder::table::{Currency, TableType};
use poker_finder::week::summarize_week;

#[derive(Parser)]
#[command(name = "finder")]
#[command(about = "Browse generated poker table listings")]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// The ten-table schedule for one day
	Schedule {
		#[arg(short, long, value_parser = parse_schedule_date)]
		date: Option<NaiveDate>,
		#[command(flatten)]
		filters: FilterArgs,
		#[arg(short, long, default_value_t = 0)]
		page: usize,
	},
	/// An arbitrary number of tables for one day
	Tables {
		#[arg(short, long, value_parser = parse_schedule_date)]
		date: Option<NaiveDate>,
		#[arg(short, long)]
		count: Option<usize>,
		#[command(flatten)]
		filters: FilterArgs,
		#[arg(short, long, default_value_t = 0)]
		page: usize,
	},
	/// Display rows for a day, with ads and sponsor posters mixed in
	Rows {
		#[arg(short, long, value_parser = parse_schedule_date)]
		date: Option<NaiveDate>,
		#[arg(short, long)]
		count: Option<usize>,
		#[command(flatten)]
		filters: FilterArgs,
	},
	/// Per-day counts for the seven days from a start date
	Week {
		#[arg(short, long, value_parser = parse_schedule_date)]
		start: Option<NaiveDate>,
		#[command(flatten)]
		filters: FilterArgs,
	},
	/// Full details for one table ID
	Detail {
		id: String,
		#[arg(long = "type")]
		table_type: Option<String>,
		#[arg(long)]
		name: Option<String>,
		#[arg(long)]
		game_type: Option<String>,
		#[arg(long)]
		stakes: Option<String>,
		#[arg(long)]
		start_time: Option<String>,
		/// `$`, `€`, `£` or usd/eur/gbp
		#[arg(long)]
		currency: Option<String>,
	},
	/// Copy the default config files to the user config directory
	InitConfig,
}

#[derive(Args)]
struct FilterArgs {
	#[arg(short = 'g', long, default_value = "all")]
	game_type: GameTypeFilter,
	#[arg(short = 'v', long = "variant")]
	variants: Vec<String>,
	#[arg(long = "size")]
	sizes: Vec<TableSize>,
	#[arg(long = "buyin")]
	buyin_ranges: Vec<BuyinRange>,
	#[arg(long, default_value = "distance")]
	sort: SortBy,
}

impl FilterArgs {
	fn to_filters(&self) -> TableFilters {
		let filters = TableFilters {
			game_type: self.game_type,
			table_sizes: self.sizes.clone(),
			buyin_ranges: self.buyin_ranges.clone(),
			sort_by: self.sort,
			..TableFilters::default()
		};
		self.variants.iter().fold(filters, |f, v| f.with_variant(v))
	}
}

fn today() -> NaiveDate {
	Local::now().date_naive()
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
	let json = serde_json::to_string_pretty(value)
		.map_err(|e| format!("Failed to serialize output: {}", e))?;
	println!("{}", json);
	Ok(())
}

fn run(cli: Cli, config: FinderConfig) -> Result<(), String> {
	let generator = TableGenerator::new(config.generator.clone())?;

	match cli.command {
		Command::Schedule { date, filters, page } => {
			let tables = generator.day_schedule(date.unwrap_or_else(today));
			let result = filter_and_sort_tables(&tables, &filters.to_filters());
			print_json(&paginate(&result, page, config.page_size))
		}
		Command::Tables { date, count, filters, page } => {
			let tables = generator.tables_for_date(date.unwrap_or_else(today), count);
			let result = filter_and_sort_tables(&tables, &filters.to_filters());
			print_json(&paginate(&result, page, config.page_size))
		}
		Command::Rows { date, count, filters } => {
			let date = date.unwrap_or_else(today);
			let tables = match count {
				Some(count) => generator.tables_for_date(date, Some(count)),
				None => generator.day_schedule(date),
			};
			let result = filter_and_sort_tables(&tables, &filters.to_filters());
			let rows = RowBuilder::new(config.rows.clone())?.build(&result.filtered_tables);
			eprintln!("{} tables shown in {} rows", count_tables(&rows), rows.len());
			print_json(&rows)
		}
		Command::Week { start, filters } => {
			let summary = summarize_week(&generator, start.unwrap_or_else(today), &filters.to_filters());
			print_json(&summary)
		}
		Command::Detail { id, table_type, name, game_type, stakes, start_time, currency } => {
			let hints = DetailHints {
				table_type: table_type.as_deref().and_then(TableType::from_name),
				name,
				game_type,
				stakes,
				start_time,
				currency: currency.as_deref().and_then(Currency::from_name),
			};
			let store = TableDetailStore::load()?;
			match store.get_table_by_id_with_fallback(&id, &hints) {
				Some(details) => {
					eprintln!(
						"{}: {}, {}, {} online",
						details.table.name,
						details.table.summary(),
						details.table.seats_label(),
						details.online_players()
					);
					print_json(&*details)
				}
				None => Err(format!("Table '{}' not found", id)),
			}
		}
		Command::InitConfig => {
			defaults::ensure_config();
			println!("Config files: {}", defaults::list_embedded().join(", "));
			Ok(())
		}
	}
}

fn main() {
	let cli = Cli::parse();
	logging::set_session(&format!("{:08x}", std::process::id()));

	let result = load_finder_config_auto().and_then(|config| run(cli, config));
	if let Err(e) = result {
		logging::log("CLI", "ERROR", &e);
		eprintln!("Error: {}", e);
		std::process::exit(1);
	}
}
