use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;

struct LogState {
	file: Option<std::fs::File>,
	current_date: String,
	session: String,
	enabled: bool,
}

static LOG_STATE: Mutex<LogState> = Mutex::new(LogState {
	file: None,
	current_date: String::new(),
	session: String::new(),
	enabled: false,
});

fn log_dir() -> PathBuf {
	std::env::var_os("POKER_FINDER_LOG_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| PathBuf::from("logs"))
}

fn today() -> String {
	Local::now().format("%Y-%m-%d").to_string()
}

fn timestamp() -> String {
	Local::now().format("%H:%M:%S%.3f").to_string()
}

fn ensure_log_file(state: &mut LogState) {
	let date = today();
	if state.current_date != date || state.file.is_none() {
		let dir = log_dir();
		let _ = fs::create_dir_all(&dir);
		let path = dir.join(format!("finder-{}.log", date));
		if let Ok(file) = OpenOptions::new()
			.create(true)
			.append(true)
			.open(&path)
		{
			state.file = Some(file);
			state.current_date = date;
		}
	}
}

/// Turns file logging on. Until a session is set, `log` writes nothing, so
/// library callers and tests leave no log files behind.
pub fn set_session(session: &str) {
	if let Ok(mut state) = LOG_STATE.lock() {
		state.session = session.to_string();
		state.enabled = true;
	}
}

pub fn is_enabled() -> bool {
	LOG_STATE.lock().map(|state| state.enabled).unwrap_or(false)
}

pub fn log(module: &str, log_type: &str, message: &str) {
	if let Ok(mut state) = LOG_STATE.lock() {
		if !state.enabled {
			return;
		}
		ensure_log_file(&mut state);

		let session = if state.session.is_empty() { "--------" } else { state.session.as_str() };
		let line = format!(
			"[{}][{}][{}:{}] {}\n",
			timestamp(),
			session,
			module,
			log_type,
			message
		);

		if let Some(ref mut file) = state.file {
			let _ = file.write_all(line.as_bytes());
			let _ = file.flush();
		}
	}
}

pub mod generator {
	use super::log;

	pub fn invalid_date(mode: &str, date: &str) {
		log("Generator", "WARN", &format!("{}: invalid date {}, returning no tables", mode, date));
	}

}

pub mod store {
	use super::log;

	pub fn synthesized(id: &str, table_type: &str) {
		log("Store", "SYNTH", &format!("{} ({})", id, table_type));
	}

	pub fn miss(id: &str) {
		log("Store", "MISS", id);
	}

	pub fn loaded(count: usize) {
		log("Store", "LOAD", &format!("{} static tables", count));
	}
}

pub mod config {
	use super::log;

	pub fn loaded(source: &str) {
		log("Config", "LOAD", source);
	}

	pub fn error(msg: &str) {
		log("Config", "ERROR", msg);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_log_is_silent_without_session() {
		assert!(!is_enabled());
		generator::invalid_date("day-schedule", "+10000-01-01");
		store::miss("nonexistent");
		let state = LOG_STATE.lock().unwrap();
		assert!(state.file.is_none());
		assert!(state.current_date.is_empty());
	}
}
