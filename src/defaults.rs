use include_dir::{include_dir, Dir};
use std::fs;
use std::path::Path;

static CONFIG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/config");

pub fn embedded(filename: &str) -> Option<&'static str> {
	CONFIG_DIR.get_file(filename).and_then(|f| f.contents_utf8())
}

/// Copies the built-in config files into the user config directory,
/// leaving files that already exist untouched.
pub fn ensure_config() {
	let Some(user_config) = dirs::config_dir() else {
		return;
	};
	let dest = user_config.join("poker-finder");

	extract_dir(&CONFIG_DIR, &dest);
}

fn extract_dir(dir: &Dir, dest: &Path) {
	for file in dir.files() {
		let file_dest = dest.join(file.path());
		if !file_dest.exists() {
			if let Some(parent) = file_dest.parent() {
				let _ = fs::create_dir_all(parent);
			}
			let _ = fs::write(&file_dest, file.contents());
		}
	}

	for subdir in dir.dirs() {
		extract_dir(subdir, dest);
	}
}

pub fn list_embedded() -> Vec<String> {
	let mut names: Vec<String> = CONFIG_DIR
		.files()
		.filter_map(|f| f.path().file_name())
		.map(|n| n.to_string_lossy().to_string())
		.collect();
	names.sort();
	names
}
