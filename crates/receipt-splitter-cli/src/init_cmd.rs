use std::path::Path;

use receipt_splitter::{Config, DEFAULT_CONFIG_FILE};

pub fn run(path: Option<&Path>, force: bool) -> Result<(), i32> {
    let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    Config::write_default(path, force).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    println!("Wrote {}", path.display());
    Ok(())
}
