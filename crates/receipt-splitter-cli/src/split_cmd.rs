use std::io;
use std::path::Path;

use receipt_splitter::{Config, LopdfOpener, Pipeline};

use crate::shared::{StatusReporter, load_config, output_next_to};

/// Apply command-line overrides on top of the loaded configuration.
///
/// An explicit input without `--output` writes next to that input, so a
/// configured output folder for a different tree is not reused.
fn apply_overrides(
    mut config: Config,
    input: Option<&Path>,
    output: Option<&Path>,
    template: Option<&str>,
) -> Config {
    if let Some(input) = input {
        config.folder.input_folder = input.to_path_buf();
        config.folder.output_folder = output_next_to(input);
    }
    if let Some(output) = output {
        config.folder.output_folder = output.to_path_buf();
    }
    if let Some(template) = template {
        config.folder.output_filename = template.to_string();
    }
    config
}

pub fn run(
    config_path: Option<&Path>,
    input: Option<&Path>,
    output: Option<&Path>,
    template: Option<&str>,
    quiet: bool,
) -> Result<(), i32> {
    let config = apply_overrides(load_config(config_path)?, input, output, template);

    let mut pipeline = Pipeline::new(&config, LopdfOpener).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    if !quiet {
        println!("{}", config.app.title);
        println!("Input:  {}", config.folder.input_folder.display());
        println!("Output: {}", pipeline.output_dir().display());
        println!();
    }

    let mut reporter = StatusReporter::new(io::stdout().lock(), quiet);
    let summary = pipeline
        .run(&config.folder.input_folder, &mut reporter)
        .map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;
    reporter.summary(&summary);

    if summary.is_complete() { Ok(()) } else { Err(2) }
}
