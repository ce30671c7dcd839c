use std::path::Path;

use receipt_splitter::{ExtractedFields, PageNamer, ReceiptDocument};

use crate::cli::OutputFormat;
use crate::shared::{load_config, open_pdf, resolve_pages};

fn fields_to_json(
    page: usize,
    fields: &ExtractedFields,
    name: &Result<String, String>,
) -> serde_json::Value {
    let mut json = serde_json::json!({
        "page": page,
        "value": fields.value,
        "values": fields.values,
        "recipient": fields.recipient,
        "bank": fields.bank,
    });
    match name {
        Ok(name) => json["name"] = serde_json::json!(name),
        Err(error) => json["error"] = serde_json::json!(error),
    }
    json
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub fn run(
    config_path: Option<&Path>,
    file: &Path,
    pages: Option<&str>,
    template: Option<&str>,
    format: &OutputFormat,
) -> Result<(), i32> {
    let mut config = load_config(config_path)?;
    if let Some(template) = template {
        config.folder.output_filename = template.to_string();
    }
    let namer = PageNamer::from_config(&config).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let doc = open_pdf(file)?;
    let page_indices = resolve_pages(pages, doc.page_count())?;

    let mut pages_json = Vec::new();
    for &idx in &page_indices {
        let text = doc.page_text(idx).map_err(|e| {
            eprintln!("Error reading page {}: {e}", idx + 1);
            1
        })?;
        let fields = namer.fields(&text);
        let name = namer.base_name(&fields).map_err(|e| e.to_string());

        match format {
            OutputFormat::Text => {
                println!("Page {}:", idx + 1);
                println!("  Value:     {}", or_dash(fields.value.as_deref()));
                if fields.values.len() > 1 {
                    println!("  All values: {}", fields.values.join(", "));
                }
                println!("  Recipient: {}", or_dash(fields.recipient.as_deref()));
                println!("  Bank:      {}", or_dash(fields.bank.as_deref()));
                match &name {
                    Ok(name) => println!("  Name:      {name}"),
                    Err(error) => println!("  Error:     {error}"),
                }
            }
            OutputFormat::Json => pages_json.push(fields_to_json(idx + 1, &fields, &name)),
        }
    }

    if *format == OutputFormat::Json {
        let out = serde_json::json!({
            "file": file.display().to_string(),
            "page_count": doc.page_count(),
            "pages": pages_json,
        });
        println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
    }

    Ok(())
}
