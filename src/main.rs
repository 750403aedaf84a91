use recipe_ingredients::{ErrorBody, IngredientExtractor};
use serde_json::json;
use std::env;
use std::process::ExitCode;

const USAGE: &str = "Usage: recipe-ingredients [--text] <url>...";

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();

    let mut text_output = false;
    let mut urls = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--text" => text_output = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(ExitCode::SUCCESS);
            }
            _ => urls.push(arg),
        }
    }
    if urls.is_empty() {
        eprintln!("{USAGE}");
        return Ok(ExitCode::from(2));
    }

    let extractor = IngredientExtractor::from_env()?;
    let results = extractor.extract_all(urls).await;
    let mut failed = false;

    for entry in results {
        match entry.result {
            Ok(rows) if text_output => {
                println!("# {}", entry.url);
                for row in rows {
                    println!("{}\t{}", row.ingredient, row.amount);
                }
            }
            Ok(rows) => {
                println!(
                    "{}",
                    json!({ "url": entry.url, "status": 200, "ingredients": rows })
                );
            }
            Err(err) => {
                failed = true;
                if text_output {
                    eprintln!("# {}: {}", entry.url, err.user_message());
                } else {
                    println!(
                        "{}",
                        json!({
                            "url": entry.url,
                            "status": err.status_code(),
                            "kind": err.kind(),
                            "body": ErrorBody::from(&err),
                        })
                    );
                }
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
