//! Read and validate a package manifest.
//!
//! ```text
//! cargo run --example parse_manifest -- path/to/package.json
//! ```
//!
//! Every step returns an outcome; the file read and JSON decoding are wrapped
//! at the boundary, and the process exit code is set from the final failure.

use outcomes::json::JsonSchema;
use outcomes::prelude::*;
use serde::Deserialize;
use serde_json::{json, Value};
use std::process::ExitCode;

#[derive(Debug, Deserialize)]
struct Manifest {
    name: String,
    version: Option<String>,
}

#[derive(Debug, thiserror::Error)]
enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to parse manifest: {0}")]
    Parse(String),
}

fn manifest_schema() -> Result<JsonSchema, outcomes::SchemaError> {
    JsonSchema::compile(&json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "version": { "type": "string" }
        },
        "required": ["name"]
    }))
}

fn decode(raw: String, schema: &outcomes::json::Typed<Manifest>) -> Outcome<Manifest, ManifestError> {
    attempt(|| serde_json::from_str::<Value>(&raw))
        .catch(|e: serde_json::Error| ManifestError::Parse(e.to_string()))
        .run()
        .and_then(|doc| {
            parse(schema, doc).map_error(|issues| {
                let rendered: Vec<String> = issues.iter().map(ToString::to_string).collect();
                ManifestError::Parse(rendered.join("; "))
            })
        })
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "package.json".to_string());
    let schema = match manifest_schema() {
        Ok(schema) => schema.typed::<Manifest>(),
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let read_file = attempt(|path: String| async move {
        let read = tokio::fs::read_to_string(&path).await;
        read.map_err(|source| (path, source))
    })
    .catch(|(path, source): (String, std::io::Error)| ManifestError::Read { path, source })
    .into_deferred_fn();

    let outcome = pipe!(
        read_file(path),
        |read: Deferred<'static, String, ManifestError>| read
            .and_then(move |raw| decode(raw, &schema)),
        |decoded: Deferred<'static, Manifest, ManifestError>| decoded.inspect(|manifest| {
            println!("Package name: {}", manifest.name);
            println!("Package version: {}", manifest.version.as_deref().unwrap_or("N/A"));
        }),
    )
    .await;

    match outcome {
        Outcome::Success { .. } => ExitCode::SUCCESS,
        Outcome::Failure { error } => {
            match &error {
                ManifestError::Read { .. } => println!(
                    "Failed to read the manifest. Please ensure the file exists and is accessible."
                ),
                ManifestError::Parse(_) => println!(
                    "Failed to parse the manifest. Please ensure the file contains valid JSON."
                ),
            }
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
