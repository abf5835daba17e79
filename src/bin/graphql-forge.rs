//! generate a typed graphql client from a schema
//!
//! the `generate` action drives the library's [`Generator`] against an sdl
//! file; the `introspect` action fetches sdl text from an endpoint so it
//! can be generated from afterwards.
//!
//! command help reference (kept in sync with `graphql-forge --help`):
#[doc = concat!("```text\n", include_str!("graphql-forge-help.txt"), "\n```")]
pub const CLI_HELP: &str = include_str!("graphql-forge-help.txt");

use graphql_forge::{GenerationConfig, Generator};
use reqwest::blocking::Client as BlockingClient;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug)]
struct GenerateArgs {
    schema: PathBuf,
    package: String,
    out: PathBuf,
    scalars: Vec<(String, String)>,
    type_suffix: Option<String>,
    input_suffix: Option<String>,
    builders: bool,
}

#[derive(Debug)]
struct IntrospectArgs {
    endpoint: String,
    headers: Vec<(String, String)>,
    out: PathBuf,
    timeout: Duration,
}

#[derive(Debug)]
enum Action {
    Generate(GenerateArgs),
    Introspect(IntrospectArgs),
}

enum ParseArgsError {
    Help,
    Message(String),
}

fn main() {
    let action = match parse_args(std::env::args().collect()) {
        Ok(action) => action,
        Err(ParseArgsError::Help) => {
            print!("{CLI_HELP}");
            return;
        }
        Err(ParseArgsError::Message(err)) => {
            eprintln!("{err}\n\n{CLI_HELP}");
            std::process::exit(1);
        }
    };

    let outcome = match action {
        Action::Generate(args) => run_generate(args),
        Action::Introspect(args) => run_introspect(args),
    };

    if let Err(err) = outcome {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn parse_args(args: Vec<String>) -> Result<Action, ParseArgsError> {
    let mut iter = args.into_iter().skip(1);
    let action = match iter.next().as_deref() {
        Some("generate") => "generate",
        Some("introspect") => "introspect",
        Some("--help") | Some("-h") | None => return Err(ParseArgsError::Help),
        Some(other) => {
            return Err(ParseArgsError::Message(format!("unknown action: {other}")))
        }
    };

    let mut schema = None;
    let mut package = None;
    let mut out = None;
    let mut scalars = Vec::new();
    let mut type_suffix = None;
    let mut input_suffix = None;
    let mut builders = true;
    let mut endpoint = None;
    let mut headers = Vec::new();
    let mut timeout = Duration::from_secs(30);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--schema" => schema = iter.next().map(PathBuf::from),
            "--package" => package = iter.next(),
            "--out" => out = iter.next().map(PathBuf::from),
            "--scalar" => {
                let entry = iter
                    .next()
                    .ok_or_else(|| ParseArgsError::Message("--scalar needs NAME=TYPE".into()))?;
                let (name, rust_type) = entry.split_once('=').ok_or_else(|| {
                    ParseArgsError::Message(format!("invalid scalar mapping: {entry}"))
                })?;
                scalars.push((name.to_string(), rust_type.to_string()));
            }
            "--type-suffix" => type_suffix = iter.next(),
            "--input-suffix" => input_suffix = iter.next(),
            "--no-builders" => builders = false,
            "--endpoint" => endpoint = iter.next(),
            "--header" => {
                let entry = iter
                    .next()
                    .ok_or_else(|| ParseArgsError::Message("--header needs NAME: VALUE".into()))?;
                let (name, value) = entry.split_once(':').ok_or_else(|| {
                    ParseArgsError::Message(format!("invalid header: {entry}"))
                })?;
                headers.push((name.trim().to_string(), value.trim().to_string()));
            }
            "--timeout" => {
                let secs = iter
                    .next()
                    .and_then(|value| value.parse::<u64>().ok())
                    .ok_or_else(|| ParseArgsError::Message("--timeout needs seconds".into()))?;
                timeout = Duration::from_secs(secs);
            }
            "--help" | "-h" => return Err(ParseArgsError::Help),
            _ => return Err(ParseArgsError::Message(format!("unknown argument: {arg}"))),
        }
    }

    match action {
        "generate" => {
            let schema = schema
                .ok_or_else(|| ParseArgsError::Message("--schema is required".to_string()))?;
            let package = package
                .ok_or_else(|| ParseArgsError::Message("--package is required".to_string()))?;
            let out =
                out.ok_or_else(|| ParseArgsError::Message("--out is required".to_string()))?;
            Ok(Action::Generate(GenerateArgs {
                schema,
                package,
                out,
                scalars,
                type_suffix,
                input_suffix,
                builders,
            }))
        }
        _ => {
            let endpoint = endpoint
                .ok_or_else(|| ParseArgsError::Message("--endpoint is required".to_string()))?;
            let out =
                out.ok_or_else(|| ParseArgsError::Message("--out is required".to_string()))?;
            Ok(Action::Introspect(IntrospectArgs {
                endpoint,
                headers,
                out,
                timeout,
            }))
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let mut config = GenerationConfig::new(&args.package, &args.out, &args.schema);
    for (name, rust_type) in args.scalars {
        config = config.with_scalar(name, rust_type);
    }
    if let Some(suffix) = args.type_suffix {
        config = config.with_type_suffix(suffix);
    }
    if let Some(suffix) = args.input_suffix {
        config = config.with_input_suffix(suffix);
    }
    config = config.with_builders(args.builders);

    let mut generator = Generator::new(config).map_err(|err| err.to_string())?;
    let result = generator.run().map_err(|err| format!("codegen failed: {err}"))?;
    println!(
        "generated {} files under {}",
        result.files_written(),
        result.output_root().display()
    );
    Ok(())
}

fn run_introspect(args: IntrospectArgs) -> Result<(), String> {
    let mut headers = HeaderMap::new();
    for (name, value) in &args.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| format!("invalid header name {name}: {err}"))?;
        let value =
            HeaderValue::from_str(value).map_err(|err| format!("invalid header value: {err}"))?;
        headers.insert(name, value);
    }

    let client = BlockingClient::builder()
        .timeout(args.timeout)
        .build()
        .map_err(|err| err.to_string())?;
    let response = client
        .get(&args.endpoint)
        .headers(headers)
        .send()
        .map_err(|err| format!("failed to fetch schema: {err}"))?;

    if !response.status().is_success() {
        return Err(format!("schema fetch returned {}", response.status()));
    }

    let sdl = response
        .text()
        .map_err(|err| format!("failed to read schema response: {err}"))?;
    fs::write(&args.out, sdl)
        .map_err(|err| format!("failed to write {}: {err}", args.out.display()))?;
    println!("wrote {}", args.out.display());
    Ok(())
}
