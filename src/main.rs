// tracepage: render a traceback dump to an HTML fragment

use std::fs;
use std::path::PathBuf;
use std::process;

use tracepage::page::{DebugPage, PageContext, TemplateSet};
use tracepage::render::FormatOptions;
use tracing_subscriber::EnvFilter;

/// Parsed command-line arguments
#[derive(Debug, PartialEq)]
struct Args {
    dump: PathBuf,
    templates: Option<PathBuf>,
    options: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut dump = None;
    let mut templates = None;
    let mut options = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--templates" => {
                let dir = iter.next().ok_or("--templates requires a directory")?;
                templates = Some(PathBuf::from(dir));
            }
            "--options" => {
                let file = iter.next().ok_or("--options requires a file")?;
                options = Some(PathBuf::from(file));
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            path if dump.is_none() => dump = Some(PathBuf::from(path)),
            extra => return Err(format!("Unexpected argument '{}'", extra)),
        }
    }

    let dump = dump.ok_or("No input file provided")?;
    Ok(Args {
        dump,
        templates,
        options,
    })
}

fn print_usage(program_name: &str) {
    eprintln!(
        "Usage: {} <dump.json> [--templates DIR] [--options FILE.toml]",
        program_name
    );
    eprintln!();
    eprintln!("The dump is a JSON object with the keys the page template uses:");
    eprintln!("  title, exception_type, exception_value, frames, plaintext");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("tracepage");

    let parsed = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage(program_name);
            process::exit(1);
        }
    };

    if !parsed.dump.exists() {
        eprintln!("Error: File '{}' not found", parsed.dump.display());
        print_usage(program_name);
        process::exit(1);
    }

    let options = match &parsed.options {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => FormatOptions::default(),
    };
    let templates = match &parsed.templates {
        Some(dir) => TemplateSet::load_dir(dir)?,
        None => TemplateSet::default(),
    };
    let page = DebugPage::with_templates(templates, options)?;

    let context: PageContext = serde_json::from_str(&fs::read_to_string(&parsed.dump)?)?;
    tracing::info!(dump = %parsed.dump.display(), "rendering traceback page");
    print!("{}", page.render(&context)?);

    Ok(())
}
