use clap::Parser;
use formwork::prelude::*;
use std::fs;
use std::str::FromStr;

/// One edit applied to the session, in command-line order.
#[derive(Debug, Clone)]
enum EditOp {
    Add(String),
    Delete(String),
    Set { path: String, value: String },
}

impl FromStr for EditOp {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (verb, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("expected VERB:ARGS, got '{}'", s))?;
        match verb {
            "add" => Ok(EditOp::Add(rest.to_string())),
            "delete" => Ok(EditOp::Delete(rest.to_string())),
            "set" => {
                let (path, value) = rest
                    .split_once('=')
                    .ok_or_else(|| format!("expected set:PATH=VALUE, got '{}'", s))?;
                Ok(EditOp::Set {
                    path: path.to_string(),
                    value: value.to_string(),
                })
            }
            other => Err(format!("unknown operation '{}', expected add, delete or set", other)),
        }
    }
}

/// Create or edit a schema-conformant JSON instance from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the schema JSON file
    schema_path: String,

    /// Optional path to an existing instance JSON file to edit
    #[arg(short, long)]
    instance: Option<String>,

    /// Edits to apply in order: add:LIST_PATH, delete:GROUP_PATH or set:FIELD_PATH=VALUE
    #[arg(short, long = "op")]
    ops: Vec<EditOp>,

    /// Open the session read-only
    #[arg(long)]
    readonly: bool,

    /// Single-valued enumerations with more options than this are edited by label
    #[arg(long, default_value_t = 10)]
    autocomplete_threshold: usize,

    /// Print the node tree outline before the saved instance
    #[arg(long)]
    outline: bool,

    /// Enable debug logging (overridden by FORMWORK_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let schema = Schema::from_file(&cli.schema_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load schema: {}", e)));

    let mut builder = Session::builder(schema)
        .readonly(cli.readonly)
        .autocomplete_threshold(cli.autocomplete_threshold);
    if let Some(path) = &cli.instance {
        builder = builder.instance(load_instance(path));
    }
    let mut session = builder
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to open session: {}", e)));

    for op in &cli.ops {
        apply(&mut session, op)
            .unwrap_or_else(|e| exit_with_error(&format!("Operation {:?} failed: {}", op, e)));
    }

    if cli.outline {
        let outline = session
            .outline()
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to render outline: {}", e)));
        println!("{}", outline);
    }

    let outcome = session
        .save()
        .unwrap_or_else(|e| exit_with_error(&format!("Save failed: {}", e)));
    let json = serde_json::to_string_pretty(&outcome.instance)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize instance: {}", e)));
    println!("{}", json);

    if !outcome.is_valid() {
        for error in &outcome.errors {
            eprintln!("  -> {}", error);
        }
        exit_with_error(&format!("{} field(s) could not be saved", outcome.errors.len()));
    }
}

fn apply(session: &mut Session, op: &EditOp) -> std::result::Result<(), SessionError> {
    match op {
        EditOp::Add(path) => {
            let list = session.locate(path)?;
            session.add_group(list).map(|_| ())
        }
        EditOp::Delete(path) => {
            let group = session.locate(path)?;
            session.delete_group(group)
        }
        EditOp::Set { path, value } => {
            let field = session.locate(path)?;
            session.set_value(field, value.as_str())
        }
    }
}

fn load_instance(path: &str) -> Group {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read instance file '{}': {}", path, e))
    });
    serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse instance JSON: {}", e)))
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("FORMWORK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("Warning: could not initialize logging: {}", e);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
