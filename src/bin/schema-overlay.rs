//! Schema Overlay CLI
//!
//! Command-line interface for deriving schemas from base models and
//! generating common schema fragments.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use schema_overlay::{
    database_entry, extend, indent_block, load_schema, load_schema_str, pagination, to_yaml,
    DatabaseEntryOptions, ExtendContext, FileSource, IdKind, Overlay, PaginationOptions,
    SchemaSource, Verbatim,
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-overlay")]
#[command(about = "Derive schemas from base models and generate schema fragments")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a base model and apply an overlay of edits to it
    Extend {
        /// Model source: file path or URL (http:// or https://)
        model: String,

        /// YAML or JSON file with require/optional/omit/include lists
        #[arg(long)]
        options: Option<PathBuf>,

        /// Path to add to its holder's required list (repeatable)
        #[arg(long, value_name = "PATH")]
        require: Vec<String>,

        /// Path to remove from its holder's required list (repeatable)
        #[arg(long, value_name = "PATH")]
        optional: Vec<String>,

        /// Path to delete (repeatable)
        #[arg(long, value_name = "PATH")]
        omit: Vec<String>,

        /// Fragment to assign, as PATH=YAML (repeatable)
        #[arg(long, value_name = "PATH=YAML", value_parser = parse_include)]
        include: Vec<(String, Value)>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the id/createdAt/updatedAt property definitions
    DatabaseEntry {
        /// Type of the id field
        #[arg(long, value_enum, default_value_t = IdArg::Uuid)]
        id: IdArg,

        /// Add a deletedAt timestamp
        #[arg(long)]
        soft_deletion: bool,

        /// Spaces to indent the YAML block by
        #[arg(long, default_value_t = 2)]
        indent: usize,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print a paginated list schema
    Pagination {
        /// Reference for the data items
        #[arg(long, value_name = "REF", conflicts_with = "template")]
        path: Option<String>,

        /// File whose contents are inlined as the data items
        #[arg(long, value_name = "FILE")]
        template: Option<String>,

        /// Reference for the meta block
        #[arg(long)]
        pagination_model: Option<String>,

        /// Required top-level field (repeatable, default: meta and data)
        #[arg(long, value_name = "FIELD", conflicts_with = "no_required")]
        required: Vec<String>,

        /// Emit no required list
        #[arg(long)]
        no_required: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    format: Format,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Output file (stdout if not specified)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum IdArg {
    Uuid,
    Number,
    String,
}

impl From<IdArg> for IdKind {
    fn from(arg: IdArg) -> Self {
        match arg {
            IdArg::Uuid => IdKind::Uuid,
            IdArg::Number => IdKind::Number,
            IdArg::String => IdKind::String,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extend {
            model,
            options,
            require,
            optional,
            omit,
            include,
            output,
        } => {
            let flags = Overlay {
                require,
                optional,
                omit,
                include,
            };
            run_extend(&model, options.as_deref(), flags, &output)
        }

        Commands::DatabaseEntry {
            id,
            soft_deletion,
            indent,
            output,
        } => run_database_entry(
            DatabaseEntryOptions::new(id.into()).soft_deletion(soft_deletion),
            indent,
            &output,
        ),

        Commands::Pagination {
            path,
            template,
            pagination_model,
            required,
            no_required,
            output,
        } => run_pagination(
            PaginationArgs {
                path,
                template,
                pagination_model,
                required,
                no_required,
            },
            &output,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_extend(
    model: &str,
    options_file: Option<&Path>,
    flags: Overlay,
    output: &OutputArgs,
) -> Result<(), u8> {
    // Options file first, then command-line edits in each group
    let mut overlay = match options_file {
        Some(path) => load_overlay(path)?,
        None => Overlay::new(),
    };
    overlay.merge(flags);

    let source = schema_source();
    let ctx = ExtendContext::new(Path::new("."), source.as_ref(), &Verbatim);

    let schema = extend(&ctx, model, &overlay).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    emit(&schema, output)
}

fn load_overlay(path: &Path) -> Result<Overlay, u8> {
    let value = load_schema(path).map_err(|e| {
        eprintln!("Error loading options: {}", e);
        e.exit_code() as u8
    })?;

    serde_json::from_value(value).map_err(|e| {
        eprintln!("Error: invalid options in {}: {}", path.display(), e);
        2u8
    })
}

#[cfg(feature = "remote")]
fn schema_source() -> Box<dyn SchemaSource> {
    Box::new(schema_overlay::RemoteSource)
}

#[cfg(not(feature = "remote"))]
fn schema_source() -> Box<dyn SchemaSource> {
    Box::new(FileSource)
}

fn run_database_entry(
    options: DatabaseEntryOptions,
    indent: usize,
    output: &OutputArgs,
) -> Result<(), u8> {
    emit_indented(&database_entry(&options), output, indent)
}

struct PaginationArgs {
    path: Option<String>,
    template: Option<String>,
    pagination_model: Option<String>,
    required: Vec<String>,
    no_required: bool,
}

fn run_pagination(args: PaginationArgs, output: &OutputArgs) -> Result<(), u8> {
    let mut options = PaginationOptions {
        path: args.path,
        pagination_model: args.pagination_model,
        ..PaginationOptions::default()
    };

    if let Some(template) = &args.template {
        let text = FileSource.read(template, Path::new(".")).map_err(|e| {
            eprintln!("Error loading template: {}", e);
            e.exit_code() as u8
        })?;
        options.template = Some(text);
    }

    if args.no_required {
        options.required = Some(Vec::new());
    } else if !args.required.is_empty() {
        options.required = Some(args.required);
    }

    let schema = pagination(&options, &Verbatim).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    emit(&schema, output)
}

/// Serialize `value` and write it to the output file or stdout.
fn emit(value: &Value, output: &OutputArgs) -> Result<(), u8> {
    emit_indented(value, output, 0)
}

/// Like [`emit`], with YAML output shifted right by `indent` spaces.
fn emit_indented(value: &Value, output: &OutputArgs, indent: usize) -> Result<(), u8> {
    let text = match output.format {
        Format::Yaml if indent > 0 => to_yaml(value)
            .map(|yaml| indent_block(&yaml, indent))
            .map_err(|e| e.to_string()),
        Format::Yaml => to_yaml(value).map_err(|e| e.to_string()),
        Format::Json if output.pretty => {
            serde_json::to_string_pretty(value).map(|s| s + "\n").map_err(|e| e.to_string())
        }
        Format::Json => serde_json::to_string(value)
            .map(|s| s + "\n")
            .map_err(|e| e.to_string()),
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match &output.output {
        Some(path) => {
            std::fs::write(path, &text).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            print!("{}", text);
        }
    }

    Ok(())
}

fn parse_include(s: &str) -> Result<(String, Value), String> {
    let (path, fragment) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PATH=YAML, got \"{}\"", s))?;
    let fragment = load_schema_str(fragment).map_err(|e| e.to_string())?;
    Ok((path.to_string(), fragment))
}
