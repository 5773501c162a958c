//! hexta - JSON/YAML developer tools
//!
//! A command line front end for the document operations and converters in
//! the library. Diagnostics go to stderr; set `RUST_LOG=debug` to see
//! dropped entries and traversal summaries.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args as ClapArgs, Parser, Subcommand};
use log::{debug, info};

use hexta_devtools::convert::{self, EnvFormat};
use hexta_devtools::diff::{self, DiffItem};
use hexta_devtools::flatten::{self, ArrayNotation, FlattenOptions};
use hexta_devtools::format;
use hexta_devtools::jsonpath;
use hexta_devtools::schema;
use hexta_devtools::value::{self, Value};
use hexta_devtools::{Config, Error};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(name = "hexta", about = "Structural tools for JSON and YAML documents", version)]
struct Cli {
    /// Configuration file with default options
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Output location. Use '-' for stdout
    #[arg(short, long, global = true, default_value = "-")]
    output: String,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Re-indent a JSON document
    Pretty(PrettyArgs),
    /// Remove insignificant whitespace from a JSON document
    Minify(InputArgs),
    /// Check JSON syntax and report the first error
    Validate(InputArgs),
    /// Count nodes by kind
    Stats(InputArgs),
    /// Flatten a document into key/value pairs
    Flatten(FlattenArgs),
    /// Rebuild a document from key/value pairs
    Unflatten(FlattenArgs),
    /// Compare two documents
    Diff(DiffArgs),
    /// Evaluate a JSONPath expression
    Query(QueryArgs),
    /// List JSONPath expressions that select something in the document
    Suggest(InputArgs),
    /// Infer a JSON Schema from a sample document
    Schema(SchemaArgs),
    /// Convert properties, YAML or Spring sources to environment variables
    Env(EnvArgs),
    /// Convert Java records to protobuf messages
    Proto(ProtoArgs),
    /// Fill SQL placeholders from a Preparing/Parameters log excerpt
    Sql(InputArgs),
}

#[derive(ClapArgs, Debug)]
struct InputArgs {
    /// Input file, stdin when omitted or '-'
    file: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct PrettyArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Spaces per indentation level
    #[arg(long)]
    indent: Option<usize>,
    /// Sort object keys
    #[arg(long, default_value_t = false)]
    sort_keys: bool,
}

#[derive(ClapArgs, Debug)]
struct FlattenArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Key separator
    #[arg(long)]
    separator: Option<String>,
    /// Array notation: bracket or dot
    #[arg(long, value_parser = parse_array_notation)]
    array_notation: Option<ArrayNotation>,
    /// Keep arrays as single values
    #[arg(long, default_value_t = false)]
    preserve_arrays: bool,
    /// Keep nested empty objects and arrays
    #[arg(long, default_value_t = false)]
    preserve_empty: bool,
    /// Pick separator and notation from the document depth
    #[arg(long, default_value_t = false)]
    auto: bool,
    /// Use the Key,Value,Type CSV form instead of JSON
    #[arg(long, default_value_t = false)]
    csv: bool,
}

#[derive(ClapArgs, Debug)]
struct DiffArgs {
    /// Left (old) document
    lhs: PathBuf,
    /// Right (new) document
    rhs: PathBuf,
    /// Report layout: text, json or csv
    #[arg(long, default_value = "text")]
    report: String,
    /// Leave unchanged leaves out of the report
    #[arg(long, default_value_t = false)]
    changes_only: bool,
}

#[derive(ClapArgs, Debug)]
struct QueryArgs {
    /// JSONPath expression, e.g. $.store.book[*].title
    expression: String,
    #[command(flatten)]
    input: InputArgs,
}

#[derive(ClapArgs, Debug)]
struct SchemaArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Title for the root schema
    #[arg(long)]
    title: Option<String>,
    /// Do not emit required lists
    #[arg(long, default_value_t = false)]
    no_required: bool,
    /// Allow members beyond the sampled ones
    #[arg(long, default_value_t = false)]
    allow_additional: bool,
    /// Attach sample values as examples
    #[arg(long, default_value_t = false)]
    examples: bool,
}

#[derive(ClapArgs, Debug)]
struct EnvArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Source kind: properties, yaml or spring. Guessed from the extension when omitted
    #[arg(long)]
    from: Option<String>,
    /// Output layout: dotenv or k8s
    #[arg(long)]
    format: Option<EnvFormat>,
}

#[derive(ClapArgs, Debug)]
struct ProtoArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Proto package name
    #[arg(long)]
    package: Option<String>,
    /// Value of option java_package
    #[arg(long)]
    java_package: Option<String>,
    /// Set option java_multiple_files
    #[arg(long, default_value_t = false)]
    java_multiple_files: bool,
}

fn parse_array_notation(s: &str) -> Result<ArrayNotation, String> {
    match s {
        "bracket" => Ok(ArrayNotation::Bracket),
        "dot" => Ok(ArrayNotation::Dot),
        other => Err(format!("unknown array notation {:?}, expected bracket or dot", other)),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> CliResult {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    debug!("using {:?}", config);

    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(fs::File::create(&cli.output).map_err(|e| Error::io(cli.output.as_str(), e))?)
    };

    match cli.cmd {
        Cmd::Pretty(args) => pretty(&config, args, &mut output),
        Cmd::Minify(args) => {
            let text = read_input(args.file.as_deref())?;
            writeln!(output, "{}", format::minify(&text)?)?;
            Ok(())
        }
        Cmd::Validate(args) => validate(args, &mut output),
        Cmd::Stats(args) => {
            let doc = load_document(args.file.as_deref())?;
            let stats = format::statistics(&doc);
            writeln!(output, "{}", serde_json::to_string_pretty(&stats)?)?;
            Ok(())
        }
        Cmd::Flatten(args) => flatten_cmd(&config, args, &mut output),
        Cmd::Unflatten(args) => unflatten_cmd(&config, args, &mut output),
        Cmd::Diff(args) => diff_cmd(args, &mut output),
        Cmd::Query(args) => {
            let doc = load_document(args.input.file.as_deref())?;
            let results = jsonpath::query(&doc, &args.expression)?;
            info!("{} matches for {}", results.len(), args.expression);
            writeln!(output, "{}", serde_json::to_string_pretty(&results)?)?;
            Ok(())
        }
        Cmd::Suggest(args) => {
            let doc = load_document(args.file.as_deref())?;
            for suggestion in jsonpath::get_json_path_suggestions(&doc) {
                writeln!(output, "{}", suggestion)?;
            }
            Ok(())
        }
        Cmd::Schema(args) => schema_cmd(&config, args, &mut output),
        Cmd::Env(args) => env_cmd(&config, args, &mut output),
        Cmd::Proto(args) => {
            let source = read_input(args.input.file.as_deref())?;
            let mut opts = config.proto.clone();
            if args.package.is_some() {
                opts.package = args.package;
            }
            if args.java_package.is_some() {
                opts.java_package = args.java_package;
            }
            opts.java_multiple_files |= args.java_multiple_files;
            write!(output, "{}", convert::java_records_to_proto(&source, &opts)?)?;
            Ok(())
        }
        Cmd::Sql(args) => {
            let log = read_input(args.file.as_deref())?;
            writeln!(output, "{}", convert::fill_from_log(&log)?)?;
            Ok(())
        }
    }
}

fn read_input(file: Option<&Path>) -> Result<String, Error> {
    match file {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|e| Error::io(path.display().to_string(), e))
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| Error::io("<stdin>", e))?;
            Ok(text)
        }
    }
}

fn is_yaml(file: Option<&Path>) -> bool {
    file.and_then(|p| p.extension())
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

/// Reads a JSON document, or a YAML one when the extension says so.
fn load_document(file: Option<&Path>) -> Result<Value, Error> {
    let text = read_input(file)?;
    if is_yaml(file) {
        Ok(value::from_yaml(&text)?)
    } else {
        Ok(value::from_json(&text)?)
    }
}

fn pretty(config: &Config, args: PrettyArgs, output: &mut dyn Write) -> CliResult {
    let indent = args.indent.unwrap_or(config.indent);
    let doc = load_document(args.input.file.as_deref())?;
    let doc = if args.sort_keys { format::sort_keys(&doc) } else { doc };
    writeln!(output, "{}", value::to_json_pretty(&doc, indent)?)?;
    Ok(())
}

fn validate(args: InputArgs, output: &mut dyn Write) -> CliResult {
    let text = read_input(args.file.as_deref())?;
    match format::validate_json(&text) {
        Ok(()) => {
            writeln!(output, "Valid JSON")?;
            Ok(())
        }
        Err(err) => {
            writeln!(output, "Invalid JSON at line {}, column {}: {}", err.line, err.column, err.message)?;
            Err("validation failed".into())
        }
    }
}

fn flatten_options(config: &Config, args: &FlattenArgs, doc: Option<&Value>) -> FlattenOptions {
    let mut opts = match doc {
        Some(doc) if args.auto => flatten::suggest_optimal_options(doc),
        _ => config.flatten.clone(),
    };
    if let Some(separator) = &args.separator {
        opts.separator = separator.clone();
    }
    if let Some(notation) = args.array_notation {
        opts.array_notation = notation;
    }
    opts.preserve_arrays |= args.preserve_arrays;
    opts.preserve_empty |= args.preserve_empty;
    opts
}

fn flatten_cmd(config: &Config, args: FlattenArgs, output: &mut dyn Write) -> CliResult {
    let doc = load_document(args.input.file.as_deref())?;
    let opts = flatten_options(config, &args, Some(&doc));
    let flat = flatten::flatten(&doc, &opts);
    if args.csv {
        write!(output, "{}", flatten::convert_to_csv(&flat))?;
    } else {
        let map: value::Map = flat.into_iter().collect();
        writeln!(output, "{}", value::to_json_pretty(&Value::Map(map), config.indent)?)?;
    }
    Ok(())
}

fn unflatten_cmd(config: &Config, args: FlattenArgs, output: &mut dyn Write) -> CliResult {
    let opts = flatten_options(config, &args, None);
    let flat = if args.csv {
        let text = read_input(args.input.file.as_deref())?;
        flatten::convert_from_csv(&text)?
    } else {
        match load_document(args.input.file.as_deref())? {
            Value::Map(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            other => return Err(format!("expected an object of flat keys, found {}", other.type_name()).into()),
        }
    };
    let doc = flatten::unflatten(&flat, &opts);
    writeln!(output, "{}", value::to_json_pretty(&doc, config.indent)?)?;
    Ok(())
}

fn diff_cmd(args: DiffArgs, output: &mut dyn Write) -> CliResult {
    let lhs = load_document(Some(&args.lhs))?;
    let rhs = load_document(Some(&args.rhs))?;
    let items = diff::compare_json(&lhs, &rhs);
    let summary = diff::summarize(&items);
    let reported: Vec<DiffItem> = if args.changes_only {
        diff::filter_changes(&items)
    } else {
        items.clone()
    };

    match args.report.as_str() {
        "text" => {
            if summary.is_same() {
                writeln!(output, "Documents are identical")?;
            } else {
                writeln!(output, "{}", diff::to_unified_text(&reported))?;
            }
            writeln!(output, "\n{} ({:.1}% similar)", summary, diff::similarity_score(&items))?;
        }
        "json" => writeln!(output, "{}", serde_json::to_string_pretty(&reported)?)?,
        "csv" => write!(output, "{}", diff::to_csv(&reported))?,
        other => return Err(format!("unknown report {:?}, expected text, json or csv", other).into()),
    }
    Ok(())
}

fn schema_cmd(config: &Config, args: SchemaArgs, output: &mut dyn Write) -> CliResult {
    let doc = load_document(args.input.file.as_deref())?;
    let mut opts = config.schema.clone();
    if args.title.is_some() {
        opts.title = args.title;
    }
    opts.required &= !args.no_required;
    opts.additional_properties |= args.allow_additional;
    opts.examples |= args.examples;
    let node = schema::generate_json_schema(&doc, &opts);
    writeln!(output, "{}", node.to_json_pretty()?)?;
    Ok(())
}

fn env_cmd(config: &Config, args: EnvArgs, output: &mut dyn Write) -> CliResult {
    let file = args.input.file.as_deref();
    let text = read_input(file)?;
    let from = match args.from.as_deref() {
        Some(from) => from.to_string(),
        None => match file.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
            Some("yaml" | "yml" | "json") => "yaml".to_string(),
            Some("java") => "spring".to_string(),
            _ => "properties".to_string(),
        },
    };
    let entries = match from.as_str() {
        "properties" => convert::properties_to_env(&text)?,
        "yaml" | "json" => convert::yaml_to_env(&text)?,
        "spring" => convert::spring_annotations_to_env(&text),
        other => return Err(format!("unknown source {:?}, expected properties, yaml or spring", other).into()),
    };
    let format: EnvFormat = args.format.unwrap_or(config.env.format);
    write!(output, "{}", convert::render_env(&entries, format)?)?;
    Ok(())
}
