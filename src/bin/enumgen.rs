//! Enumgen CLI - Generate string-backed Go enums.

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use enumgen::builder::{generate_from_config, EnumGen};
use enumgen::config::load_config;
use enumgen::errors::{exit_code, EnumgenError};
use enumgen::extract::{parse_type_list, Strategy};
use enumgen::logging::init_tracing;
use enumgen::output::Formatter;
use enumgen::EnumDef;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "enumgen")]
#[command(about = "Generate string-backed Go enums from annotations, struct tags, or const blocks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the enums found in a package without writing anything
    Scan {
        #[command(flatten)]
        source: SourceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate one enum file per definition found in a package
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        format: FormatArgs,

        /// Directory to write generated files to (default: the scanned directory)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Package name for generated files (default: the scanned package)
        #[arg(long)]
        package: Option<String>,
    },

    /// Generate enums from a JSON definition file
    Config {
        /// Path to the JSON definitions
        #[arg(long, default_value = "enums.json")]
        file: PathBuf,

        /// Directory to write generated files to
        #[arg(long, default_value = ".")]
        out: PathBuf,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Directory to scan for enum definitions
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// How enums are declared in the sources (annotation, tag, const)
    #[arg(long, default_value = "annotation")]
    strategy: String,

    /// Comma-separated type names for the const strategy
    #[arg(long)]
    types: Option<String>,

    /// Skip files whose name matches this glob (repeatable)
    #[arg(long)]
    exclude: Vec<String>,
}

#[derive(Args)]
struct FormatArgs {
    /// Do not run goimports on generated files
    #[arg(long)]
    no_format: bool,

    /// Import prefix passed to goimports -local
    #[arg(long)]
    local: Option<String>,
}

impl SourceArgs {
    fn strategy(&self) -> Result<Strategy, EnumgenError> {
        let strategy: Strategy = self.strategy.parse().map_err(EnumgenError::Usage)?;
        match strategy {
            Strategy::ConstBlock { .. } => {
                let targets = self
                    .types
                    .as_deref()
                    .map(parse_type_list)
                    .unwrap_or_default();
                if targets.is_empty() {
                    return Err(EnumgenError::Usage(
                        "the const strategy needs --types".to_string(),
                    ));
                }
                Ok(Strategy::ConstBlock { targets })
            }
            other => Ok(other),
        }
    }

    fn builder(&self) -> Result<EnumGen, EnumgenError> {
        let mut builder = EnumGen::new(&self.dir).strategy(self.strategy()?);
        for pattern in &self.exclude {
            builder = builder.exclude(pattern.as_str());
        }
        Ok(builder)
    }
}

impl FormatArgs {
    fn formatter(&self) -> Option<Formatter> {
        if self.no_format {
            return None;
        }
        let formatter = Formatter::goimports();
        Some(match &self.local {
            Some(prefix) => formatter.local(prefix.as_str()),
            None => formatter,
        })
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let json_output = matches!(cli.command, Commands::Scan { json: true, .. });

    let result = match cli.command {
        Commands::Scan { source, json } => run_scan(source, json),
        Commands::Generate {
            source,
            format,
            out,
            package,
        } => run_generate(source, format, out, package),
        Commands::Config { file, out, format } => run_config(file, out, format),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "enumgen", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        if json_output {
            #[derive(Serialize)]
            struct ErrorOutput {
                error: String,
            }

            let payload = ErrorOutput {
                error: e.to_string(),
            };

            let json = serde_json::to_string(&payload)
                .unwrap_or_else(|_| "{\"error\":\"serialization failed\"}".to_string());
            eprintln!("{json}");
        } else {
            eprintln!("error: {}", e);
        }
        std::process::exit(exit_code(&e));
    }
}

// --- Scan command ---

fn run_scan(source: SourceArgs, json: bool) -> Result<(), EnumgenError> {
    let extraction = source.builder()?.extract()?;

    if json {
        #[derive(Serialize)]
        struct Output<'a> {
            package: Option<&'a str>,
            package_conflicts: &'a [String],
            enums: &'a [EnumDef],
        }

        let output = Output {
            package: extraction.package.as_deref(),
            package_conflicts: &extraction.package_conflicts,
            enums: &extraction.enums,
        };
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| EnumgenError::Usage(e.to_string()))?;
        println!("{json}");
    } else {
        println!(
            "package {}",
            extraction.package.as_deref().unwrap_or("<none>")
        );
        for def in &extraction.enums {
            println!("{} ({} values)", def.name, def.values.len());
            for value in &def.values {
                println!("  {}{} = {:?}", def.name, value.constant_name, value.string_value);
            }
        }
    }

    Ok(())
}

// --- Generate command ---

fn run_generate(
    source: SourceArgs,
    format: FormatArgs,
    out: Option<PathBuf>,
    package: Option<String>,
) -> Result<(), EnumgenError> {
    let mut builder = source.builder()?.formatter(format.formatter());
    if let Some(out) = out {
        if !out.is_dir() {
            return Err(EnumgenError::PathNotFound(out));
        }
        builder = builder.output_dir(out);
    }
    if let Some(package) = package {
        builder = builder.package(package);
    }

    let report = builder.generate()?;
    for path in &report.written {
        println!("{}", path.display());
    }
    Ok(())
}

// --- Config command ---

fn run_config(file: PathBuf, out: PathBuf, format: FormatArgs) -> Result<(), EnumgenError> {
    if !file.exists() {
        return Err(EnumgenError::PathNotFound(file));
    }

    let config = load_config(&file)?;
    let formatter = format.formatter();
    let report = generate_from_config(&config, &out, formatter.as_ref())?;
    for path in &report.written {
        println!("{}", path.display());
    }
    Ok(())
}
