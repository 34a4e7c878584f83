use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scrivener::{Fragment, ScrivenerConfig};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "scrivener")]
#[command(version, about = "changelog fragments: write entries, collect them later", long_about = None)]
struct Cli {
    /// path to the project root (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    path: PathBuf,

    /// output format (json or human)
    #[arg(short, long, default_value = "human", global = true)]
    format: OutputFormat,

    /// log what is being done
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Json,
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!(
                "invalid output format: {}, use 'json' or 'human'",
                s
            )),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// create a new blank fragment
    Create {
        /// short description appended to the fragment file name
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// collect all fragments into the changelog
    #[command(disable_version_flag = true)]
    Collect {
        /// version the collected entry is titled with
        #[arg(long = "version", id = "entry_version", value_name = "VERSION")]
        version: Option<String>,

        /// keep fragment files after collecting
        #[arg(long)]
        keep: bool,

        /// print the entry instead of writing the changelog
        #[arg(long)]
        stdout: bool,
    },

    /// parse a document and show its sections
    Parse {
        /// file to parse
        file: PathBuf,
    },

    /// print the template for new fragments
    Template,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(cli.verbose)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    run_command(cli)
}

fn run_command(cli: Cli) -> Result<()> {
    let config = ScrivenerConfig::load_or_default(&cli.path);
    tracing::debug!(format = %config.format, "using configuration");

    match cli.command {
        Commands::Create { slug } => {
            handle_create(&cli.path, &config, &cli.format, slug.as_deref())?;
        }
        Commands::Collect {
            version,
            keep,
            stdout,
        } => {
            handle_collect(
                &cli.path,
                &config,
                &cli.format,
                version.as_deref(),
                keep,
                stdout,
            )?;
        }
        Commands::Parse { file } => {
            handle_parse(&config, &cli.format, &file)?;
        }
        Commands::Template => {
            let tools = config.format.tools();
            let text = scrivener::new_fragment_text(&cli.path, tools.as_ref(), &config)
                .context("failed to render fragment template")?;
            print!("{}", text);
        }
    }

    Ok(())
}

fn handle_create(
    root: &Path,
    config: &ScrivenerConfig,
    format: &OutputFormat,
    slug: Option<&str>,
) -> Result<()> {
    let now = chrono::Local::now().naive_local();
    let path = scrivener::create_fragment(root, config, now, slug)
        .context("failed to create fragment")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "created": path });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("created {}", path.display());
        }
    }

    Ok(())
}

fn handle_collect(
    root: &Path,
    config: &ScrivenerConfig,
    format: &OutputFormat,
    version: Option<&str>,
    keep: bool,
    stdout: bool,
) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let collected =
        scrivener::collect(root, config, version, today).context("failed to collect fragments")?;

    if collected.fragments.is_empty() {
        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({ "fragments": 0, "written": null });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Human => {
                println!(
                    "no fragments found in {}",
                    config.fragment_dir(root).display()
                );
            }
        }
        return Ok(());
    }

    if stdout {
        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "fragments": collected.fragments,
                    "sections": collected.sections,
                    "text": collected.text,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Human => print!("{}", collected.text),
        }
        return Ok(());
    }

    let written = scrivener::write_changelog(root, config, &collected, keep)
        .context("failed to write changelog")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "fragments": collected.fragments.len(),
                "written": written,
                "kept": keep,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!(
                "collected {} fragment(s) into {}",
                collected.fragments.len(),
                written.display()
            );
            if keep {
                println!("fragments kept in {}", config.fragment_dir(root).display());
            }
        }
    }

    Ok(())
}

fn handle_parse(config: &ScrivenerConfig, format: &OutputFormat, file: &Path) -> Result<()> {
    let tools = file
        .extension()
        .and_then(|e| e.to_str())
        .and_then(scrivener::Format::from_extension)
        .unwrap_or(config.format)
        .tools();

    let fragment =
        Fragment::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let sections = fragment.sections(tools.as_ref());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&sections)?);
        }
        OutputFormat::Human => {
            if sections.is_empty() {
                println!("no sections in {}", file.display());
                return Ok(());
            }
            for (title, paragraphs) in sections.iter() {
                println!("{} ({} paragraph(s))", title, paragraphs.len());
                for paragraph in paragraphs {
                    for line in paragraph.lines() {
                        println!("  {}", line);
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use scrivener::utils::testing::TestScenario;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_collect_parses_entry_version() {
        let cli = Cli::try_parse_from(["scrivener", "collect", "--version", "1.0.0"]).unwrap();
        match cli.command {
            Commands::Collect { version, .. } => assert_eq!(version.as_deref(), Some("1.0.0")),
            _ => panic!("expected collect command"),
        }

        let cli = Cli::try_parse_from(["scrivener", "collect", "--stdout"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Collect { version: None, stdout: true, .. }
        ));
    }

    #[test]
    fn test_top_level_version_flag() {
        let err = Cli::try_parse_from(["scrivener", "--version"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_collect_command_writes_versioned_entry() {
        let project = TestScenario::SingleFragment.build().unwrap();
        let root = project.path().to_string_lossy().to_string();

        let cli = Cli::try_parse_from([
            "scrivener",
            "--path",
            root.as_str(),
            "collect",
            "--version",
            "1.0.0",
            "--keep",
        ])
        .unwrap();
        run_command(cli).unwrap();

        let changelog = project.read("CHANGELOG.rst").unwrap();
        assert!(changelog.starts_with("1.0.0 - "));
        assert!(changelog.contains("Added\n-----\n\n- A thing.\n"));
        assert_eq!(project.fragment_names().unwrap().len(), 1);
    }
}
