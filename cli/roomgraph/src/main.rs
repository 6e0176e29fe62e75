//! roomgraph: build world maps from captured session transcripts.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use manifest::RoomgraphManifest;

#[derive(Parser)]
#[command(name = "roomgraph", version, about = "Transcript to room graph extraction")]
struct Cli {
    /// Log run summaries
    #[arg(long, global = true)]
    verbose: bool,
    /// Log every parser decision
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse transcripts into a world document
    Parse {
        /// Transcript files, parsed in parallel
        #[arg(required = true)]
        transcripts: Vec<PathBuf>,
        /// Output file (default: [output].path from roomgraph.toml, else stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Existing world document to merge the new rooms into
        #[arg(long)]
        master: Option<PathBuf>,
        /// Tag every room with this region instead of looking it up
        #[arg(long)]
        region: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Merge world documents into a master world
    Merge {
        /// Master world document (created if missing)
        master: PathBuf,
        /// World documents to fold in, in order
        #[arg(required = true)]
        incoming: Vec<PathBuf>,
        /// Output file (default: overwrite the master)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Summarize a world document, or show one room
    Inspect {
        /// World document
        world: PathBuf,
        /// Room label, id, or fingerprint
        #[arg(long)]
        room: Option<String>,
    },
    /// Create a roomgraph.toml in the current directory
    Init {
        /// Project name (default: directory name)
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.debug);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// `--debug` and `--verbose` win over `RUST_LOG`; otherwise `RUST_LOG`
/// applies, defaulting to warnings only.
fn init_tracing(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Parse {
            transcripts,
            output,
            master,
            region,
            pretty,
        } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            let options = commands::parse::ParseOptions {
                transcripts: &transcripts,
                output: output.as_deref(),
                master: master.as_deref(),
                region: region.as_deref(),
                pretty,
            };
            commands::parse::run(&project_dir, manifest.as_ref(), &options)
        }

        Commands::Merge {
            master,
            incoming,
            output,
            pretty,
        } => {
            let (manifest, _) = load_manifest_optional(&cwd)?;
            let pretty = pretty || manifest.is_some_and(|m| m.output.pretty);
            commands::merge::run(&master, &incoming, output.as_deref(), pretty)
        }

        Commands::Inspect { world, room } => commands::inspect::run(&world, room.as_deref()),

        Commands::Init { name } => commands::init::run(&cwd, name.as_deref()),
    }
}

/// Try to load a manifest from the current directory upward. Returns (None, None) if not found.
fn load_manifest_optional(
    cwd: &Path,
) -> anyhow::Result<(Option<RoomgraphManifest>, Option<PathBuf>)> {
    match RoomgraphManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use roomgraph_world::load_world;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_flags() {
        let cli = Cli::try_parse_from([
            "roomgraph", "--debug", "parse", "a.log", "b.log", "-o", "w.json", "--region", "town",
        ])
        .unwrap();
        assert!(cli.debug);
        match cli.command {
            Commands::Parse {
                transcripts,
                output,
                region,
                ..
            } => {
                assert_eq!(transcripts.len(), 2);
                assert_eq!(output, Some(PathBuf::from("w.json")));
                assert_eq!(region.as_deref(), Some("town"));
            }
            _ => panic!("expected parse"),
        }
        assert!(Cli::try_parse_from(["roomgraph", "parse"]).is_err());
    }

    /// Full workflow: init, parse two sessions, merge, inspect.
    #[test]
    fn init_parse_merge_inspect_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        commands::init::run(root, Some("landing")).unwrap();
        let (manifest, project_dir) = RoomgraphManifest::find_and_load(root).unwrap().unwrap();
        assert_eq!(project_dir, root);

        let day1 = root.join("day1.log");
        std::fs::write(
            &day1,
            "[Town Square]\nA fountain bubbles quietly.\nObvious exits: north, east.\n>north\n[Market Row]\nCobblestones line the street.\n",
        )
        .unwrap();
        let day2 = root.join("day2.log");
        std::fs::write(
            &day2,
            "[Town Square]\nA fountain\nbubbles quietly.\n>east\n[Bakery]\nBread cools on a sill by the window.\n",
        )
        .unwrap();

        let first = vec![day1];
        commands::parse::run(
            root,
            Some(&manifest),
            &commands::parse::ParseOptions {
                transcripts: &first,
                ..Default::default()
            },
        )
        .unwrap();
        let master = root.join("world.json");
        assert!(master.is_file());

        let second_out = root.join("day2.json");
        let second = vec![day2];
        commands::parse::run(
            root,
            Some(&manifest),
            &commands::parse::ParseOptions {
                transcripts: &second,
                output: Some(&second_out),
                ..Default::default()
            },
        )
        .unwrap();

        commands::merge::run(&master, &[second_out], None, true).unwrap();
        let world = load_world(&master).unwrap();
        assert_eq!(world.room_count(), 3);
        let square = world.find("town_square").unwrap();
        assert!(square.exits.get_str("north").unwrap().is_resolved());
        assert!(square.exits.get_str("east").unwrap().is_resolved());

        commands::inspect::run(&master, Some("town_square")).unwrap();
    }
}
