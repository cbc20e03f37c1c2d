//! Command-line front end for the viewport canvas tooling.
//!
//! Drives the headless client against a local data directory and the
//! presigning service: inspect and edit group membership, export a group to
//! the bucket, import or inspect the saved scene, and ping the service.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use canvas::{GroupError, GroupTracker, Scene};
use client::export::DEFAULT_USER_ID;
use client::{ApiError, BlockRasterizer, ExportPipeline, HttpPresignClient, LocalStore, PresignApi, StoreError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    #[error("group error: {0}")]
    Group(#[from] GroupError),
    #[error("cannot read scene file: {0}")]
    SceneFile(#[from] std::io::Error),
    #[error("invalid scene JSON: {0}")]
    SceneJson(#[from] serde_json::Error),
    #[error("no such group: {0}")]
    NoSuchGroup(String),
    #[error("export failed (see warnings above)")]
    ExportFailed,
}

#[derive(Parser, Debug)]
#[command(name = "viewport", about = "Viewport canvas groups and export CLI")]
struct Cli {
    /// Base URL of the presigning service.
    #[arg(long, env = "VIEWPORT_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Directory holding scene.json and groups.json.
    #[arg(long, env = "VIEWPORT_DATA_DIR", default_value = ".viewport")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Liveness-check the presigning service.
    Ping,
    /// Group membership operations.
    Group(GroupCommand),
    /// Saved-scene operations.
    Scene(SceneCommand),
}

#[derive(Args, Debug)]
struct GroupCommand {
    #[command(subcommand)]
    command: GroupSubcommand,
}

#[derive(Subcommand, Debug)]
enum GroupSubcommand {
    /// List groups with stored and live member counts.
    List,
    /// Tag an element with a group (idempotent).
    Add { group_id: String, element_id: String },
    /// Untag an element from a group (idempotent).
    Remove { group_id: String, element_id: String },
    /// Delete a group and strip its tag from every member.
    Delete { group_id: String },
    /// Select a group's live members in the saved scene.
    Select { group_id: String },
    /// Export a group as PNG, upload it, and insert the result.
    Export {
        group_id: String,
        #[arg(long, default_value = DEFAULT_USER_ID)]
        user_id: String,
    },
    /// Resolve the most recent uploaded object's public URL.
    Url {
        group_id: String,
        #[arg(long, default_value = DEFAULT_USER_ID)]
        user_id: String,
    },
}

#[derive(Args, Debug)]
struct SceneCommand {
    #[command(subcommand)]
    command: SceneSubcommand,
}

#[derive(Subcommand, Debug)]
enum SceneSubcommand {
    /// Replace the saved scene with a JSON file.
    Import { file: PathBuf },
    /// Print element counts for the saved scene.
    Show,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let store = LocalStore::new(&cli.data_dir);
    match cli.command {
        Command::Ping => {
            HttpPresignClient::new(&cli.base_url).ping().await?;
            println!("OK");
            Ok(())
        }
        Command::Group(group) => run_group(&cli.base_url, &store, group.command).await,
        Command::Scene(scene) => run_scene(&store, scene.command),
    }
}

async fn run_group(base_url: &str, store: &LocalStore, command: GroupSubcommand) -> Result<(), CliError> {
    let mut scene = store.load_scene().unwrap_or_default();
    let mut tracker = store.load_groups().unwrap_or_default();

    match command {
        GroupSubcommand::List => {
            // Opening the listing is the reconciliation point: live tags are
            // pulled into the stored mapping, then persisted.
            tracker.merge_from_scene(&scene);
            store.save_groups(&tracker)?;
            let summaries = tracker.summaries(&scene);
            if summaries.is_empty() {
                println!("no groups");
            }
            for summary in summaries {
                println!("{}  stored={}  live={}", summary.id, summary.element_ids.len(), summary.live_count);
            }
            Ok(())
        }
        GroupSubcommand::Add { group_id, element_id } => {
            tracker.add_element(&mut scene, &group_id, &element_id)?;
            store.save_scene(&scene)?;
            store.save_groups(&tracker)?;
            println!("added {element_id} to {group_id}");
            Ok(())
        }
        GroupSubcommand::Remove { group_id, element_id } => {
            tracker.remove_element(&mut scene, &group_id, &element_id);
            store.save_scene(&scene)?;
            store.save_groups(&tracker)?;
            println!("removed {element_id} from {group_id}");
            Ok(())
        }
        GroupSubcommand::Delete { group_id } => {
            if !tracker.contains(&group_id) {
                return Err(CliError::NoSuchGroup(group_id));
            }
            tracker.delete_group(&mut scene, &group_id);
            store.save_scene(&scene)?;
            store.save_groups(&tracker)?;
            println!("deleted {group_id}");
            Ok(())
        }
        GroupSubcommand::Select { group_id } => {
            tracker.select_group(&mut scene, &group_id);
            store.save_scene(&scene)?;
            println!("selected {} element(s)", scene.selected_ids().len());
            Ok(())
        }
        GroupSubcommand::Export { group_id, user_id } => {
            let api = Arc::new(HttpPresignClient::new(base_url));
            let pipeline = ExportPipeline::new(api, Arc::new(BlockRasterizer::default()));
            match pipeline.export_group(&mut scene, &tracker, &group_id, &user_id).await {
                Some(element_id) => {
                    store.save_scene(&scene)?;
                    println!("exported {group_id}; inserted {element_id}");
                    Ok(())
                }
                None => Err(CliError::ExportFailed),
            }
        }
        GroupSubcommand::Url { group_id, user_id } => {
            let api = HttpPresignClient::new(base_url);
            match api.public_url(&user_id, &group_id).await? {
                Some(url) => {
                    println!("{url}");
                    Ok(())
                }
                None => Err(CliError::NoSuchGroup(group_id)),
            }
        }
    }
}

fn run_scene(store: &LocalStore, command: SceneSubcommand) -> Result<(), CliError> {
    match command {
        SceneSubcommand::Import { file } => {
            let raw = std::fs::read_to_string(file)?;
            let scene: Scene = serde_json::from_str(&raw)?;
            store.save_scene(&scene)?;
            println!("imported {} element(s)", scene.elements.len());
            Ok(())
        }
        SceneSubcommand::Show => {
            let scene = store.load_scene().unwrap_or_default();
            let live = scene.live().count();
            println!("{} element(s), {live} live", scene.elements.len());
            let tracker: GroupTracker = store.load_groups().unwrap_or_default();
            for summary in tracker.summaries(&scene) {
                println!("group {}  stored={}  live={}", summary.id, summary.element_ids.len(), summary.live_count);
            }
            Ok(())
        }
    }
}
