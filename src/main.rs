use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use projutils::config::{
    self, CONFIG_FILE_NAME, DEFAULT_FLATTEN_SEPARATOR, DEFAULT_VERSIONING_MARKER, VersioningOptions,
};
use projutils::mapping::flatten_mapping;
use projutils::path::{resolve_latest_existing, resolve_next_version};
use projutils::timing::log_time;

#[derive(Parser)]
#[command(name = "projutils")]
#[command(version, about = "Versioned output paths and config helpers")]
struct Cli {
    /// Also write logs to the default log file
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the path of the next version of a file
    Next {
        path: PathBuf,
        /// Marker placed before the new version number
        #[arg(long, default_value = DEFAULT_VERSIONING_MARKER)]
        marker: String,
        /// Print the path unchanged
        #[arg(long)]
        overwrite: bool,
        /// Start from the latest existing version in the directory
        #[arg(long)]
        from_last: bool,
        /// Report elapsed time
        #[arg(long)]
        verbose: bool,
    },
    /// Print the latest existing version of a file
    Last { path: PathBuf },
    /// Print a config file as flattened `key = value` lines
    Flatten {
        config: PathBuf,
        #[arg(long, default_value = DEFAULT_FLATTEN_SEPARATOR)]
        sep: String,
    },
    /// Print the fixed-width writer settings as JSON
    FfwParams {
        #[arg(long, default_value = ".")]
        root: PathBuf,
        #[arg(long, default_value = CONFIG_FILE_NAME)]
        file: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.then(config::log_path);
    let _guard = projutils::logging::init_logging(log_path.as_deref())?;

    match cli.command {
        Command::Next {
            path,
            marker,
            overwrite,
            from_last,
            verbose,
        } => {
            let options = VersioningOptions::default()
                .with_marker(marker)
                .overwrite(overwrite)
                .from_last_version(from_last);
            let next = log_time("next", verbose, || resolve_next_version(&path, &options))?;
            println!("{}", next.display());
        }
        Command::Last { path } => {
            println!("{}", resolve_latest_existing(&path)?.display());
        }
        Command::Flatten { config: file, sep } => {
            let root = file.parent().map(PathBuf::from).unwrap_or_default();
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| anyhow::anyhow!("not a file: {}", file.display()))?;
            let mapping = config::load_config(&root, &name)?;
            info!("Flattening {:?}", file);
            for (key, value) in flatten_mapping(&mapping, &sep) {
                println!("{key} = {}", serde_json::to_string(&value)?);
            }
        }
        Command::FfwParams { root, file } => {
            let params = config::ffw_params(&root, &file)?;
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
    }

    Ok(())
}
