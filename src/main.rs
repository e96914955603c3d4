use clap::Parser;
use datedirs_config::Config;
use datedirs_extract::models::MonthLexicon;
use datedirs_library::organize::{OrganizeEvent, Summary, organize};
use datedirs_storage::backend::LocalBackend;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

/// Rename folders exported from a photo library ("12 stycznia 2020",
/// "IMG, 12 stycznia 2020") to YYYY-MM-DD, merging folders that end up with
/// the same date.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Folder containing the exported date folders
    root: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logging isn't configured yet, so report configuration errors with the
    // default subscriber before giving up.
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            init_logging(LevelFilter::INFO);
            tracing::error!(error = ?err, "Could not load configuration");
            return ExitCode::FAILURE;
        },
    };
    // Validated while loading.
    init_logging(config.level_filter().unwrap_or(LevelFilter::INFO));

    let lexicon = match config.lexicon() {
        Ok(lexicon) => lexicon,
        Err(err) => {
            tracing::error!(error = ?err, "Invalid month table");
            return ExitCode::FAILURE;
        },
    };
    tracing::debug!(root = %args.root.display(), locale = %config.locale, "Organizing folders");
    run(&args.root, &lexicon)
}

/// Organizes `root` and maps the outcome to the process exit code: failure
/// only when the root itself can't be listed.
fn run(root: &Path, lexicon: &MonthLexicon) -> ExitCode {
    let backend = match LocalBackend::new(root) {
        Ok(backend) => backend,
        Err(err) => {
            tracing::error!(root = %root.display(), error = ?err, "Cannot list directory");
            return ExitCode::FAILURE;
        },
    };

    let mut summary = Summary::default();
    for event in organize(&backend, lexicon) {
        summary.record(&event);
        match event {
            Ok(OrganizeEvent::Complete) => {
                tracing::info!(
                    discovered = summary.discovered,
                    renamed = summary.renamed,
                    merged = summary.merged,
                    incomplete = summary.incomplete,
                    skipped = summary.skipped,
                    failed = summary.failed,
                    "Done"
                );
            },
            Ok(_) => {},
            Err(err) if err.is_fatal() => {
                tracing::error!(root = %root.display(), error = ?err, "Cannot list directory");
                return ExitCode::FAILURE;
            },
            Err(err) => tracing::warn!(error = ?err, "Skipping folder"),
        }
    }
    ExitCode::SUCCESS
}

fn init_logging(level: LevelFilter) {
    tracing_subscriber::fmt().with_max_level(level).with_target(false).with_writer(std::io::stderr).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_root_is_the_only_argument() {
        assert!(Args::try_parse_from(["datedirs"]).is_err());
        assert!(Args::try_parse_from(["datedirs", "a", "b"]).is_err());
        let args = Args::try_parse_from(["datedirs", "/photos/Export"]).unwrap();
        assert_eq!(args.root, PathBuf::from("/photos/Export"));
    }

    #[test]
    fn test_missing_root_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("Export");
        assert_eq!(run(&root, &MonthLexicon::default()), ExitCode::FAILURE);
    }

    #[test]
    fn test_root_that_is_a_file_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("Export");
        fs::write(&root, "not a folder").unwrap();
        assert_eq!(run(&root, &MonthLexicon::default()), ExitCode::FAILURE);
    }

    #[test]
    fn test_folder_failures_still_succeed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        for folder in ["31 lutego 2020", "5 May 2021", "IMG, 5 maja 2021", "2021-06-01"] {
            fs::create_dir(root.join(folder)).unwrap();
        }
        assert_eq!(run(root, &MonthLexicon::default()), ExitCode::SUCCESS);
        assert!(root.join("2021-05-05").is_dir());
        assert!(root.join("31 lutego 2020").is_dir());
        assert!(root.join("5 May 2021").is_dir());
        assert!(root.join("2021-06-01").is_dir());
    }
}
