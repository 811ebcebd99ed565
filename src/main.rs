use anyhow::{Context, Result};
use clap::Parser;

use git_release::config::{self, Config};
use git_release::conventional;
use git_release::git::{Git2Repository, Repository};
use git_release::release::{self, Verification};
use git_release::ui;
use git_release::version::Version;

/// Exit code when the release was published but verification disagreed
const EXIT_VERIFY_MISMATCH: i32 = 1;
/// Exit code for any failure before or during publishing
const EXIT_FAILURE: i32 = 2;

#[derive(clap::Parser)]
#[command(
    name = "git-release",
    about = "Bump the project version from conventional commits, commit it, and tag the release"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Alternate version declaration file")]
    file: Option<String>,

    #[arg(short = 'C', long, help = "Run as if started in this directory")]
    chdir: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

/// Terminal state of a run, mapped to an exit code in main
enum Outcome {
    Verified,
    NothingToRelease,
    DryRun,
    Mismatch { expected: Version, actual: Version },
    Unverifiable { reason: String },
}

fn main() {
    let args = Args::parse();

    if args.version {
        println!("git-release {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    match run(args) {
        Ok(Outcome::Verified) | Ok(Outcome::NothingToRelease) | Ok(Outcome::DryRun) => {}
        Ok(Outcome::Mismatch { expected, actual }) => {
            ui::display_error(&format!(
                "Verification mismatch: expected {}, found {}. Manual inspection required.",
                expected, actual
            ));
            std::process::exit(EXIT_VERIFY_MISMATCH);
        }
        Ok(Outcome::Unverifiable { reason }) => {
            ui::display_error(&format!(
                "Could not verify the published release: {}. Manual inspection required.",
                reason
            ));
            std::process::exit(EXIT_VERIFY_MISMATCH);
        }
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(EXIT_FAILURE);
        }
    }
}

fn run(args: Args) -> Result<Outcome> {
    if let Some(dir) = &args.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Cannot change to directory '{}'", dir))?;
    }

    let mut config: Config =
        config::load_config(args.config.as_deref()).context("Error loading config")?;
    if let Some(file) = args.file {
        config.version_file.path = file;
    }

    let repo = Git2Repository::open(".").context("Not in a git repository")?;

    // Stage 1: read the current released version
    let current =
        release::current_version(&repo).context("Failed to read the current version")?;
    ui::display_current_version(&current);

    // Stage 2: classify the commits since that release
    let messages = repo
        .messages_since_tag(current.tag())
        .context("Failed to read commits since the last release")?;
    ui::display_commit_analysis(&messages);

    let rules = conventional::classification_rules(&config.conventional_commits)
        .context("Invalid classification rules")?;
    let class = match conventional::classify_commits(&messages, &rules) {
        Some(class) => class,
        None => {
            ui::display_success("Nothing to release: no commits since the last release");
            return Ok(Outcome::NothingToRelease);
        }
    };

    // Stage 3: calculate the next version
    let next = current.version().bump(class);
    ui::display_release_plan(class, current.version(), next);

    if args.dry_run {
        ui::display_status("Dry run, nothing was changed:");
        ui::display_success(&format!(
            "  Would rewrite {} = \"{}\" in {}",
            config.version_file.key, next, config.version_file.path
        ));
        ui::display_success(&format!("  Would commit 'chore(release): {}'", next));
        ui::display_success(&format!(
            "  Would create annotated tag '{}'",
            config.tag_name(&next)
        ));
        return Ok(Outcome::DryRun);
    }

    // Stage 4: publish the release
    release::publish(&repo, &config, next, |step| {
        ui::display_status(&format!("Publishing: {}", step));
    })
    .context("Publish failed, completed steps were not rolled back")?;
    ui::display_success(&format!("Published release {}", config.tag_name(&next)));

    // Stage 5: verify the published state
    match release::verify(&repo, next) {
        Ok(Verification::Confirmed) => {
            ui::display_success(&format!("Verified: current version is now {}", next));
            Ok(Outcome::Verified)
        }
        Ok(Verification::Mismatch { actual }) => Ok(Outcome::Mismatch {
            expected: next,
            actual,
        }),
        // The release went out but cannot be re-read; never report success
        Err(e) => Ok(Outcome::Unverifiable {
            reason: e.to_string(),
        }),
    }
}
