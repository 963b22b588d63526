use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use just_check::config::{DEFAULT_INSTALL_COMMAND, LOG_ENV_VAR, log_path};
use just_check::install::{InstallCommand, Installer, ProcessInstaller};
use just_check::{CheckError, CheckOptions, CheckOutcome, check_with};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "just-check")]
#[command(
    version,
    about = "Check that node_modules satisfies the versions declared in package.json"
)]
struct Cli {
    /// Install missing dependencies with COMMAND when problems are found
    #[arg(
        long,
        value_name = "COMMAND",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_INSTALL_COMMAND
    )]
    install: Option<String>,

    /// Project directory containing package.json [default: current directory]
    #[arg(long, value_name = "DIR")]
    path: Option<PathBuf>,

    /// Only check dependencies, not devDependencies
    #[arg(long)]
    skip_dev: bool,
}

impl Cli {
    fn into_options(self) -> anyhow::Result<CheckOptions> {
        let path = match self.path {
            Some(path) => match path.to_str() {
                Some(value) => PathBuf::from(strip_quotes(value)),
                None => path,
            },
            None => std::env::current_dir().context("Failed to read the current directory")?,
        };

        // An empty --install= only checks
        let install = self
            .install
            .map(|command| strip_quotes(&command).to_string())
            .filter(|command| !command.trim().is_empty());

        Ok(CheckOptions {
            install,
            check_dev_dependencies: !self.skip_dev,
            path,
        })
    }
}

/// Removes one pair of matching surrounding quotes, left in place when the
/// value was passed without a shell (`--install='npm ci'`)
fn strip_quotes(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|quote| {
            value
                .strip_prefix(*quote)
                .and_then(|rest| rest.strip_suffix(*quote))
        })
        .unwrap_or(value)
}

/// Announces the install on stdout before the installer takes over the terminal
struct AnnouncingInstaller(ProcessInstaller);

impl Installer for AnnouncingInstaller {
    fn install(&self, command: &InstallCommand, project_path: &Path) -> Result<(), CheckError> {
        println!("Installing missing dependencies...");
        self.0.install(command, project_path)
    }
}

/// Initialize file logging when `JUST_CHECK_LOG` is set.
///
/// Logs go to a file so stdout and stderr only carry the report.
fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).ok()?;

    let path = log_path();
    let dir = path.parent()?;
    let file_name = path.file_name()?.to_string_lossy().into_owned();
    std::fs::create_dir_all(dir).ok()?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Some(guard)
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let options = cli.into_options()?;
    let project_path = options
        .project_path()
        .with_context(|| format!("Failed to resolve {}", options.path.display()))?;

    tracing::debug!("Checking with {:?}", options);
    println!("Checking dependencies in {}...", project_path.display());

    match check_with(&options, &AnnouncingInstaller(ProcessInstaller::default()))? {
        CheckOutcome::Satisfied => Ok(ExitCode::SUCCESS),
        CheckOutcome::Installed(_) => {
            println!("Missing dependencies successfully installed.");
            Ok(ExitCode::SUCCESS)
        }
        CheckOutcome::Missing(missing) => {
            eprintln!("Problematic dependencies:");
            for dependency in &missing {
                eprintln!("- {}", dependency);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are reported through clap errors too
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let _guard = init_tracing();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("'npm install --legacy-peer-deps'", "npm install --legacy-peer-deps")]
    #[case("\"yarn install\"", "yarn install")]
    #[case("npm ci", "npm ci")]
    #[case("'mismatched\"", "'mismatched\"")]
    #[case("'", "'")]
    fn strip_quotes_returns_expected(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_quotes(input), expected);
    }

    #[rstest]
    #[case(&["just-check"], None)]
    #[case(&["just-check", "--install"], Some("npm install"))]
    #[case(&["just-check", "--install=yarn"], Some("yarn"))]
    #[case(&["just-check", "--install='npm install --legacy-peer-deps'"], Some("npm install --legacy-peer-deps"))]
    #[case(&["just-check", "--install="], None)]
    fn install_flag_parses(#[case] args: &[&str], #[case] expected: Option<&str>) {
        let options = Cli::try_parse_from(args).unwrap().into_options().unwrap();

        assert_eq!(options.install.as_deref(), expected);
    }

    #[test]
    fn install_flag_does_not_take_next_argument() {
        let cli = Cli::try_parse_from(["just-check", "--install", "--path=/tmp/app"]).unwrap();

        assert_eq!(cli.install.as_deref(), Some(DEFAULT_INSTALL_COMMAND));
        assert_eq!(cli.path, Some(PathBuf::from("/tmp/app")));
    }

    #[test]
    fn skip_dev_disables_dev_dependencies() {
        let options = Cli::try_parse_from(["just-check", "--skip-dev", "--path=/tmp/app"])
            .unwrap()
            .into_options()
            .unwrap();

        assert!(!options.check_dev_dependencies);
        assert_eq!(options.path, PathBuf::from("/tmp/app"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_path_is_kept_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"'/tmp/app\xff'");
        let cli =
            Cli::try_parse_from([OsStr::new("just-check"), OsStr::new("--path"), raw]).unwrap();

        let options = cli.into_options().unwrap();

        assert_eq!(options.path.as_os_str(), raw);
    }

    #[test]
    fn quoted_path_is_unquoted() {
        let options = Cli::try_parse_from(["just-check", "--path='/tmp/my app'"])
            .unwrap()
            .into_options()
            .unwrap();

        assert_eq!(options.path, PathBuf::from("/tmp/my app"));
    }

    #[test]
    fn path_defaults_to_current_directory() {
        let options = Cli::try_parse_from(["just-check"])
            .unwrap()
            .into_options()
            .unwrap();

        assert_eq!(options.path, std::env::current_dir().unwrap());
        assert!(options.check_dev_dependencies);
    }
}
