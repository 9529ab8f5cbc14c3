// paratree - delete a directory tree in parallel on Windows

pub mod cli;
pub mod config;
pub mod counters;
pub mod ehm;
pub mod enumerator;
pub mod environment_provider;
pub mod errors;
pub mod job_queue;
pub mod logging;
pub mod node;
pub mod supervisor;
pub mod termination;
pub mod worker;

/// Main entry point for the library. Parses arguments, resolves tuning
/// knobs from the environment, and runs the supervisor. Returns the
/// process exit code: 0 success, 1 some entries failed, 2/3/4 startup
/// errors (see ehm::AppError::exit_code).
pub fn run<I, S>(args: I) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString>,
{
    let parsed = match cli::parse_from(args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            cli::print_usage();
            return e.exit_code();
        }
    };

    if parsed.show_help {
        cli::print_usage();
        return 0;
    }

    let provider = environment_provider::DefaultEnvironmentProvider;
    let config = config::Config::from_env(&provider);

    match supervisor::run(&parsed.root, config, parsed.quiet) {
        Ok(outcome) => {
            if outcome.succeeded() {
                0
            } else {
                1
            }
        }
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    }
}
