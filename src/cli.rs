// cli.rs — Command-line argument parsing (custom, no clap)
//
// Port of: relmer/RCDir's command_line.rs shape (Windows-style /switch and
// -switch prefixes, tracked via `switch_prefix`) — trimmed to the one
// positional argument and two switches this tool needs (§4.6). A
// declarative argument-parsing crate would be overkill for a two-switch
// tool and would also be a stylistic departure from how the reference
// tooling handles its own, much larger, switch set.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::ehm::AppError;

#[derive(Debug)]
pub struct Args {
    pub root: PathBuf,
    pub quiet: bool,
    pub show_help: bool,
}

const USAGE: &str = concat!(
    "paratree ",
    env!("PARATREE_VERSION_STRING"),
    "\n",
    "usage: paratree <path>\n",
    "  -?, /?   show this help\n",
    "  -q, /q   suppress periodic status lines (final status line still shown)\n",
);

////////////////////////////////////////////////////////////////////////////////
//
//  parse_from
//
//  Parses the process argument list (excluding argv[0]). Exactly one
//  positional argument is required unless -?/--? is present, in which
//  case it short-circuits with show_help=true regardless of other args.
//
////////////////////////////////////////////////////////////////////////////////

pub fn parse_from<I, S>(args: I) -> Result<Args, AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut positionals: Vec<OsString> = Vec::new();
    let mut quiet = false;

    for raw in args {
        let arg = raw.into();
        let text = arg.to_string_lossy();

        match text.as_ref() {
            "-?" | "/?" => {
                return Ok(Args {
                    root: PathBuf::new(),
                    quiet: false,
                    show_help: true,
                });
            }
            "-q" | "/q" => quiet = true,
            _ => positionals.push(arg),
        }
    }

    if positionals.len() != 1 {
        return Err(AppError::InvalidArg(format!(
            "expected exactly one path argument, got {}",
            positionals.len()
        )));
    }

    Ok(Args {
        root: PathBuf::from(positionals.remove(0)),
        quiet,
        show_help: false,
    })
}

pub fn print_usage() {
    eprint!("{USAGE}");
}
