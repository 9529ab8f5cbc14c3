// paratree - delete a directory tree in parallel on Windows

use std::process;

fn main() {
    let code = paratree::run(std::env::args_os().skip(1));
    process::exit(code);
}
