//! `oaschecker` CLI binary. All logic lives in the library; this only maps
//! the returned exit code to the process exit status.

fn main() {
    if let Err(code) = oaschecker::cli::run() {
        std::process::exit(code.as_i32());
    }
}
