//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    if let Err(err) = skyroute_cli::run() {
        eprintln!("skyroute: {err}");
        std::process::exit(1);
    }
}
