fn main() {
    if let Err(e) = resfinder_cli::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
