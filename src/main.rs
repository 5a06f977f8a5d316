fn main() {
    if let Err(e) = tapyrus_node_tools::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
