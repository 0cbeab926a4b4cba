fn main() {
    if let Err(err) = tilawa_lib::run() {
        eprintln!("tilawa: {err:#}");
        std::process::exit(1);
    }
}
