fn main() {
    std::process::exit(sensorbuf::app::startup::startup());
}
