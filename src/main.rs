//! worktracker main entrypoint.

fn main() {
    std::process::exit(worktracker::run());
}
