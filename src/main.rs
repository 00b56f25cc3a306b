use curlkit::core;
use curlkit::status::ExitStatus;

/// Entry point, returns ExitStatus directly (it implements Termination)
fn main() -> ExitStatus {
    let args: Vec<String> = std::env::args().collect();
    core::run(args)
}
