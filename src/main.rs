use std::process::ExitCode;

fn main() -> ExitCode {
    mod_updater_lib::run()
}
