use spot::cli;

pub fn main() {
    let exit_code = cli::process_command();
    std::process::exit(exit_code);
}
