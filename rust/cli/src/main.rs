fn main() {
    // Tracing goes to stdout, which would corrupt the interactive transcript,
    // so the subscriber is only installed when the operator asks for it.
    if std::env::var_os("RUST_LOG").is_some() {
        pontoon_service::init_logging();
    }
    let code = pontoon_cli::run(
        std::env::args(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    std::process::exit(code);
}
