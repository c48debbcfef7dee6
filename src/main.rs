use std::process::ExitCode;
use std::sync::Arc;

use fileserver::{logger, server, AppState, CliArgs, Config, StartupError};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let cli = match CliArgs::parse(&args) {
        Ok(cli) => cli,
        Err(StartupError::Usage) => {
            println!("{}", StartupError::Usage);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            logger::log_error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &CliArgs) -> Result<(), StartupError> {
    let cfg = Config::load(cli)?;
    logger::init(&cfg)?;

    // One worker thread per request slot
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(cfg.server.concurrency)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), StartupError> {
    let addr = cfg.get_socket_addr()?;
    let backlog = cfg.server.concurrency;
    let state = Arc::new(AppState::new(cfg)?);

    let listener = server::create_listener(addr, backlog)
        .map_err(|source| StartupError::Bind { addr, source })?;

    logger::log_server_start(&state.root, addr.port(), &state.config);

    server::serve(listener, state, server::shutdown_signal()).await;
    Ok(())
}
