pub mod cards;
pub mod dto;
pub mod engine;
pub mod equity;
pub mod gameroom;
pub mod hosting;
pub mod lobby;

/// Chip amounts. `i64` rather than the narrower counters some table engines
/// use: a single cash-game table can see pots well past `i16::MAX`.
pub type Chips = i64;

/// Win probability in `[0.0, 1.0]`, as reported by the equity estimator.
pub type Equity = f32;

/// Initialize logging and install a ctrl-c handler that exits the process.
/// Call once from a binary's `main`.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.expect("install ctrl-c handler");
        log::warn!("received ctrl-c, shutting down");
        std::process::exit(0);
    });
}
