/// Delay between poll cycles.
pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 10_000;

pub(crate) const DEFAULT_STAR_PREFIX: &str = board_protocol::DEFAULT_STAR_PREFIX;
