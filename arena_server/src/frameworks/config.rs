use std::{env, time::Duration};

// Runtime/server settings (not gameplay tuning).

pub const COMMAND_CHANNEL_CAPACITY: usize = 1024;
pub const UPDATE_BROADCAST_CAPACITY: usize = 128;

pub const MATCH_COUNTDOWN: Duration = Duration::from_secs(3);
pub const BOT_FIRE_INTERVAL: Duration = Duration::from_millis(400);

pub fn tick_hz() -> u32 {
    env::var("ARENA_TICK_HZ")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|hz| *hz > 0)
        .unwrap_or(30)
}

pub fn tick_interval() -> Duration {
    Duration::from_secs(1) / tick_hz()
}

pub fn required_players() -> usize {
    env::var("ARENA_REQUIRED_PLAYERS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1)
}

// 0 disables match end.
pub fn match_time_limit() -> Duration {
    let secs = env::var("ARENA_MATCH_TIME_LIMIT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(600);
    Duration::from_secs(secs)
}

pub fn bot_count() -> usize {
    env::var("ARENA_BOT_COUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(2)
}

pub fn rng_seed() -> Option<u64> {
    env::var("ARENA_RNG_SEED").ok().and_then(|v| v.parse().ok())
}
