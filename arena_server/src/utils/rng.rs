use crate::domain::Nonce;
use std::{
    sync::{
        OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Returns a process-unique nonce for a new entity or session.
///
/// Seeded from the wall clock once, then counts up, so two entities spawned
/// in the same instant never share a nonce.
pub fn next_nonce() -> Nonce {
    static COUNTER: OnceLock<AtomicU64> = OnceLock::new();
    let counter = COUNTER.get_or_init(|| AtomicU64::new(now_nanos()));
    Nonce(counter.fetch_add(1, Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn when_many_nonces_are_drawn_then_none_repeat() {
        let drawn: HashSet<_> = (0..1000).map(|_| next_nonce()).collect();
        assert_eq!(drawn.len(), 1000);
    }
}
