use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Last timestamp handed out; keeps ids unique when two blocks are created
/// within the same millisecond.
static LAST_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Generate a block id of the form `<type>-<unix millis>`.
///
/// The timestamp part is strictly increasing within a process, so an id is
/// never handed out twice.
pub fn generate_block_id(block_type: &str) -> String {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_MILLIS.load(Ordering::Relaxed);

    loop {
        let next = now.max(last + 1);
        match LAST_MILLIS.compare_exchange_weak(last, next, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return format!("{}-{}", block_type, next),
            Err(actual) => last = actual,
        }
    }
}
