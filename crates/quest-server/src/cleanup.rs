use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use quest_core::GameFacade;

/// Background task that prunes expired positions.
///
/// Queries already ignore positions past their TTL; this only keeps the
/// table from growing.
pub async fn run_cleanup_loop(game: Arc<GameFacade>, interval_secs: u64) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        interval.tick().await;

        let game = game.clone();
        match tokio::task::spawn_blocking(move || game.prune_expired_positions()).await {
            Ok(Ok(count)) => {
                if count > 0 {
                    info!("Cleanup: pruned {} expired positions", count);
                }
            }
            Ok(Err(e)) => warn!("Cleanup error: {}", e),
            Err(e) => warn!("Cleanup task failed: {}", e),
        }
    }
}
