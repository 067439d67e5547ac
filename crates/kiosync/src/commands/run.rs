//! `kiosync run` -- the sync daemon.

use tokio_util::sync::CancellationToken;
use tracing::info;

use kiosync_core::Controller;

use crate::error::CliError;

pub async fn handle(controller: Controller) -> Result<(), CliError> {
    let cancel = CancellationToken::new();
    let handles = controller.run(&cancel);

    tokio::signal::ctrl_c()
        .await
        .map_err(|err| CliError::Core(kiosync_core::CoreError::Config {
            message: format!("cannot listen for shutdown signal: {err}"),
        }))?;

    info!("shutting down");
    cancel.cancel();
    for handle in handles {
        let _ = handle.await;
    }

    Ok(())
}
