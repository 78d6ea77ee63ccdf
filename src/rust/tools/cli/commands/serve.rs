use anyhow::Result;

use crate::tools::cli::state::CliContext;

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let logger = ctx.logger();
    let config = ctx.config();
    logger.debug(format!(
        "Engine: {} (timeout {:?}), release tail: {:?}",
        config.engine.binary.display(),
        config.timeout(),
        config.release_tail()
    ));

    let server = ctx.server();
    tokio::select! {
        served = server.serve_stdio() => served,
        _ = tokio::signal::ctrl_c() => {
            logger.warn("Interrupted, shutting down");
            Ok(())
        }
    }
}
