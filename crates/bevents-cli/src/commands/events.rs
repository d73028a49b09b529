//! events command - bucket notification configurations

use super::CommandContext;
use crate::target::Target;
use bevents_core::{list_notification_configs, ListArgs, NotificationSource, Presenter, Result};
use std::io::{self, Write};
use tracing::debug;

/// `events list ALIAS/BUCKET [TARGET_ID]`
pub async fn list(ctx: &CommandContext, args: &ListArgs) -> Result<()> {
    let target = Target::resolve(&args.location, &ctx.config)?;
    let source = target.notifications()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let count = list_to(&ctx.presenter(), source, &args.arn, &mut out).await?;

    debug!(
        count,
        filtered = args.is_filtered(),
        json = ctx.is_json(),
        "Listed notification configurations"
    );
    Ok(())
}

/// List through `source` and write one output unit per configuration.
///
/// Nothing is written unless the listing succeeds.
pub async fn list_to<W: Write>(
    presenter: &Presenter,
    source: &dyn NotificationSource,
    arn: &str,
    out: &mut W,
) -> Result<usize> {
    let configs = list_notification_configs(source, arn).await?;
    presenter.emit(out, &configs)
}
