use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

use super::SessionResponse;

pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.session.check_session().await;
    let note = (!session.is_authenticated()).then_some("not logged in");
    output(&SessionResponse::from_session(session, note), flags.format)
}
