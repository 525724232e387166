//! Registered push-notification channel listing.

use tabled::Tabled;

use giga_api::Channel;
use giga_core::Session;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ChannelRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn to_row(channel: &Channel) -> ChannelRow {
    ChannelRow {
        id: channel.id.clone().unwrap_or_default(),
        name: channel.friendly_name.clone().unwrap_or_default(),
        status: channel.status.clone().unwrap_or_else(|| "unknown".into()),
    }
}

pub async fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let reply = session.client().list_channels().await?;
    let channels: Vec<Channel> = reply.all().cloned().collect();
    let rendered = output::render_list(&global.output, &channels, to_row, |c| {
        c.id.clone().unwrap_or_default()
    });
    output::print_output(&rendered, global.quiet);
    Ok(())
}
