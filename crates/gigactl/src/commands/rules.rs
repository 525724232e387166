//! Automation rule listing.

use tabled::Tabled;

use giga_api::Rule;
use giga_core::Session;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Active")]
    active: String,
}

fn to_row(rule: &Rule) -> RuleRow {
    RuleRow {
        id: rule.id.clone(),
        name: rule.friendly_name.clone().unwrap_or_default(),
        active: match rule.active {
            Some(true) => "yes".into(),
            Some(false) => "no".into(),
            None => "unknown".into(),
        },
    }
}

pub async fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let rules = session.client().list_rules().await?;
    let rendered = output::render_list(&global.output, &rules, to_row, |r| r.id.clone());
    output::print_output(&rendered, global.quiet);
    Ok(())
}
