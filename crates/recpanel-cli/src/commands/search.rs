use anyhow::Result;
use clap::Args;
use recpanel_core::{Action, FormField, Outcome, Panel};

use crate::commands::{print_json, run_action, Context};

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(long)]
    pub product_id: Option<String>,
    #[arg(long)]
    pub rec_product_id: Option<String>,
    /// Type label or code; sent to the server as the code
    #[arg(long = "type")]
    pub rec_type: Option<String>,
}

pub fn search(ctx: &Context<'_>, args: SearchArgs) -> Result<()> {
    let mut panel = Panel::new();
    let form = panel.form_mut();
    form.set(FormField::ProductId, args.product_id.unwrap_or_default());
    form.set(
        FormField::RecProductId,
        args.rec_product_id.unwrap_or_default(),
    );
    form.set(FormField::Type, args.rec_type.unwrap_or_default());

    let outcome = run_action(ctx, &mut panel, Action::Search)?;

    if ctx.json {
        let records = match outcome {
            Outcome::Records(records) => records,
            _ => Vec::new(),
        };
        return print_json(&records);
    }

    match panel.results() {
        Some(table) if !table.is_empty() => print!("{}", table.to_text()),
        _ => println!("No recommendations found."),
    }
    Ok(())
}
