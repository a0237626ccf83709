use anyhow::Result;
use clap::Args;
use recpanel_core::{Action, FormField, Panel, Recommendation};
use serde::Serialize;

use crate::commands::{print_form, print_json, print_notice, run_action, Context};

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub product_id: String,
    #[arg(long)]
    pub rec_product_id: String,
    /// Type label (Generic, BoughtTogether, CrossSell, UpSell, Complementary) or code 0-4
    #[arg(long = "type")]
    pub rec_type: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: String,
    #[arg(long)]
    pub product_id: String,
    #[arg(long)]
    pub rec_product_id: String,
    #[arg(long = "type")]
    pub rec_type: Option<String>,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    pub id: String,
}

#[derive(Debug, Serialize)]
struct RecordOutput<'a> {
    message: &'a str,
    record: Option<&'a Recommendation>,
}

pub fn create(ctx: &Context<'_>, args: CreateArgs) -> Result<()> {
    let mut panel = Panel::new();
    fill_draft(
        &mut panel,
        args.product_id,
        args.rec_product_id,
        args.rec_type,
    );
    run_action(ctx, &mut panel, Action::Create)?;
    report(ctx, &panel)
}

pub fn update(ctx: &Context<'_>, args: UpdateArgs) -> Result<()> {
    let mut panel = Panel::new();
    panel.form_mut().set(FormField::Id, args.id);
    fill_draft(
        &mut panel,
        args.product_id,
        args.rec_product_id,
        args.rec_type,
    );
    run_action(ctx, &mut panel, Action::Update)?;
    report(ctx, &panel)
}

pub fn get(ctx: &Context<'_>, args: IdArgs) -> Result<()> {
    run_by_id(ctx, args, Action::Retrieve)
}

pub fn delete(ctx: &Context<'_>, args: IdArgs) -> Result<()> {
    let mut panel = Panel::new();
    panel.form_mut().set(FormField::Id, args.id);
    run_action(ctx, &mut panel, Action::Delete)?;
    if ctx.json {
        let message = panel.notice().map(|notice| notice.text.as_str()).unwrap_or("");
        return print_json(&RecordOutput {
            message,
            record: None,
        });
    }
    print_notice(&panel);
    Ok(())
}

pub fn interested(ctx: &Context<'_>, args: IdArgs) -> Result<()> {
    run_by_id(ctx, args, Action::IncrementInterest)
}

fn run_by_id(ctx: &Context<'_>, args: IdArgs, action: Action) -> Result<()> {
    let mut panel = Panel::new();
    panel.form_mut().set(FormField::Id, args.id);
    run_action(ctx, &mut panel, action)?;
    report(ctx, &panel)
}

fn fill_draft(
    panel: &mut Panel,
    product_id: String,
    rec_product_id: String,
    rec_type: Option<String>,
) {
    let form = panel.form_mut();
    form.set(FormField::ProductId, product_id);
    form.set(FormField::RecProductId, rec_product_id);
    form.set(FormField::Type, rec_type.unwrap_or_default());
}

fn report(ctx: &Context<'_>, panel: &Panel) -> Result<()> {
    if ctx.json {
        let message = panel.notice().map(|notice| notice.text.as_str()).unwrap_or("");
        return print_json(&RecordOutput {
            message,
            record: panel.form().current(),
        });
    }
    print_notice(panel);
    print_form(panel);
    Ok(())
}
