// src/cli/handlers.rs
use console::style;
use inquire::Confirm;
use std::error::Error;

use crate::core::PassGen;
use crate::models::{format_timestamp, GenerationRequest, PasswordRecord};
use crate::utils::{format_time_ago, truncate_string};

use super::CliCommand;

// Options shared by every command
pub struct Context<'a> {
    pub service: &'a PassGen,
    pub owner: Option<&'a str>,
    pub json: bool,
}

pub fn dispatch(ctx: &Context<'_>, command: CliCommand) -> Result<(), Box<dyn Error>> {
    match command {
        CliCommand::Generate { base, length, label, no_save } => {
            let request = GenerationRequest {
                base,
                length,
                label,
                owner: ctx.owner.map(String::from),
            };
            handle_generate(ctx, &request, !no_save)
        }
        CliCommand::List => handle_list(ctx),
        CliCommand::Show { id } => handle_show(ctx, id),
        CliCommand::Delete { id } => handle_delete(ctx, id),
        CliCommand::DeleteAll { yes } => handle_delete_all(ctx, yes, false),
        CliCommand::Table => handle_table(ctx),
    }
}

pub fn handle_generate(ctx: &Context<'_>, request: &GenerationRequest, save: bool) -> Result<(), Box<dyn Error>> {
    if !save {
        let generated = ctx.service.preview(request)?;
        if ctx.json {
            println!("{}", serde_json::to_string_pretty(&generated)?);
        } else {
            println!("🔐 {}", style(&generated.value).green().bold());
        }
        return Ok(());
    }

    let record = ctx.service.generate(request)?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        let source = match &record.base {
            Some(_) => "from base",
            None => "randomly",
        };
        println!("🔐 Password generated {}: {}", source, style(&record.value).green().bold());
        println!("✅ Saved as #{}", record.id);
    }
    Ok(())
}

pub fn handle_list(ctx: &Context<'_>) -> Result<(), Box<dyn Error>> {
    let records = ctx.service.list(ctx.owner)?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("❗ No passwords stored yet.");
        return Ok(());
    }

    for record in &records {
        println!("{}", record_line(record));
    }
    println!("{}", style(format!("{} password(s)", records.len())).dim());
    Ok(())
}

pub fn handle_show(ctx: &Context<'_>, id: i64) -> Result<(), Box<dyn Error>> {
    match ctx.service.get(id, ctx.owner)? {
        Some(record) if ctx.json => println!("{}", serde_json::to_string_pretty(&record)?),
        Some(record) => print_record(&record),
        None if ctx.json => println!("null"),
        None => println!("❗ No password with id {}", id),
    }
    Ok(())
}

pub fn handle_delete(ctx: &Context<'_>, id: i64) -> Result<(), Box<dyn Error>> {
    let removed = ctx.service.delete(id, ctx.owner)?;
    if ctx.json {
        println!("{}", serde_json::json!({ "id": id, "removed": removed }));
    } else if removed {
        println!("✅ Password #{} deleted.", id);
    } else {
        println!("❗ No password with id {} (nothing deleted).", id);
    }
    Ok(())
}

/// How a bulk delete gets its go-ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Given,
    Ask,
    Refused,
}

// Non-interactive JSON callers are scripts and must pass --yes explicitly.
// The menu always has a terminal to ask on, whatever the output format.
pub fn delete_all_confirmation(yes: bool, json: bool, interactive: bool) -> Confirmation {
    if yes {
        Confirmation::Given
    } else if interactive || !json {
        Confirmation::Ask
    } else {
        Confirmation::Refused
    }
}

pub fn handle_delete_all(ctx: &Context<'_>, yes: bool, interactive: bool) -> Result<(), Box<dyn Error>> {
    let confirmed = match delete_all_confirmation(yes, ctx.json, interactive) {
        Confirmation::Given => true,
        Confirmation::Refused => false,
        Confirmation::Ask => {
            let stored = ctx.service.count(ctx.owner)?;
            Confirm::new(&format!("Delete ALL {} stored password(s)?", stored))
                .with_default(false)
                .prompt()?
        }
    };

    if !confirmed {
        if ctx.json {
            println!("{}", serde_json::json!({ "removed": 0, "confirmed": false }));
        } else {
            println!("Nothing deleted.");
        }
        return Ok(());
    }

    let removed = ctx.service.delete_all(ctx.owner)?;
    if ctx.json {
        println!("{}", serde_json::json!({ "removed": removed, "confirmed": true }));
    } else {
        println!("🗑️  {} password(s) deleted.", removed);
    }
    Ok(())
}

pub fn handle_table(ctx: &Context<'_>) -> Result<(), Box<dyn Error>> {
    let table = ctx.service.generator().table();
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(table)?);
    } else if table.is_empty() {
        println!("Substitution table is empty: bases are kept as typed.");
    } else {
        for (c, replacement) in table.iter() {
            println!("  {} → {}", style(c).cyan(), replacement);
        }
    }
    Ok(())
}

pub fn record_line(record: &PasswordRecord) -> String {
    let label = record
        .label
        .as_deref()
        .map(|l| format!(" [{}]", truncate_string(l, 20)))
        .unwrap_or_default();
    format!(
        "#{:<5} {}{}  {}",
        record.id,
        style(&record.value).green(),
        label,
        style(format_timestamp(&record.created_at)).dim()
    )
}

pub fn print_record(record: &PasswordRecord) {
    println!("🆔 ID: {}", record.id);
    println!("🔑 Password: {}", style(&record.value).green().bold());
    if let Some(base) = &record.base {
        println!("🧩 Base: {}", base);
    }
    if let Some(label) = &record.label {
        println!("🏷️  Label: {}", label);
    }
    if let Some(owner) = &record.owner {
        println!("👤 Owner: {}", owner);
    }
    println!(
        "📅 Created: {} ({})",
        format_timestamp(&record.created_at),
        format_time_ago(record.created_at)
    );
}
