// src/cli/menu.rs
use inquire::{Confirm, InquireError, Select, Text};
use std::error::Error;

use crate::models::GenerationRequest;

use super::handlers::{self, record_line, Context};

const GENERATE: &str = "🔐  Generate password";
const LIST: &str = "📋  List passwords";
const VIEW: &str = "🔍  View password";
const DELETE: &str = "🗑️  Delete password";
const DELETE_ALL: &str = "🧹  Delete all passwords";
const TABLE: &str = "🔤  Show substitution table";
const EXIT: &str = "❌  Exit";

pub fn run_cli_menu(ctx: &Context<'_>, default_length: usize) -> Result<(), Box<dyn Error>> {
    println!("╔══════════════════════════════════════╗");
    println!("║         🦀 PASSWORD GENERATOR        ║");
    println!("╚══════════════════════════════════════╝");

    loop {
        let options = vec![GENERATE, LIST, VIEW, DELETE, DELETE_ALL, TABLE, EXIT];
        let selection = match Select::new("Choose an option:", options)
            .with_help_message("Use arrow keys to navigate, Enter to select. Esc to exit.")
            .prompt_skippable()
        {
            Ok(selection) => selection,
            Err(InquireError::OperationInterrupted) => None,
            Err(e) => return Err(e.into()),
        };

        let result = match selection {
            Some(GENERATE) => generate(ctx, default_length),
            Some(LIST) => handlers::handle_list(ctx),
            Some(VIEW) => pick_record(ctx, "Select a password to view:")
                .and_then(|id| id.map_or(Ok(()), |id| handlers::handle_show(ctx, id))),
            Some(DELETE) => delete_one(ctx),
            Some(DELETE_ALL) => handlers::handle_delete_all(ctx, false, true),
            Some(TABLE) => handlers::handle_table(ctx),
            Some(_) | None => break,
        };

        if let Err(e) = result {
            // A cancelled prompt returns to the menu; anything else is reported
            match e.downcast_ref::<InquireError>() {
                Some(InquireError::OperationCanceled) => continue,
                Some(InquireError::OperationInterrupted) => break,
                _ => println!("❌ {}", e),
            }
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}

fn generate(ctx: &Context<'_>, default_length: usize) -> Result<(), Box<dyn Error>> {
    let base = Text::new("Password base (leave empty for a random password):").prompt()?;

    let length = if base.is_empty() {
        let text = Text::new("Number of characters:")
            .with_default(&default_length.to_string())
            .prompt()?;
        Some(
            text.trim()
                .parse::<i64>()
                .map_err(|_| format!("'{}' is not a number", text.trim()))?,
        )
    } else {
        None
    };

    let label = Text::new("Label (optional):").prompt()?;
    let request = GenerationRequest {
        base: Some(base),
        length,
        label: Some(label).filter(|l| !l.trim().is_empty()),
        owner: ctx.owner.map(String::from),
    };

    handlers::handle_generate(ctx, &request, true)
}

fn delete_one(ctx: &Context<'_>) -> Result<(), Box<dyn Error>> {
    let Some(id) = pick_record(ctx, "Select a password to delete:")? else {
        return Ok(());
    };

    let confirm = Confirm::new(&format!("Are you sure you want to delete password #{}?", id))
        .with_default(false)
        .prompt()?;

    if confirm {
        handlers::handle_delete(ctx, id)?;
    }
    Ok(())
}

fn pick_record(ctx: &Context<'_>, prompt: &str) -> Result<Option<i64>, Box<dyn Error>> {
    let records = ctx.service.list(ctx.owner)?;
    if records.is_empty() {
        println!("❗ No passwords stored yet.");
        return Ok(None);
    }

    let display: Vec<String> = records.iter().map(record_line).collect();
    let selection = Select::new(prompt, display.clone())
        .with_page_size(20)
        .prompt()?;

    Ok(display
        .iter()
        .position(|s| s == &selection)
        .map(|idx| records[idx].id))
}
