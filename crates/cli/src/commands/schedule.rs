//! Schedule and edit commands - validate and commit a submitted form

use anyhow::Result;
use contentflow_domain::{Priority, RecurrenceRule, Saved, ScheduleForm, StoreError};

use crate::args::{EditArgs, ScheduleArgs};
use crate::render;
use crate::session::{GlobalOpts, Session};

pub async fn execute(args: ScheduleArgs, opts: &GlobalOpts) -> Result<()> {
    let mut session = Session::open(opts).await?;
    let json = args.json;

    let form = form_from_args(args, &session)?;
    let result = session.service.create_from_form(form);
    report(result, json, "Saved")
}

/// Every field is replaced, so omitted flags clear the post's values
pub async fn edit(args: EditArgs, opts: &GlobalOpts) -> Result<()> {
    let mut session = Session::open(opts).await?;
    let json = args.form.json;

    let form = form_from_args(args.form, &session)?;
    let result = session.service.edit_from_form(args.id, form);
    report(result, json, "Updated")
}

fn form_from_args(args: ScheduleArgs, session: &Session) -> Result<ScheduleForm> {
    let priority = match args.priority {
        Some(priority) => priority,
        None => session
            .config
            .scheduling
            .default_priority
            .parse::<Priority>()
            .map_err(anyhow::Error::msg)?,
    };

    Ok(ScheduleForm {
        title: args.title,
        content: args.content,
        platforms: args.platforms,
        scheduled_date: args.date,
        scheduled_time: args.time,
        timezone: Some(
            args.timezone
                .unwrap_or_else(|| session.config.general.default_timezone.clone()),
        ),
        recurring: args.recurring.is_some_and(|rule| rule != RecurrenceRule::None),
        recurrence_rule: args.recurring.unwrap_or_default(),
        recurrence_days: args.days,
        end_date: args.end_date,
        priority,
        tags: args.tags,
        save_as_draft: args.draft,
    })
}

fn report(result: Result<Saved, StoreError>, json: bool, verb: &str) -> Result<()> {
    match result {
        Ok(saved) => {
            if json {
                let output = serde_json::json!({
                    "post": saved.post,
                    "warnings": saved.warnings,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{} post #{} as {}", verb, saved.post.id, saved.post.status);
                println!("  {}", render::post_line(&saved.post));
                for warning in &saved.warnings {
                    println!("  warning: {}", warning);
                }
            }
            Ok(())
        }
        Err(StoreError::Validation(err)) => {
            if json {
                let output = serde_json::json!({
                    "errors": err.issues.iter().map(|issue| serde_json::json!({
                        "code": issue.code(),
                        "message": issue.to_string(),
                    })).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                for issue in &err.issues {
                    eprintln!("  - {} ({})", issue, issue.code());
                }
            }
            Err(err.into())
        }
        Err(e) => Err(e.into()),
    }
}
