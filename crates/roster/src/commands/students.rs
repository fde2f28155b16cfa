//! Student command handlers.

use std::fmt::Write as _;

use tabled::Tabled;

use roster_core::{NewStudentDraft, StudentDirectory, StudentId, StudentRecord};

use crate::cli::{GlobalOpts, StudentsArgs, StudentsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl StudentRow {
    fn new(s: &StudentRecord, color: bool) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            code: s.code.clone(),
            status: output::status_badge(s.status(), color),
        }
    }
}

fn detail(s: &StudentRecord, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:     {}", s.id);
    let _ = writeln!(out, "Name:   {}", s.name);
    let _ = writeln!(out, "Code:   {}", s.code);
    let _ = write!(out, "Status: {}", output::status_badge(s.status(), color));
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    directory: &StudentDirectory,
    args: StudentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output.unwrap_or_default();
    let color = output::should_color(global.color.unwrap_or_default());

    match args.command {
        StudentsCommand::List => {
            let students = directory.list_all().await?;
            let out = output::render_list(
                format,
                &students,
                |s| StudentRow::new(s, color),
                |s| s.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StudentsCommand::Get { id } => {
            let student = directory
                .get_by_id(&StudentId::new(id.as_str()))
                .await
                .map_err(|e| CliError::for_student(e, &id))?;
            let out = output::render_single(
                format,
                &student,
                |s| detail(s, color),
                |s| s.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StudentsCommand::Add { name, code, active } => {
            util::require_present("name", &name)?;
            util::require_present("code", &code)?;

            let draft = NewStudentDraft::new(name, code, active);
            let created = directory.create(&draft).await?;
            let out = output::render_single(
                format,
                &created,
                |s| detail(s, color),
                |s| s.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StudentsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete student '{id}'? This cannot be undone."),
                "students delete",
                global.yes,
            )? {
                return Ok(());
            }
            directory
                .delete_by_id(&StudentId::new(id.as_str()))
                .await
                .map_err(|e| CliError::for_student(e, &id))?;
            if !global.quiet {
                eprintln!("Student '{id}' deleted");
            }
            Ok(())
        }
    }
}
