//! Scripted board sessions
//!
//! Reads a JSONL script and applies it to a fresh store, then prints both
//! lists. Each line is one operation:
//!
//! ```text
//! {"op": "create", "title": "Website", "description": "Relaunch the marketing site", "people": 3}
//! {"op": "move", "project": 1, "status": "finished"}
//! {"op": "move", "project": "p-7f2b4c1", "status": "active"}
//! ```
//!
//! `project` is either the 1-based index of a create in this script or a
//! literal project id. Creates pass through form validation first; rejected
//! lines are reported and skipped. Blank lines and lines starting with `#`
//! are ignored.

use std::cell::Cell;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Output;
use crate::domain::{Field, FormRules, Project, ProjectId, ProjectStatus};
use crate::state::ProjectStore;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("failed to read script: {0}")]
    Io(#[from] io::Error),
}

/// One scripted operation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    Create {
        title: String,
        #[serde(default)]
        description: String,
        people: PeopleInput,
    },
    Move {
        project: ProjectRef,
        status: ProjectStatus,
    },
}

/// Headcount as typed into the form, or as a JSON number
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum PeopleInput {
    Number(serde_json::Number),
    Text(String),
}

impl PeopleInput {
    fn as_form_text(&self) -> String {
        match self {
            PeopleInput::Number(n) => n.to_string(),
            PeopleInput::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum ProjectRef {
    Index(usize),
    Id(String),
}

/// A create that failed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub line: usize,
    pub field: Field,
    pub error: String,
}

/// Outcome of a replayed script
#[derive(Debug, Default, Serialize)]
pub struct ReplayReport {
    pub active: Vec<Project>,
    pub finished: Vec<Project>,
    pub rejected: Vec<Rejection>,
    /// Number of store notifications fired during the replay
    pub notifications: usize,
}

/// Applies a script to a fresh store
pub fn apply(reader: impl BufRead, rules: &FormRules) -> Result<ReplayReport, ReplayError> {
    let mut store = ProjectStore::new();
    let notifications = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&notifications);
    store.subscribe(move |_| counter.set(counter.get() + 1));

    let mut created: Vec<ProjectId> = Vec::new();
    let mut rejected = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let step: Step = serde_json::from_str(trimmed).map_err(|e| ReplayError::Parse {
            line: line_no,
            message: e.to_string(),
        })?;

        match step {
            Step::Create {
                title,
                description,
                people,
            } => match rules.check(&title, &description, &people.as_form_text()) {
                Ok(draft) => {
                    created.push(store.create(draft.title, draft.description, draft.people));
                }
                Err(err) => {
                    tracing::debug!(line = line_no, error = %err, "create rejected");
                    rejected.push(Rejection {
                        line: line_no,
                        field: err.field(),
                        error: err.to_string(),
                    });
                }
            },
            Step::Move { project, status } => {
                let id = match project {
                    ProjectRef::Index(n) => n.checked_sub(1).and_then(|i| created.get(i)).cloned(),
                    ProjectRef::Id(s) => s.parse::<ProjectId>().ok(),
                };
                if let Some(id) = id {
                    store.move_project(&id, status);
                }
            }
        }
    }

    Ok(ReplayReport {
        active: store.projects_with_status(ProjectStatus::Active).cloned().collect(),
        finished: store.projects_with_status(ProjectStatus::Finished).cloned().collect(),
        rejected,
        notifications: notifications.get(),
    })
}

/// Replays a script from `file`, or stdin when no file is given
pub fn run(output: &Output, file: Option<&Path>, rules: &FormRules) -> Result<()> {
    let report = match file {
        Some(path) => {
            output.verbose_ctx("replay", &format!("Reading script: {}", path.display()));
            let file = File::open(path)
                .with_context(|| format!("Failed to open script: {}", path.display()))?;
            apply(BufReader::new(file), rules)?
        }
        None => {
            output.verbose_ctx("replay", "Reading script from stdin");
            apply(io::stdin().lock(), rules)?
        }
    };

    output.verbose_ctx(
        "replay",
        &format!("{} notifications fired", report.notifications),
    );

    if output.is_json() {
        output.data(&report);
        return Ok(());
    }

    print_list("ACTIVE PROJECTS", &report.active);
    println!();
    print_list("FINISHED PROJECTS", &report.finished);

    for rejection in &report.rejected {
        output.error(&format!("line {}: {}", rejection.line, rejection.error));
    }

    Ok(())
}

fn print_list(heading: &str, projects: &[Project]) {
    println!("{} ({})", heading, projects.len());
    if projects.is_empty() {
        println!("  (none)");
    }
    for project in projects {
        println!(
            "  {:<10} {} ({})",
            project.id.to_string(),
            project.title,
            project.people_label()
        );
    }
}
