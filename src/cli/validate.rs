//! Form validation command

use anyhow::{bail, Result};

use super::Output;
use crate::domain::FormRules;

/// Checks the three form fields and reports the outcome
pub fn run(
    output: &Output,
    rules: &FormRules,
    title: &str,
    description: &str,
    people: &str,
) -> Result<()> {
    output.verbose_ctx(
        "validate",
        &format!("Checking title={:?} description={:?} people={:?}", title, description, people),
    );

    match rules.check(title, description, people) {
        Ok(draft) => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "valid": true,
                    "title": draft.title,
                    "description": draft.description,
                    "people": draft.people,
                }));
            } else {
                println!("valid");
            }
            Ok(())
        }
        Err(err) => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "valid": false,
                    "field": err.field(),
                    "error": err.to_string(),
                }));
            }
            bail!(err)
        }
    }
}
