use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use crate::domain::models::Confirmer;

#[derive(Default)]
pub struct TerminalConfirmer {}

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let res = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact_opt()?
            .unwrap_or(false);

        return Ok(res);
    }
}
