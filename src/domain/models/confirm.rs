use anyhow::Result;

pub trait Confirmer {
    /// Asks the user a yes/no question. Destructive list operations only
    /// proceed on `Ok(true)`.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

pub type ConfirmBox = Box<dyn Confirmer + Send + Sync>;
