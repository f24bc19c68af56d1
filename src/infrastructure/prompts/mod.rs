pub mod assume;
pub mod terminal;

use crate::domain::models::ConfirmBox;

pub struct ConfirmerManager {}

impl ConfirmerManager {
    /// `assume_yes` skips the question entirely, for scripted use.
    pub fn get(assume_yes: bool) -> ConfirmBox {
        if assume_yes {
            return Box::new(assume::Assume(true));
        }

        return Box::<terminal::TerminalConfirmer>::default();
    }
}
