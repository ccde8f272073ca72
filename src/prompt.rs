use dialoguer::Confirm;
use tracing::warn;

/// Blocking dialogs shown to the user.
pub trait UserPrompt: Send + Sync {
    /// Asks a yes/no question. `false` means declined.
    fn confirm(&self, prompt: &str) -> bool;

    /// Shows a message the user has to acknowledge.
    fn notify(&self, message: &str);
}

/// Terminal dialogs. With `assume_yes` every confirmation is accepted
/// without asking.
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl UserPrompt for TerminalPrompt {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        match Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                // No terminal to ask on counts as a refusal.
                warn!(error = %e, "confirmation dialog unavailable");
                false
            }
        }
    }

    fn notify(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assume_yes_accepts_without_a_terminal() {
        let prompt = TerminalPrompt::new(true);
        assert!(prompt.confirm("Are you sure you want to delete this file?"));
    }
}
