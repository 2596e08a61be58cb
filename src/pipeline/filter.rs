use crate::platform::IncomingMessage;

/// Leading character that marks a message as a command
pub const COMMAND_PREFIX: char = '/';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AutomatedAccount,
    EmptyContent,
    Command,
}

/// Rules applied in order; the first failing one is reported
pub fn check(message: &IncomingMessage) -> Result<(), SkipReason> {
    if message.is_from_automated_account {
        return Err(SkipReason::AutomatedAccount);
    }
    if message.raw_content.trim().is_empty() {
        return Err(SkipReason::EmptyContent);
    }
    // Checked on the raw content, so " /ping" is still translated
    if message.raw_content.starts_with(COMMAND_PREFIX) {
        return Err(SkipReason::Command);
    }
    Ok(())
}

pub fn is_eligible(message: &IncomingMessage) -> bool {
    check(message).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn message(content: &str, bot: bool) -> IncomingMessage {
        IncomingMessage {
            id: "1".into(),
            channel_id: "2".into(),
            author_id: "3".into(),
            author_display_name: "ana".into(),
            author_avatar_url: String::new(),
            is_from_automated_account: bot,
            raw_content: content.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn plain_text_is_eligible() {
        assert!(is_eligible(&message("Bonjour tout le monde", false)));
    }

    #[test]
    fn bots_are_skipped_first() {
        assert_eq!(check(&message("/ping", true)), Err(SkipReason::AutomatedAccount));
        assert_eq!(check(&message("hola", true)), Err(SkipReason::AutomatedAccount));
    }

    #[test]
    fn blank_content_is_skipped() {
        assert_eq!(check(&message("", false)), Err(SkipReason::EmptyContent));
        assert_eq!(check(&message(" \n ", false)), Err(SkipReason::EmptyContent));
    }

    #[test]
    fn commands_are_skipped() {
        assert_eq!(check(&message("/ping", false)), Err(SkipReason::Command));
        assert_eq!(check(&message("/", false)), Err(SkipReason::Command));
    }

    #[test]
    fn prefix_is_not_trimmed() {
        assert!(is_eligible(&message(" /ping", false)));
        assert!(is_eligible(&message("a/b", false)));
    }
}
