use quiz_core::model::QuizOption;

/// Leading icon and remaining text of an option label.
///
/// Labels are written as `"<emoji> <text>"`; an explicit icon on the option wins.
#[must_use]
pub fn split_label(option: &QuizOption) -> (String, String) {
    if let Some(icon) = option.icon() {
        return (icon.to_string(), option.label().to_string());
    }
    match option.label().split_once(' ') {
        Some((icon, text)) => (icon.to_string(), text.trim().to_string()),
        None => (String::new(), option.label().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::OptionId;

    #[test]
    fn splits_leading_emoji() {
        let option = QuizOption::new(OptionId::new("money").unwrap(), "💰 Dinheiro e prosperidade");
        assert_eq!(
            split_label(&option),
            ("💰".to_string(), "Dinheiro e prosperidade".to_string())
        );
    }

    #[test]
    fn single_word_has_no_icon() {
        let option = QuizOption::new(OptionId::new("yes").unwrap(), "Sim");
        assert_eq!(split_label(&option), (String::new(), "Sim".to_string()));
    }

    #[test]
    fn explicit_icon_keeps_full_label() {
        let option = QuizOption::new(OptionId::new("yes").unwrap(), "Sim, acredito").with_icon("🧿");
        assert_eq!(
            split_label(&option),
            ("🧿".to_string(), "Sim, acredito".to_string())
        );
    }
}
