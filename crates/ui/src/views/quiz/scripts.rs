pub(super) const QUIZ_ROOT_ID: &str = "quiz-root";

/// Scroll the quiz back to the top and focus the first control of the new step.
pub(super) fn step_entered_script() -> String {
    format!(
        r#"(function() {{
            window.scrollTo({{ top: 0, behavior: "instant" }});
            const root = document.getElementById({QUIZ_ROOT_ID:?});
            if (!root) return;
            root.scrollTop = 0;
            const target = root.querySelector("[data-autofocus]");
            if (target) target.focus();
        }})();"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_script_targets_quiz_root() {
        let js = step_entered_script();
        assert!(js.contains(r#"getElementById("quiz-root")"#));
        assert!(js.contains("scrollTo"));
    }
}
