// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt builder: renders a [`UserContext`] into role-tagged messages.
//!
//! Two fixed templates exist: the conversational chat prompt and the
//! proactive suggestion prompt. Rendering is pure; the system message is
//! always first.

use std::fmt::Write as _;

use shift_core::PromptMessage;

use crate::aggregate::UserContext;

/// Literal token the suggestion template mandates when the model has no
/// clear opportunity to suggest anything. Parsed for explicitly, so "model
/// declined" is never conflated with arbitrary reply text.
pub const NO_SUGGESTION_SENTINEL: &str = "NONE";

/// Builds the conversational chat prompt: context-rich system message,
/// then the user's latest message as the final user-role message.
pub fn build_chat_prompt(
    coach_name: &str,
    ctx: &UserContext,
    message: &str,
    last_choice: Option<&str>,
) -> Vec<PromptMessage> {
    let mut system = format!(
        "You are {coach_name}, a warm, practical personal-development coach. \
         Keep replies short and actionable. When offering alternatives, present \
         them as a numbered list (1., 2., 3.) so the user can answer with just \
         the number.\n\nWhat you know about the user today:\n"
    );
    render_context(&mut system, ctx);

    if let Some(choice) = last_choice {
        let _ = writeln!(
            system,
            "\nThe user just picked this option from your previous reply: \"{choice}\". \
             Ground your next answer in that choice."
        );
    }

    vec![PromptMessage::system(system), PromptMessage::user(message)]
}

/// Builds the proactive suggestion prompt.
///
/// The template instructs the model to produce 2-3 sentences, and to reply
/// with the literal sentinel when there is no clear opportunity.
pub fn build_suggestion_prompt(coach_name: &str, ctx: &UserContext) -> Vec<PromptMessage> {
    let mut system = format!(
        "You are {coach_name}, a proactive personal-development coach. Based on \
         the user's current situation below, offer ONE brief, encouraging \
         suggestion (2-3 sentences) for what they could do right now. Only \
         suggest something if there is a clear opportunity - a stagnant goal, \
         an unaddressed hurdle, or a dip in mood. If nothing stands out, reply \
         with exactly {NO_SUGGESTION_SENTINEL} and nothing else.\n\n\
         The user's current situation:\n"
    );
    render_context(&mut system, ctx);

    vec![
        PromptMessage::system(system),
        PromptMessage::user("Do you have a suggestion for me right now?"),
    ]
}

/// Interprets a suggestion reply: the sentinel or an empty reply means
/// the model declined.
pub fn parse_suggestion(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NO_SUGGESTION_SENTINEL) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Renders the context fields as plain text lists.
fn render_context(out: &mut String, ctx: &UserContext) {
    if ctx.recent_moods.is_empty() {
        let _ = writeln!(out, "- No stand-ups recorded yet.");
    } else {
        let moods: Vec<String> = ctx.recent_moods.iter().map(|m| m.to_string()).collect();
        let _ = writeln!(
            out,
            "- Recent mood scores (1-10, newest first): {}",
            moods.join(", ")
        );
    }
    if let Some(wins) = &ctx.recent_wins {
        let _ = writeln!(out, "- Recent wins: {wins}");
    }
    if let Some(focus) = &ctx.current_focus {
        let _ = writeln!(out, "- Today's focus: {focus}");
    }
    if ctx.streak_count > 0 {
        let _ = writeln!(out, "- Stand-up streak: {} days", ctx.streak_count);
    }

    if !ctx.goals.is_empty() {
        let _ = writeln!(out, "- Active goals:");
        for goal in &ctx.goals {
            let _ = writeln!(out, "  - {}", goal.title);
            for sub_goal in &goal.sub_goals {
                let mark = if sub_goal.completed { "done" } else { "open" };
                let _ = writeln!(
                    out,
                    "    - [{mark}] {} ({})",
                    sub_goal.title, sub_goal.frequency
                );
            }
        }
    }

    if !ctx.hurdles.is_empty() {
        let _ = writeln!(out, "- Current hurdles:");
        for hurdle in &ctx.hurdles {
            let _ = writeln!(out, "  - {}", hurdle.title);
            for solution in &hurdle.solutions {
                let mark = if solution.completed { "done" } else { "open" };
                let _ = writeln!(out, "    - [{mark}] {}", solution.title);
            }
        }
    }

    if !ctx.stagnant_goals.is_empty() {
        let _ = writeln!(
            out,
            "- Goals with no progress for over a week: {}",
            ctx.stagnant_goals.join(", ")
        );
    }
    if !ctx.unaddressed_hurdles.is_empty() {
        let _ = writeln!(
            out,
            "- Hurdles with no planned solutions yet: {}",
            ctx.unaddressed_hurdles.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shift_core::Role;

    fn sample_context() -> UserContext {
        UserContext {
            user_id: "u".to_string(),
            recent_moods: vec![4, 6, 7],
            recent_wins: Some("finished the draft".to_string()),
            current_focus: Some("editing".to_string()),
            goals: vec![],
            hurdles: vec![],
            stagnant_goals: vec!["learn piano".to_string()],
            unaddressed_hurdles: vec!["noisy flat".to_string()],
            streak_count: 5,
            last_stand_up_at: None,
        }
    }

    #[test]
    fn chat_prompt_has_system_first_then_user_message() {
        let messages = build_chat_prompt("shift", &sample_context(), "I feel stuck.", None);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "I feel stuck.");
    }

    #[test]
    fn chat_system_message_interpolates_context() {
        let messages = build_chat_prompt("shift", &sample_context(), "hi", None);
        let system = &messages[0].content;
        assert!(system.contains("4, 6, 7"));
        assert!(system.contains("finished the draft"));
        assert!(system.contains("learn piano"));
        assert!(system.contains("noisy flat"));
        assert!(system.contains("Stand-up streak: 5 days"));
    }

    #[test]
    fn chat_prompt_threads_last_choice_when_present() {
        let messages =
            build_chat_prompt("shift", &sample_context(), "ok", Some("Call a friend"));
        assert!(messages[0].content.contains("Call a friend"));

        let without = build_chat_prompt("shift", &sample_context(), "ok", None);
        assert!(!without[0].content.contains("picked this option"));
    }

    #[test]
    fn suggestion_prompt_mandates_the_sentinel() {
        let messages = build_suggestion_prompt("shift", &sample_context());
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains(NO_SUGGESTION_SENTINEL));
    }

    #[test]
    fn empty_context_renders_no_stand_up_line() {
        let ctx = UserContext {
            recent_moods: vec![],
            recent_wins: None,
            current_focus: None,
            streak_count: 0,
            stagnant_goals: vec![],
            unaddressed_hurdles: vec![],
            ..sample_context()
        };
        let messages = build_suggestion_prompt("shift", &ctx);
        assert!(messages[0].content.contains("No stand-ups recorded yet"));
    }

    #[test]
    fn parse_suggestion_maps_sentinel_and_blank_to_none() {
        assert_eq!(parse_suggestion("NONE"), None);
        assert_eq!(parse_suggestion("none"), None);
        assert_eq!(parse_suggestion("  \n"), None);
        assert_eq!(
            parse_suggestion("  Take a short walk.  "),
            Some("Take a short walk.".to_string())
        );
    }
}
