//! Canned demo responses.
//!
//! When the completion gateway cannot serve (no API key, network trouble)
//! the voice flow substitutes a response from this lookup. It is a pure
//! function over the input text: the session core never manufactures
//! responses, and nothing here touches conversation history.

use chrono::Local;

const DEMO_RESPONSES: [(&str, &str); 7] = [
    (
        "what's the weather today",
        "I'm a demo assistant, so I can't check real weather. But I'd be happy to help with other tasks!",
    ),
    (
        "help me with my coding project",
        "I'd love to help with coding! You can ask me about JavaScript, TypeScript, React, or Electron development.",
    ),
    (
        "set a reminder for 3 pm",
        "Reminder feature coming soon! For now, you might want to use your system calendar.",
    ),
    (
        "tell me a joke",
        "Why do programmers prefer dark mode? Because light attracts bugs! 🐛",
    ),
    (
        "open my email",
        "I can't open applications yet, but that's a great feature for the next version!",
    ),
    (
        "schedule a meeting",
        "Meeting scheduling would integrate with your calendar app in a full version.",
    ),
    (
        "summarize my tasks",
        "I don't have access to your tasks yet, but I could help organize them if you share them with me!",
    ),
];

/// Looks up a canned response for `input`.
///
/// Matching is case-insensitive substring containment against a fixed set
/// of phrases. The time phrase renders the current local clock; anything
/// unknown gets an echo of what was heard.
pub fn demo_response(input: &str) -> String {
    let lower = input.to_lowercase();

    if lower.contains("what's the current time") {
        return format!(
            "The current time is {}.",
            Local::now().format("%-I:%M:%S %p")
        );
    }

    for (phrase, response) in DEMO_RESPONSES {
        if lower.contains(phrase) {
            return response.to_string();
        }
    }

    format!(
        "I heard you say: \"{input}\". This is a demo version, but in a full implementation, I'd provide a helpful response to your request!"
    )
}
