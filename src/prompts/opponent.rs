//! System prompt for the automated opposing debater.

use crate::session::{DebateTopic, Side};

const OPPONENT_SYSTEM_TEMPLATE: &str = r#"You are a debate simulator. The topic is: {topic}.
The user has chosen the {user_side} side, so you should take the {ai_side} side.

Instructions:
1. Identify ONE key point from the user's argument to counter.
2. Provide a single, focused counterargument.
3. Keep your response concise, under 150 characters.
4. Be clear and direct in your reasoning.
5. Maintain a respectful tone.

Example format:
"While [acknowledge point], [counter with specific evidence/reasoning]."
"#;

/// Renders the opponent's system prompt for a topic and the user's side.
pub fn build_opponent_system_prompt(topic: &DebateTopic, user_side: Side) -> String {
    let topic_line = format!("{} ({})", topic.title, topic.description);
    OPPONENT_SYSTEM_TEMPLATE
        .replace("{topic}", &topic_line)
        .replace("{user_side}", user_side.as_str())
        .replace("{ai_side}", user_side.opposite().as_str())
}
