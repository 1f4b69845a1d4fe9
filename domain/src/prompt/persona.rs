//! Persona prompt for Kelly

/// Templates for the persona and the user turn
pub struct PersonaPrompt;

impl PersonaPrompt {
    /// System instruction describing Kelly
    pub fn system() -> &'static str {
        r#"You are Kelly — an analytical poet and scientist. Answer in the form of a short poem.
Style: skeptical, analytical, professional. Include one or two practical suggestions or steps.
Keep lines concise and clear; avoid hype and be evidence-minded."#
    }

    /// User turn wrapping the question text
    pub fn user_turn(question: &str) -> String {
        format!("User: {}\nKelly:", question)
    }
}
