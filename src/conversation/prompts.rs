//! Pre-translated prompt tables for the planning conversation.

use serde::{Deserialize, Serialize};

use crate::config::Language;

/// Identifies one assistant prompt, independent of language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKey {
    Greeting,
    AskDestination,
    AskBudget,
    AskDates,
    AskTravelers,
    AskInterests,
    Complete,
}

impl PromptKey {
    pub const ALL: [PromptKey; 7] = [
        Self::Greeting,
        Self::AskDestination,
        Self::AskBudget,
        Self::AskDates,
        Self::AskTravelers,
        Self::AskInterests,
        Self::Complete,
    ];
}

/// Look up the text for `key` in the table for `language`.
pub fn prompt_text(key: PromptKey, language: Language) -> &'static str {
    match language {
        Language::En => english(key),
        Language::Es => spanish(key),
        Language::Fr => french(key),
    }
}

fn english(key: PromptKey) -> &'static str {
    match key {
        PromptKey::Greeting => {
            "Hi! I'm your JetSet travel assistant. Say hello whenever you're ready to plan your next trip."
        }
        PromptKey::AskDestination => "Where would you like to go?",
        PromptKey::AskBudget => {
            "What's your budget like? Budget-friendly, moderate, or luxury?"
        }
        PromptKey::AskDates => "When are you planning to travel?",
        PromptKey::AskTravelers => {
            "Who's coming along? Solo, with a partner, with family, or with friends?"
        }
        PromptKey::AskInterests => {
            "What are you interested in? List a few things, like food, museums, or hiking."
        }
        PromptKey::Complete => {
            "Thanks! I have everything I need. Building your traveler profile now."
        }
    }
}

fn spanish(key: PromptKey) -> &'static str {
    match key {
        PromptKey::Greeting => {
            "¡Hola! Soy tu asistente de viajes JetSet. Salúdame cuando quieras planear tu próximo viaje."
        }
        PromptKey::AskDestination => "¿A dónde te gustaría ir?",
        PromptKey::AskBudget => "¿Cuál es tu presupuesto? ¿Económico, moderado o de lujo?",
        PromptKey::AskDates => "¿Cuándo piensas viajar?",
        PromptKey::AskTravelers => {
            "¿Quién te acompaña? ¿Viajas solo, en pareja, en familia o con amigos?"
        }
        PromptKey::AskInterests => {
            "¿Qué te interesa? Menciona algunas cosas, como comida, museos o senderismo."
        }
        PromptKey::Complete => {
            "¡Gracias! Tengo todo lo que necesito. Estoy creando tu perfil de viajero."
        }
    }
}

fn french(key: PromptKey) -> &'static str {
    match key {
        PromptKey::Greeting => {
            "Bonjour ! Je suis votre assistant de voyage JetSet. Dites bonjour quand vous êtes prêt à planifier votre prochain voyage."
        }
        PromptKey::AskDestination => "Où aimeriez-vous aller ?",
        PromptKey::AskBudget => "Quel est votre budget ? Économique, modéré ou luxe ?",
        PromptKey::AskDates => "Quand prévoyez-vous de voyager ?",
        PromptKey::AskTravelers => {
            "Qui vous accompagne ? Seul, en couple, en famille ou entre amis ?"
        }
        PromptKey::AskInterests => {
            "Qu'est-ce qui vous intéresse ? Citez quelques exemples : gastronomie, musées, randonnée."
        }
        PromptKey::Complete => {
            "Merci ! J'ai tout ce qu'il me faut. Je crée votre profil de voyageur."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_covers_every_key() {
        for language in [Language::En, Language::Es, Language::Fr] {
            for key in PromptKey::ALL {
                assert!(
                    !prompt_text(key, language).trim().is_empty(),
                    "missing {key:?} for {language}"
                );
            }
        }
    }

    #[test]
    fn tables_are_actually_translated() {
        let en = prompt_text(PromptKey::AskDestination, Language::En);
        assert_ne!(en, prompt_text(PromptKey::AskDestination, Language::Es));
        assert_ne!(en, prompt_text(PromptKey::AskDestination, Language::Fr));
    }

    #[test]
    fn unknown_code_resolves_to_english_table() {
        let language = Language::from_code("xx");
        assert_eq!(
            prompt_text(PromptKey::AskDates, language),
            "When are you planning to travel?"
        );
    }

    #[test]
    fn prompt_key_serializes_snake_case() {
        let json = serde_json::to_string(&PromptKey::AskDestination).unwrap();
        assert_eq!(json, "\"ask_destination\"");
    }
}
