//! Bundled offline data
//!
//! Everything here is served when the generative AI service is unreachable,
//! and some of it (sounds, pregnancy weeks, comfort phrases) is the only
//! source for its feature.

pub mod places;
pub mod pregnancy;
pub mod recipes;
pub mod sounds;

pub use places::fallback_places;
pub use pregnancy::PREGNANCY_WEEKS;
pub use recipes::QUICK_TAGS;
pub use sounds::SOUND_TRACKS;

/// Phrases spoken periodically during guided navigation
pub const COMFORT_PHRASES: [&str; 6] = [
    "Calma pais, respirem fundo. O bebê sente a segurança de vocês.",
    "Vocês estão fazendo um ótimo trabalho. Já estamos chegando.",
    "Mantenha a atenção no trânsito, eu estou monitorando o trajeto.",
    "Vai ficar tudo bem. A equipe médica já está preparada para receber vocês.",
    "Seu amor é o melhor remédio agora. Continue transmitindo calma.",
    "Estamos na rota mais rápida e segura. Confie no processo.",
];

/// Spoken once when guided navigation starts
pub const NAVIGATION_GREETING: &str = "Calma pais, seu bebê vai ficar bem. Deixe comigo que vou traçar a rota mais próxima com segurança. Apertem os cintos e vamos lá.";
