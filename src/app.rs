//! Screens of the app and the dashboard that routes between them

use serde::{Deserialize, Serialize};

use crate::models::SpecialistType;

/// Which screen is showing. Only the chat screen carries data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "view", content = "specialist", rename_all = "snake_case")]
pub enum AppView {
    #[default]
    Dashboard,
    Pregnancy,
    Consultant(SpecialistType),
    CryAnalyzer,
    Sounds,
    Maps,
    Recipes,
}

impl AppView {
    /// Every feature screen goes back to the dashboard
    #[must_use]
    pub fn back(self) -> AppView {
        AppView::Dashboard
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEntry {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub target: AppView,
}

pub const GREETING: &str = "Como podemos ajudar hoje?";
pub const DAILY_TIP: &str =
    "Tire 5 minutos para você hoje. Uma mãe descansada cuida ainda melhor.";

#[must_use]
pub fn dashboard() -> Vec<DashboardEntry> {
    vec![
        DashboardEntry {
            title: "Bebê 3D Realista",
            subtitle: "Acompanhe a evolução semanal",
            target: AppView::Pregnancy,
        },
        DashboardEntry {
            title: "Pediatra",
            subtitle: "Sintomas e saúde",
            target: AppView::Consultant(SpecialistType::Pediatrician),
        },
        DashboardEntry {
            title: "Psicóloga",
            subtitle: "Apoio emocional",
            target: AppView::Consultant(SpecialistType::Psychologist),
        },
        DashboardEntry {
            title: "Nutricionista",
            subtitle: "Alimentação",
            target: AppView::Consultant(SpecialistType::Nutritionist),
        },
        DashboardEntry {
            title: "Tradutor de Choro",
            subtitle: "Identificar motivo",
            target: AppView::CryAnalyzer,
        },
        DashboardEntry {
            title: "Sons de Ninar",
            subtitle: "Ruído branco e mais",
            target: AppView::Sounds,
        },
        DashboardEntry {
            title: "Locais Úteis & Emergência",
            subtitle: "Encontre farmácias e hospitais próximos",
            target: AppView::Maps,
        },
        DashboardEntry {
            title: "Receitas",
            subtitle: "Sugestões para mamãe e bebê",
            target: AppView::Recipes,
        },
    ]
}
