use crate::models::Recipe;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[must_use]
pub fn colic_tea() -> Recipe {
    Recipe {
        title: "Chazinho Anti-Cólica Natural".to_string(),
        description: "Uma infusão suave para acalmar a barriguinha do bebê.".to_string(),
        ingredients: strings(&[
            "1 colher de chá de funcho",
            "1 xícara de água fervente",
            "Muito amor",
        ]),
        instructions: strings(&[
            "Ferva a água",
            "Adicione o funcho",
            "Aguarde 5 min",
            "Coe e espere amornar bem",
        ]),
        benefits: "O funcho ajuda a relaxar o intestino e eliminar gases.".to_string(),
    }
}

#[must_use]
pub fn sleep_ritual() -> Recipe {
    Recipe {
        title: "Ritual do Soninho (Chá de Camomila)".to_string(),
        description: "Bebida relaxante para mãe e bebê (se já introduzido).".to_string(),
        ingredients: strings(&["Flores de camomila secas", "Água filtrada"]),
        instructions: strings(&[
            "Faça a infusão por 10 min",
            "Deixe esfriar",
            "Ofereça em temperatura ambiente",
        ]),
        benefits: "Propriedades calmantes naturais que induzem o sono.".to_string(),
    }
}

#[must_use]
pub fn milk_booster() -> Recipe {
    Recipe {
        title: "Suco Turbinador de Leite".to_string(),
        description: "Hidratação potente para mamães que amamentam.".to_string(),
        ingredients: strings(&["Água de coco", "Uva verde", "Hortelã"]),
        instructions: strings(&[
            "Bata tudo no liquidificador",
            "Beba sem coar para aproveitar as fibras",
        ]),
        benefits: "Aumenta a hidratação e fornece energia rápida.".to_string(),
    }
}

/// Keyword routing into the bundled recipes. Case-insensitive substring match.
#[must_use]
pub fn match_keywords(query: &str) -> Option<Recipe> {
    let query = query.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| query.contains(w));

    if has(&["cólica", "colica"]) {
        Some(colic_tea())
    } else if has(&["dormir", "sono"]) {
        Some(sleep_ritual())
    } else if has(&["leite", "amamentar"]) {
        Some(milk_booster())
    } else {
        None
    }
}

/// Suggestions offered under the recipe search box
pub const QUICK_TAGS: [&str; 3] = ["Dormir melhor", "Cólica do bebê", "Aumentar leite"];
