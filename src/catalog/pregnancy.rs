use crate::models::PregnancyWeek;

/// Sparse week table, ascending by week
pub static PREGNANCY_WEEKS: [PregnancyWeek; 12] = [
    PregnancyWeek {
        week: 4,
        size_comparison: "Semente de Papoula",
        fruit: "🌰",
        weight: "< 1g",
        length: "1mm",
        description: "Apenas uma bolinha de células implantando no útero.",
        development: "O tubo neural (futuro cérebro e medula) começa a se formar.",
        nutrition: "Ácido Fólico é crucial agora. Coma vegetais verdes escuros, feijão e lentilha.",
        avoid: "Álcool e tabaco devem ser eliminados completamente.",
        health_tip: "Inicie o pré-natal imediatamente para confirmar a gravidez e iniciar suplementação.",
    },
    PregnancyWeek {
        week: 8,
        size_comparison: "Framboesa",
        fruit: "🍇",
        weight: "1g",
        length: "1.6cm",
        description: "Pequenos dedos das mãos e pés começam a se formar.",
        development: "O coração já bate cerca de 150 vezes por minuto.",
        nutrition: "Vitamina B6 pode ajudar com os enjoos. Tente gengibre e pequenas refeições.",
        avoid: "Carnes cruas ou mal passadas (risco de toxoplasmose).",
        health_tip: "Beba muita água, a hidratação ajuda a aumentar o volume sanguíneo necessário.",
    },
    PregnancyWeek {
        week: 12,
        size_comparison: "Limão",
        fruit: "🍋",
        weight: "14g",
        length: "5.4cm",
        description: "O rosto começa a parecer humano e os reflexos funcionam.",
        development: "Os rins começam a produzir urina.",
        nutrition: "Proteínas magras (frango, peixe) são essenciais para o crescimento dos tecidos.",
        avoid: "Queijos não pasteurizados e embutidos crus.",
        health_tip: "Ótimo momento para o ultrassom morfológico do primeiro trimestre.",
    },
    PregnancyWeek {
        week: 16,
        size_comparison: "Abacate",
        fruit: "🥑",
        weight: "100g",
        length: "11.6cm",
        description: "A pele ainda é transparente e o esqueleto endurece.",
        development: "Talvez você comece a sentir pequenos 'borbulhos' (movimentos).",
        nutrition: "Cálcio é vital. Leite, iogurte, ou brócolis e couve para os ossos do bebê.",
        avoid: "Excesso de cafeína. Limite a uma xícara pequena por dia.",
        health_tip: "Sua barriga começa a aparecer. Use hidratantes para prevenir estrias.",
    },
    PregnancyWeek {
        week: 20,
        size_comparison: "Banana",
        fruit: "🍌",
        weight: "300g",
        length: "25cm",
        description: "Metade do caminho! O bebê já engole líquido amniótico.",
        development: "Desenvolve impressões digitais únicas.",
        nutrition: "Ferro é essencial. Carne vermelha magra, espinafre e feijão previnem anemia.",
        avoid: "Peixes com alto teor de mercúrio (cação, peixe-espada).",
        health_tip: "Ultrassom morfológico detalhado geralmente ocorre nesta semana.",
    },
    PregnancyWeek {
        week: 21,
        size_comparison: "Cenoura",
        fruit: "🥕",
        weight: "360g",
        length: "26.7cm",
        description: "Seu bebê já tem ciclos de sono e vigília definidos.",
        development: "O sistema digestivo está amadurecendo rapidamente.",
        nutrition: "Vitamina C (laranja, acerola) ajuda a absorver o ferro dos alimentos.",
        avoid: "Medicamentos sem prescrição médica (Aspirina e anti-inflamatórios).",
        health_tip: "Descanse as pernas para evitar inchaço e varizes.",
    },
    PregnancyWeek {
        week: 24,
        size_comparison: "Milho",
        fruit: "🌽",
        weight: "600g",
        length: "30cm",
        description: "O bebê começa a acumular gordura e o rosto está formado.",
        development: "Os pulmões começam a produzir surfactante.",
        nutrition: "Fibras e água para evitar constipação, comum nesta fase.",
        avoid: "Alimentos muito salgados ou industrializados (aumentam retenção de líquidos).",
        health_tip: "Fique atenta aos movimentos fetais. Eles devem ser frequentes.",
    },
    PregnancyWeek {
        week: 28,
        size_comparison: "Berinjela",
        fruit: "🍆",
        weight: "1kg",
        length: "37cm",
        description: "Ele já abre e fecha os olhos e percebe luz.",
        development: "O cérebro desenvolve bilhões de neurônios.",
        nutrition: "Omega-3 (peixes seguros, chia, nozes) é fundamental para o cérebro do bebê.",
        avoid: "Dormir de barriga para cima (pode comprimir a veia cava). Durma de lado.",
        health_tip: "Comece a contar os chutes do bebê diariamente.",
    },
    PregnancyWeek {
        week: 32,
        size_comparison: "Repolho",
        fruit: "🥬",
        weight: "1.7kg",
        length: "42cm",
        description: "O bebê ocupa quase todo o espaço e chuta forte.",
        development: "As unhas já chegam à ponta dos dedos.",
        nutrition: "Refeições pequenas e frequentes ajudam com a azia e falta de espaço.",
        avoid: "Viagens longas de avião sem autorização médica.",
        health_tip: "Prepare a mala da maternidade. O bebê pode querer chegar antes.",
    },
    PregnancyWeek {
        week: 36,
        size_comparison: "Mamão",
        fruit: "🥣",
        weight: "2.6kg",
        length: "47cm",
        description: "A maioria dos bebês já está de cabeça para baixo.",
        development: "Os pulmões estão quase maduros.",
        nutrition: "Carboidratos complexos para energia extra no final da gestação.",
        avoid: "Atividades físicas de alto impacto ou risco de queda.",
        health_tip: "Consulte o médico semanalmente a partir de agora.",
    },
    PregnancyWeek {
        week: 38,
        size_comparison: "Abóbora",
        fruit: "🎃",
        weight: "3.1kg",
        length: "49cm",
        description: "O lanugo (pelos finos) está desaparecendo.",
        development: "Pronto para nascer a qualquer momento.",
        nutrition: "Mantenha-se muito bem hidratada para o trabalho de parto.",
        avoid: "Estresse excessivo. Tente relaxar e focar na respiração.",
        health_tip: "Fique atenta aos sinais de trabalho de parto (contrações rítmicas).",
    },
    PregnancyWeek {
        week: 40,
        size_comparison: "Melancia",
        fruit: "🍉",
        weight: "3.4kg",
        length: "51cm",
        description: "Pronto para nascer a qualquer momento!",
        development: "Todos os sistemas estão prontos para o mundo exterior.",
        nutrition: "Coma alimentos leves de fácil digestão.",
        avoid: "Ficar longe do hospital ou de seu suporte de parto.",
        health_tip: "Parabéns! Seu bebê está pronto. Confie no seu corpo.",
    },
];
