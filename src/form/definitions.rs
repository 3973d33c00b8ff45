use super::schema::{Bound, Choice, ChoiceWidget, FieldDefinition, FieldKind};
use super::{FormDefinition, FormStep};

pub const EMAIL: &str = "Email";
pub const GENDER: &str = "Gênero e Orientação Sexual";
pub const GENDER_OTHER: &str = "Gênero e Orientação Sexual (Especifique)";
pub const ETHNICITY: &str = "Raça/Etnia";
pub const ETHNICITY_OTHER: &str = "Raça/Etnia (Especifique)";
pub const REGION: &str = "Região";
pub const BIRTH_YEAR: &str = "Ano de Nascimento";
pub const PORTFOLIO: &str = "PortfolioLattes";
pub const ODS_IDENTIFICATION: &str = "ODS Identificação";
pub const ODS_PROJECTS: &str = "ODS Projetos";

pub const REQUIRED: &str = "Este campo é obrigatório";
pub const PICK_ONE: &str = "Selecione uma opção";
pub const PICK_ODS: &str = "Selecione pelo menos um ODS";

/// The 17 Sustainable Development Goals, in UN order.
pub const ODS_OPTIONS: &[&str] = &[
    "Erradicação da Pobreza",
    "Fome Zero e Agricultura Sustentável",
    "Saúde e Bem-Estar",
    "Educação de Qualidade",
    "Igualdade de Gênero",
    "Água Potável e Saneamento",
    "Energia Limpa e Acessível",
    "Trabalho Decente e Crescimento Econômico",
    "Indústria, Inovação e Infraestrutura",
    "Redução das Desigualdades",
    "Cidades e Comunidades Sustentáveis",
    "Consumo e Produção Responsáveis",
    "Ação Contra a Mudança Global do Clima",
    "Vida na Água",
    "Vida Terrestre",
    "Paz, Justiça e Instituições Eficazes",
    "Parcerias e Meios de Implementação",
];

pub const MOTIVATION_OPTIONS: &[&str] = &[
    "Tenho curiosidade em saber como funciona um núcleo de desenvolvimento de roteiro.",
    "Quero aprimorar minhas habilidades de escrita e pesquisa dentro do núcleo.",
    "Conhecer pessoas do meio.",
    "Já participei de outro(s) núcleo(s) anteriormente e adoro o processo de desenvolvimento.",
    "Possuo uma ideia de projeto/pesquisa que poderá ser enriquecido pelo núcleo.",
];

const WRITER_TYPES: &[Choice] = &[Choice::plain("Individual"), Choice::plain("Coletivo")];

const YES_NO: &[Choice] = &[Choice::plain("Sim"), Choice::plain("Não")];

const ETHNICITIES: &[Choice] = &[
    Choice::plain("Branco"),
    Choice::plain("Preto"),
    Choice::plain("Pardo"),
    Choice::plain("Indígena"),
    Choice::plain("Amarelo"),
    Choice::plain("Outro"),
];

pub const GENDERS: &[Choice] = &[
    Choice::new("homem_cis_hetero", "Homem Cisgênero Heterossexual"),
    Choice::new("mulher_cis_hetero", "Mulher Cisgênero Heterossexual"),
    Choice::new("homem_cis_lgbtqia", "Homem Cisgênero LGBTQIA+"),
    Choice::new("mulher_cis_lgbtqia", "Mulher Cisgênero LGBTQIA+"),
    Choice::new("homem_trans_hetero", "Homem Transgênero Heterossexual"),
    Choice::new("mulher_trans_hetero", "Mulher Transgênero Heterossexual"),
    Choice::new("homem_trans_lgbtqia", "Homem Transgênero LGBTQIA+"),
    Choice::new("mulher_trans_lgbtqia", "Mulher Transgênero LGBTQIA+"),
    Choice::new("nao_binario", "Não-binário"),
    Choice::new("outro", "Outro"),
];

pub const REGIONS: &[Choice] = &[
    Choice::plain("Norte"),
    Choice::plain("Noroeste"),
    Choice::plain("Oeste"),
    Choice::plain("Sudoeste"),
    Choice::plain("Centro-Sul"),
    Choice::plain("Centro-Oriental"),
    Choice::new("Metropolitana-de-Curitiba", "Metropolitana de Curitiba"),
    Choice::plain("Centro-Ocidental"),
    Choice::plain("Sudeste"),
    Choice::new("Nao-mora", "Não moro no Paraná (eliminatória)"),
];

const EXPERIENCE_LEVELS: &[Choice] = &[
    Choice::new("Iniciante", "Roteirista Iniciante (nenhum roteiro escrito)"),
    Choice::new(
        "Não Iniciante",
        "Roteirista Não Iniciante (com pelo menos um roteiro escrito)",
    ),
    Choice::new(
        "Experiente",
        "Roteirista Experiente (com pelo menos um roteiro produzido)",
    ),
    Choice::new("Outras funções no audiovisual", "Outras Funções no Audiovisual"),
];

const STEP_ONE_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new(EMAIL, "Email", FieldKind::Email)
        .required("Email inválido")
        .placeholder("Insira o melhor email para falar com você")
        .section("INFORMAÇÕES PESSOAIS"),
    FieldDefinition::new("Nome Social", "Nome Social", FieldKind::Text)
        .required("Nome social é obrigatório")
        .placeholder("Seu Nome"),
    FieldDefinition::new(
        "Tipo de Roteirista",
        "Tipo de Roteirista",
        FieldKind::SingleChoice { choices: WRITER_TYPES, widget: ChoiceWidget::Radio },
    )
    .required("Selecione o tipo de roteirista"),
    FieldDefinition::new(
        BIRTH_YEAR,
        "Ano de Nascimento",
        FieldKind::Number { min: Bound::Fixed(1900), max: Bound::CurrentYear },
    )
    .required("Informe o ano de nascimento")
    .placeholder("Indique o ano em que nasceu"),
    FieldDefinition::new(
        ETHNICITY,
        "Raça/Etnia",
        FieldKind::SingleChoice { choices: ETHNICITIES, widget: ChoiceWidget::Select },
    )
    .required(PICK_ONE),
    FieldDefinition::new(ETHNICITY_OTHER, "Especifique Raça/Etnia", FieldKind::Text)
        .placeholder("Especifique")
        .shown_when(ETHNICITY, "Outro"),
    FieldDefinition::new(
        GENDER,
        "Gênero e Orientação Sexual",
        FieldKind::SingleChoice { choices: GENDERS, widget: ChoiceWidget::Select },
    )
    .required("Selecione uma opção de gênero e orientação sexual"),
    FieldDefinition::new(
        GENDER_OTHER,
        "Especifique Gênero e Orientação Sexual",
        FieldKind::Text,
    )
    .placeholder("Especifique")
    .shown_when(GENDER, "outro"),
    FieldDefinition::new(
        "PCD",
        "Pessoa com Deficiência (PCD)",
        FieldKind::SingleChoice { choices: YES_NO, widget: ChoiceWidget::Radio },
    )
    .required(PICK_ONE),
    FieldDefinition::new("Recursos A11y", "Recursos de Acessibilidade", FieldKind::LongText)
        .placeholder(
            "Que tipo de recurso de acessibilidade você precisaria para viabilizar sua participação no núcleo?",
        ),
    FieldDefinition::new(
        REGION,
        "Região",
        FieldKind::SingleChoice { choices: REGIONS, widget: ChoiceWidget::Select },
    )
    .required("Selecione uma região"),
    FieldDefinition::new("Formação Acadêmica", "Formação Acadêmica", FieldKind::LongText)
        .required("Formação acadêmica é obrigatória")
        .placeholder("Descreva sua formação acadêmica que achar relevante"),
    FieldDefinition::new("Cursos e Certificados", "Cursos e Certificados", FieldKind::LongText)
        .required("Cursos e certificados são obrigatórios")
        .placeholder("Descreva outras formações e capacitações que achar relevante"),
    FieldDefinition::new(
        "Nível de Experiência",
        "Nível de Experiência",
        FieldKind::SingleChoice { choices: EXPERIENCE_LEVELS, widget: ChoiceWidget::Select },
    )
    .required("Selecione seu nível de experiência")
    .section("EXPERIÊNCIA NO AUDIOVISUAL"),
    FieldDefinition::new(
        ODS_IDENTIFICATION,
        "ODS Identificação",
        FieldKind::MultiChoice { options: ODS_OPTIONS },
    )
    .required(PICK_ODS),
    FieldDefinition::new(ODS_PROJECTS, "ODS Projetos", FieldKind::MultiChoice { options: ODS_OPTIONS })
        .required(PICK_ODS),
    FieldDefinition::new(
        "Motivação Para Participar",
        "Motivação Para Participar",
        FieldKind::MultiChoice { options: MOTIVATION_OPTIONS },
    )
    .required("Selecione pelo menos uma motivação")
    .section("INTERESSE NO NÚCLEO"),
    FieldDefinition::new("Motivação (Outro)", "Outros motivos", FieldKind::Text)
        .placeholder("Outros motivos"),
];

const STEP_TWO_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new(EMAIL, "Email", FieldKind::Email)
        .required("Email inválido")
        .placeholder("Insira o mesmo email utilizado na Etapa 1"),
    FieldDefinition::new(
        "Experiência Roteiro",
        "Experiência em Roteiro e Audiovisual",
        FieldKind::LongText,
    )
    .required(REQUIRED)
    .placeholder("Conte sobre sua experiência prévia em roteiro e projetos audiovisuais")
    .section("EXPERIÊNCIA COM ROTEIRO E AUDIOVISUAL"),
    FieldDefinition::new(
        "Experiência Núcleos",
        "Experiência em Núcleos Criativos",
        FieldKind::LongText,
    )
    .required(REQUIRED)
    .placeholder(
        "Conte sobre sua experiência com núcleos criativos, laboratórios de roteiros etc. O que gostou e o que não gostou?",
    ),
    FieldDefinition::new("Projetos Pessoais", "Projetos Pessoais", FieldKind::LongText)
        .required(REQUIRED)
        .placeholder(
            "Descreva projetos pessoais que você tenha desenvolvido ou esteja interessado em desenvolver",
        ),
    FieldDefinition::new(PORTFOLIO, "Portfólio/Currículo lattes (Opcional)", FieldKind::Url)
        .placeholder("Insira o link para seu portfólio ou CV Lattes"),
    FieldDefinition::new(
        "Experiência Pesquisa",
        "Experiência com Pesquisa Científica/Acadêmica",
        FieldKind::LongText,
    )
    .required(REQUIRED)
    .placeholder(
        "Explique sua experiência ou envolvimento com pesquisa científica ou acadêmica",
    )
    .section("RELAÇÃO COM PESQUISA CIENTÍFICA E ODS"),
    FieldDefinition::new(
        ODS_IDENTIFICATION,
        "Com qual/quais ODS você mais se identifica?",
        FieldKind::MultiChoice { options: ODS_OPTIONS },
    )
    .required(PICK_ODS),
    FieldDefinition::new(
        "Identificação ODS Razão",
        "Por que você se identifica com os ODS selecionados?",
        FieldKind::LongText,
    )
    .required(REQUIRED)
    .placeholder("Explique por que você se identifica com os ODS selecionados"),
    FieldDefinition::new(
        ODS_PROJECTS,
        "Com qual/quais ODS seus projetos mais se encaixam?",
        FieldKind::MultiChoice { options: ODS_OPTIONS },
    )
    .required(PICK_ODS),
    FieldDefinition::new(
        "Projetos ODS Relação",
        "Descreva como seus projetos se relacionam com os ODS selecionados",
        FieldKind::LongText,
    )
    .required(REQUIRED)
    .placeholder("Explique como seus projetos se relacionam com os ODS selecionados"),
];

pub static STEP_ONE: FormDefinition = FormDefinition {
    step: FormStep::One,
    title: "Formulário de Inscrição",
    subtitle: "ETAPA 1 (CLASSIFICATÓRIA)",
    fields: STEP_ONE_FIELDS,
};

pub static STEP_TWO: FormDefinition = FormDefinition {
    step: FormStep::Two,
    title: "Formulário de Inscrição",
    subtitle: "ETAPA 2",
    fields: STEP_TWO_FIELDS,
};
