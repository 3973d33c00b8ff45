use std::net::SocketAddr;

use askama::Template;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;

use crate::client::notify::Notification;
use crate::error::AppError;
use crate::form::mapper::map_submission;
use crate::form::parser::parse_form_urlencoded;
use crate::form::{
    ChoiceWidget, FieldDefinition, FieldErrors, FieldKind, FieldValue, FormDefinition, FormStep,
    FormSubmission, validate,
};
use crate::state::SharedState;
use crate::submission::envelope::RecordEnvelope;
use crate::submission::{metadata, pipeline};

const ALREADY_RECEIVED: &str = "Já recebemos sua inscrição nesta etapa.";

struct OptionView {
    value: String,
    label: String,
    checked: bool,
}

struct FieldView {
    id: String,
    name: &'static str,
    label: &'static str,
    input: &'static str,
    placeholder: &'static str,
    value: String,
    options: Vec<OptionView>,
    error: Option<String>,
    section: Option<&'static str>,
    hidden: bool,
    shown_when_field: String,
    shown_when_value: String,
}

struct NotificationView {
    severity: &'static str,
    message: String,
    duration_ms: u128,
}

#[derive(Template)]
#[template(path = "form.html")]
struct FormTemplate {
    title: &'static str,
    subtitle: &'static str,
    slug: &'static str,
    fields: Vec<FieldView>,
    notification: Option<NotificationView>,
    panel_title: &'static str,
    panel: &'static [&'static str],
}

const STEP_ONE_PANEL: &[&str] = &[
    "\u{201c}História em Pesquisa\u{201d} é a primeira edição do Núcleo de Desenvolvimento de Roteiros da PAPOULA, realizado em parceria com a PPG-ARTES da Universidade Estadual do Paraná (UNESPAR) e viabilizado pela Lei Paulo Gustavo.",
    "Este formulário é parte do processo seletivo dos autores participantes do núcleo. Serão selecionados 4 roteiristas, autores, pesquisadores e/ou interessados na criação de conteúdo.",
    "Cada autor selecionado será responsável pelo desenvolvimento de 1 roteiro baseado em pesquisas realizadas na UNESPAR. O núcleo tem duração de até 12 meses, com encontros semanais de 1h30.",
    "Os autores selecionados receberão consultorias, materiais de estudo e uma ajuda de custos de R$500 por mês durante o período de participação.",
    "A inscrição é aberta a todos os interessados, experientes ou não na área, que morem em cidades do Paraná. O núcleo encoraja a inscrição de pessoas diversas e se compromete a acomodar diferentes necessidades para participação.",
];

const STEP_TWO_PANEL: &[&str] = &[
    "Esta é a segunda etapa do processo de seleção. Nesta fase, buscamos entender melhor sua experiência e relação com roteiro, audiovisual, pesquisa científica e os Objetivos de Desenvolvimento Sustentável (ODS).",
    "Certifique-se de usar o mesmo email utilizado na Etapa 1.",
    "Os ODS são uma coleção de 17 metas globais estabelecidas pela Assembleia Geral das Nações Unidas, que abordam pobreza, desigualdade, mudança climática, degradação ambiental, paz e justiça.",
    "Após o envio deste formulário, sua inscrição completa (Etapa 1 e 2) será analisada por nossa equipe. Os candidatos selecionados serão contatados para as próximas fases do processo.",
];

pub async fn form_page(Path(slug): Path<String>) -> Result<Response, AppError> {
    let step = step_from_slug(&slug)?;
    Ok(render(step, &FormSubmission::new(), None, None, StatusCode::OK))
}

pub async fn submit_page(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    jar: CookieJar,
    body: Bytes,
) -> Result<Response, AppError> {
    let step = step_from_slug(&slug)?;
    let definition = step.definition();
    let submission = parse_form_urlencoded(definition, &body);

    if let Err(errors) = validate(definition, &submission) {
        return Ok(render(
            step,
            &submission,
            Some(&errors),
            None,
            StatusCode::UNPROCESSABLE_ENTITY,
        ));
    }

    if let Some(remaining) = cooldown_remaining(&jar, step) {
        let note = Notification::cooldown(remaining);
        return Ok(render(step, &submission, None, Some(note), StatusCode::OK));
    }

    let envelope = RecordEnvelope::from_submission(&map_submission(step, &submission));
    let client = metadata::extract(&headers, Some(addr.ip()), &state.config.trusted_proxies);

    match pipeline::run(&state, step, &client, envelope).await {
        Ok(_) => {
            let deadline = Utc::now().timestamp() + state.config.limits.cooldown_secs as i64;
            let cookie = Cookie::build((cooldown_cookie(step), deadline.to_string()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build();
            let page = render(
                step,
                &FormSubmission::new(),
                None,
                Some(Notification::success()),
                StatusCode::OK,
            );
            Ok((jar.add(cookie), page).into_response())
        }
        Err(AppError::Conflict(_)) => {
            let note = Notification::warning(ALREADY_RECEIVED);
            Ok(render(step, &submission, None, Some(note), StatusCode::CONFLICT))
        }
        Err(e) => {
            tracing::error!("Error submitting form: {e}");
            Ok(render(
                step,
                &submission,
                None,
                Some(Notification::error()),
                StatusCode::OK,
            ))
        }
    }
}

fn step_from_slug(slug: &str) -> Result<FormStep, AppError> {
    FormStep::from_slug(slug).ok_or_else(|| AppError::NotFound(format!("Unknown form page: {slug}")))
}

fn cooldown_cookie(step: FormStep) -> String {
    format!("cooldown_{}", step.as_str())
}

/// Seconds left on the advisory cooldown stored in the browser, if any.
fn cooldown_remaining(jar: &CookieJar, step: FormStep) -> Option<u64> {
    let deadline: i64 = jar.get(&cooldown_cookie(step))?.value().parse().ok()?;
    let remaining = deadline - Utc::now().timestamp();
    (remaining > 0).then_some(remaining as u64)
}

fn render(
    step: FormStep,
    submission: &FormSubmission,
    errors: Option<&FieldErrors>,
    notification: Option<Notification>,
    status: StatusCode,
) -> Response {
    let definition = step.definition();
    let (panel_title, panel) = match step {
        FormStep::One => ("Projeto - Histórias em pesquisa", STEP_ONE_PANEL),
        FormStep::Two => ("Informações sobre o Formulário - Etapa 2", STEP_TWO_PANEL),
    };

    let template = FormTemplate {
        title: definition.title,
        subtitle: definition.subtitle,
        slug: step.slug(),
        fields: definition
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| field_view(definition, field, i, submission, errors))
            .collect(),
        notification: notification.map(|n| NotificationView {
            severity: n.severity.as_str(),
            duration_ms: n.duration().as_millis(),
            message: n.message,
        }),
        panel_title,
        panel,
    };

    (status, Html(template.render().unwrap_or_default())).into_response()
}

fn field_view(
    definition: &FormDefinition,
    field: &'static FieldDefinition,
    index: usize,
    submission: &FormSubmission,
    errors: Option<&FieldErrors>,
) -> FieldView {
    let current = submission.get(field.name);
    let selected = |code: &str| match current {
        Some(FieldValue::Text(s)) => s == code,
        Some(FieldValue::Set(items)) => items.iter().any(|i| i == code),
        _ => false,
    };

    let (input, options) = match field.kind {
        FieldKind::Text => ("text", Vec::new()),
        FieldKind::LongText => ("textarea", Vec::new()),
        FieldKind::Email => ("email", Vec::new()),
        FieldKind::Url => ("url", Vec::new()),
        FieldKind::Number { .. } => ("number", Vec::new()),
        FieldKind::SingleChoice { choices, widget } => {
            let input = match widget {
                ChoiceWidget::Radio => "radio",
                ChoiceWidget::Select => "select",
            };
            let options = choices
                .iter()
                .map(|c| OptionView {
                    value: c.code.to_string(),
                    label: c.label.to_string(),
                    checked: selected(c.code),
                })
                .collect();
            (input, options)
        }
        FieldKind::MultiChoice { options } => {
            let options = options
                .iter()
                .map(|o| OptionView {
                    value: o.to_string(),
                    label: o.to_string(),
                    checked: selected(*o),
                })
                .collect();
            ("checkbox", options)
        }
    };

    let value = match current {
        Some(FieldValue::Text(s)) => s.clone(),
        Some(FieldValue::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    FieldView {
        id: format!("field-{index}"),
        name: field.name,
        label: field.label,
        input,
        placeholder: field.placeholder,
        value,
        options,
        error: errors.and_then(|e| e.get(field.name)).map(str::to_string),
        section: field.section,
        hidden: !definition.is_visible(field, submission),
        shown_when_field: field.shown_when.map(|c| c.field.to_string()).unwrap_or_default(),
        shown_when_value: field.shown_when.map(|c| c.equals.to_string()).unwrap_or_default(),
    }
}
