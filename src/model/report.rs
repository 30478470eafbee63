use std::str::FromStr;

use crate::model::response::SurveyResponse;

/// Placeholder rendered for any answer the lead left blank.
const UNSPECIFIED: &str = "No especificado";

/// The two report flavours the dashboard can request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReportKind {
    /// Full analysis of the lead's answers.
    Completo,
    /// Commercial proposal with a recommended fee and ROI estimate.
    Propuesta,
}

impl FromStr for ReportKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completo" => Ok(ReportKind::Completo),
            "propuesta" => Ok(ReportKind::Propuesta),
            _ => Err(()),
        }
    }
}

/// Build the requested report for a stored response.
///
/// Pure string templating: no model, no external calls. Missing answers
/// render as "No especificado" rather than failing.
pub fn generate(response: &SurveyResponse, kind: ReportKind) -> String {
    match kind {
        ReportKind::Completo => complete_analysis(response),
        ReportKind::Propuesta => commercial_proposal(response),
    }
}

fn field<'a>(value: Option<&'a str>) -> &'a str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(UNSPECIFIED)
}

/// Recommended monthly fee for the bracket the lead said they would pay.
fn recommended_fee(willingness: Option<&str>) -> &'static str {
    match willingness {
        Some("Más de 100€/mes") => "99€/mes",
        Some("80-100€/mes") => "89€/mes",
        Some("60-80€/mes") => "69€/mes",
        Some("40-60€/mes") => "49€/mes",
        _ => "29€/mes",
    }
}

/// Estimated months until the service pays for itself, from the
/// willingness-to-pay bracket.
fn estimated_roi(willingness: Option<&str>) -> &'static str {
    match willingness {
        Some("Más de 100€/mes") | Some("80-100€/mes") => "1-2 meses",
        Some("60-80€/mes") | Some("40-60€/mes") => "2-3 meses",
        _ => "3-6 meses",
    }
}

fn complete_analysis(response: &SurveyResponse) -> String {
    let answers = &response.answers;
    format!(
        "ANÁLISIS COMPLETO DEL LEAD\n\
         ==========================\n\n\
         Prioridad: {priority}\n\
         Fecha de la encuesta: {timestamp}\n\n\
         DATOS DE CONTACTO\n\
         Nombre: {name}\n\
         Peluquería: {business}\n\
         Ciudad: {city}\n\
         WhatsApp: {whatsapp}\n\
         Email: {email}\n\
         Dirección: {address}\n\n\
         GESTIÓN DE AGENDA\n\
         Tiempo diario dedicado a la agenda: {p1}.\n\
         Su mayor problema con las citas: {p2}.\n\
         Principal freno para automatizar: {p4}.\n\n\
         VALIDACIÓN COMERCIAL\n\
         Pagaría al mes: {p3}.\n\
         Disposición a probar gratis 15 días: {p5}.\n\
         Prefiere que contactemos: {p16}.\n\n\
         REDES SOCIALES\n\
         Otras tareas que le quitan tiempo: {p6}.\n\
         Redes que usa para el negocio: {p7}.\n\
         Tiempo semanal en redes: {p8}.\n\
         Pagaría por contenido generado con IA: {p9}.\n\n\
         SORTEO\n\
         Participa: {raffle}\n",
        priority = response.priority,
        timestamp = response.timestamp,
        name = field(answers.name()),
        business = field(answers.business()),
        city = field(answers.city()),
        whatsapp = field(answers.whatsapp()),
        email = field(answers.email()),
        address = field(answers.get("p15")),
        p1 = field(answers.get("p1")),
        p2 = field(answers.get("p2")),
        p4 = field(answers.get("p4")),
        p3 = field(answers.willingness_to_pay()),
        p5 = field(answers.trial_preference()),
        p16 = field(answers.contact_preference()),
        p6 = field(answers.get("p6")),
        p7 = field(answers.get("p7")),
        p8 = field(answers.get("p8")),
        p9 = field(answers.get("p9")),
        raffle = match response.raffle_number {
            Some(number) => format!("SÍ, con el número #{number}"),
            None => "No".to_string(),
        },
    )
}

fn commercial_proposal(response: &SurveyResponse) -> String {
    let answers = &response.answers;
    let willingness = answers.willingness_to_pay();
    format!(
        "PROPUESTA COMERCIAL - AGENDA INTELIGENTE\n\
         ========================================\n\n\
         Preparada para {name}, de {business} ({city}).\n\n\
         Según tus respuestas, dedicas {p1} al día a gestionar la agenda y tu\n\
         mayor problema son: {p2}. La Agenda Inteligente automatiza reservas,\n\
         recordatorios y listas de espera para recuperar ese tiempo.\n\n\
         CONDICIONES PROPUESTAS\n\
         Cuota mensual recomendada: {fee} (indicaste que pagarías {p3}).\n\
         Retorno estimado de la inversión: {roi}.\n\
         Prueba gratuita de 15 días sin compromiso: {p5}.\n\n\
         SIGUIENTE PASO\n\
         Te contactaremos en la franja que elegiste: {p16}.\n",
        name = field(answers.name()),
        business = field(answers.business()),
        city = field(answers.city()),
        p1 = field(answers.get("p1")),
        p2 = field(answers.get("p2")),
        fee = recommended_fee(willingness),
        p3 = field(willingness),
        roi = estimated_roi(willingness),
        p5 = field(answers.trial_preference()),
        p16 = field(answers.contact_preference()),
    )
}
