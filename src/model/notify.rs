use reqwest::Client;
use rocket::tokio;
use serde_json::json;

use crate::model::{priority::Priority, response::SurveyResponse};

/// Best-effort outbound notifications for new leads.
///
/// Contract: at most one attempt per message, sent off the request path, and
/// failures are logged, never retried and never surfaced to the submitting
/// client. With no relay configured the operator summary still lands in the
/// server log, which is how small campaigns actually read their leads.
#[derive(Debug)]
pub struct Notifier {
    client: Client,
    relay_url: Option<String>,
    operator_email: String,
}

impl Notifier {
    pub fn new(relay_url: Option<String>, operator_email: String) -> Notifier {
        Notifier {
            client: Client::new(),
            relay_url,
            operator_email,
        }
    }

    /// Fire the two notifications for a fresh submission: the lead summary
    /// for the operator and the confirmation for the participant. Returns
    /// immediately; the sends run on background tasks.
    pub fn notify_submission(&self, response: &SurveyResponse) {
        let summary = lead_summary(response);
        info!(
            "EMAIL PARA {}\n{summary}",
            self.operator_email
        );

        let Some(relay_url) = self.relay_url.clone() else {
            return;
        };

        self.send(
            relay_url.clone(),
            self.operator_email.clone(),
            format!(
                "{} NUEVO LEAD {} - {} ({})",
                priority_icon(response.priority),
                response.priority,
                response.answers.name().unwrap_or("?"),
                response.answers.business().unwrap_or("?"),
            ),
            summary,
        );

        if let Some(participant) = response.answers.email() {
            self.send(
                relay_url,
                participant.to_string(),
                "Hemos recibido tu encuesta 💜".to_string(),
                confirmation(response),
            );
        }
    }

    /// Post one message through the form relay on a background task.
    fn send(&self, relay_url: String, to: String, subject: String, body: String) {
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client
                .post(&relay_url)
                .json(&json!({
                    "to": to,
                    "subject": subject,
                    "message": body,
                }))
                .send()
                .await
                .and_then(|response| response.error_for_status());
            if let Err(err) = result {
                warn!("Failed to notify {to}: {err}");
            }
        });
    }
}

fn priority_icon(priority: Priority) -> &'static str {
    match priority {
        Priority::Hot => "🔥",
        Priority::Warm => "🟡",
        Priority::Cold => "🟢",
    }
}

fn recommended_action(priority: Priority) -> &'static str {
    match priority {
        Priority::Hot => {
            "🔥 LLAMAR EN LAS PRÓXIMAS 24 HORAS\n\
             Perfil ideal: alta disposición de pago y necesita solución urgente"
        }
        Priority::Warm => {
            "🟡 SEGUIMIENTO EN 3-5 DÍAS\n\
             Interesada pero sin urgencia. Nutrir con contenido de valor"
        }
        Priority::Cold => {
            "🟢 FOLLOW-UP A LARGO PLAZO\n\
             Añadir a la lista de nurturing. Email automatizado mensual"
        }
    }
}

/// The operator-facing lead summary.
fn lead_summary(response: &SurveyResponse) -> String {
    let answers = &response.answers;
    let value = |f: &str| answers.get(f).unwrap_or("No proporcionada").to_string();
    let mut summary = format!(
        "PRIORIDAD: {priority}\n\
         Nombre: {name}\n\
         Peluquería: {business}\n\
         Ciudad: {city}\n\
         WhatsApp: {whatsapp}\n\
         Email: {email}\n\
         Dirección: {address}\n\n\
         VALIDACIÓN MVP:\n\
         - Tiempo gestión agenda/día: {p1}\n\
         - Mayor problema: {p2}\n\
         - Pagaría: {p3}\n\
         - Principal freno: {p4}\n\
         - Prueba gratis: {p5}\n\
         - Contactar: {p16}\n\n\
         REDES SOCIALES:\n\
         - Qué le quita tiempo: {p6}\n\
         - Usa: {p7}\n\
         - Tiempo semanal RRSS: {p8}\n\
         - Pagaría contenido IA: {p9}\n",
        priority = response.priority,
        name = value("p10"),
        business = value("p11"),
        city = value("p14"),
        whatsapp = value("p12"),
        email = value("p13"),
        address = value("p15"),
        p1 = value("p1"),
        p2 = value("p2"),
        p3 = value("p3"),
        p4 = value("p4"),
        p5 = value("p5"),
        p16 = value("p16"),
        p6 = value("p6"),
        p7 = value("p7"),
        p8 = value("p8"),
        p9 = value("p9"),
    );
    if let Some(number) = response.raffle_number {
        summary.push_str(&format!("\nSORTEO:\nParticipa: SÍ\nNúmero: #{number}\n"));
    }
    summary.push_str(&format!(
        "\nACCIÓN RECOMENDADA:\n{}\n\nTimestamp: {}\n",
        recommended_action(response.priority),
        response.timestamp,
    ));
    summary
}

/// The participant-facing confirmation.
fn confirmation(response: &SurveyResponse) -> String {
    let mut body = format!(
        "Hola {},\n\n\
         Gracias por completar la encuesta de Agenda Inteligente. Tu\n\
         respuesta ha sido registrada correctamente.\n",
        response.answers.name().unwrap_or("")
    );
    if let Some(number) = response.raffle_number {
        body.push_str(&format!(
            "\n🎁 ¡Participas en el sorteo! Tu número es el #{number}.\n\
             Sorteo: 24 noviembre 2025. Premio: 1 año de Agenda Inteligente IA.\n"
        ));
    }
    body.push_str("\nEva se pondrá en contacto contigo pronto 💜\n");
    body
}
