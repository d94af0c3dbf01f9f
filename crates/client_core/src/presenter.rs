//! Maps a treatment record onto the prescription card shown to the user.

use shared::domain::TreatmentRecord;

pub const CARD_EYEBROW: &str = "Your Personalized Plan";
pub const TARGETING_LABEL: &str = "Targeting";
pub const BENEFIT_LABEL: &str = "Benefit";
pub const CALL_TO_ACTION: &str = "Book Appointment";
pub const CARD_FOOTNOTE: &str = "Valid at all Uncover clinics";
pub const ADVISOR_NAME: &str = "Dr. Uncover AI";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPanel {
    pub label: &'static str,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionCard {
    pub eyebrow: &'static str,
    pub title: String,
    pub technology: Option<String>,
    pub targeting: CardPanel,
    pub benefit: CardPanel,
    pub call_to_action: &'static str,
    pub footnote: &'static str,
}

pub fn present(record: &TreatmentRecord) -> PrescriptionCard {
    PrescriptionCard {
        eyebrow: CARD_EYEBROW,
        title: record.treatment.clone(),
        technology: record
            .technology
            .as_ref()
            .filter(|t| !t.trim().is_empty())
            .cloned(),
        targeting: CardPanel {
            label: TARGETING_LABEL,
            body: record.concern.clone(),
        },
        benefit: CardPanel {
            label: BENEFIT_LABEL,
            body: record.benefit.clone(),
        },
        call_to_action: CALL_TO_ACTION,
        footnote: CARD_FOOTNOTE,
    }
}

pub fn render_card_text(card: &PrescriptionCard) -> String {
    let mut out = String::new();
    out.push_str(&card.eyebrow.to_uppercase());
    out.push('\n');
    out.push_str(&card.title);
    out.push('\n');
    if let Some(technology) = &card.technology {
        out.push_str(&format!("  Technology: {technology}\n"));
    }
    out.push('\n');
    for panel in [&card.targeting, &card.benefit] {
        out.push_str(&format!("{}:\n  {}\n", panel.label, panel.body));
    }
    out.push('\n');
    out.push_str(&format!("[{}]  {}", card.call_to_action, card.footnote));
    out
}

pub fn render_message_text(message: &str) -> String {
    format!("{ADVISOR_NAME}:\n  {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(technology: Option<&str>) -> TreatmentRecord {
        TreatmentRecord {
            treatment: "PRP Therapy".into(),
            technology: technology.map(str::to_string),
            concern: "Thinning".into(),
            benefit: "Regrowth".into(),
        }
    }

    #[test]
    fn card_mirrors_record_fields() {
        let card = present(&record(Some("Alma Soprano")));
        assert_eq!(card.title, "PRP Therapy");
        assert_eq!(card.technology.as_deref(), Some("Alma Soprano"));
        assert_eq!(card.targeting.body, "Thinning");
        assert_eq!(card.benefit.body, "Regrowth");
        assert_eq!(card.targeting.label, "Targeting");
    }

    #[test]
    fn technology_line_omitted_when_absent() {
        let card = present(&record(None));
        assert_eq!(card.technology, None);
        let text = render_card_text(&card);
        assert!(!text.contains("Technology"));
        assert!(text.contains("PRP Therapy"));
        assert!(text.contains("Book Appointment"));
    }
}
