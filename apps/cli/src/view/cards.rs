//! Renders job cards and notices as plain text blocks for the terminal.

use crate::models::Job;
use crate::view::model::{ApplyButton, Modal};

/// One job card. `index` is the 1-based position in the rendered list and is
/// what the interactive apply command refers to.
pub fn render_card(index: usize, job: &Job, button: &ApplyButton) -> String {
    let mut out = String::new();
    out.push_str(&format!("{index:>3}. {} @ {}\n", job.title, job.company));

    let mut meta = vec![job.location.as_str()];
    if let Some(salary) = job.salary.as_deref() {
        meta.push(salary);
    }
    if let Some(kind) = job.employment_type.as_deref() {
        meta.push(kind);
    }
    out.push_str(&format!("     {}\n", meta.join(" | ")));

    if !job.skills.is_empty() {
        out.push_str(&format!("     Skills: {}\n", job.skills.join(", ")));
    }
    if !job.description.is_empty() {
        out.push_str(&format!("     {}\n", job.description));
    }
    if let Some(reason) = job.explanation_for_recommendation.as_deref() {
        out.push_str(&format!("     Why this match: {reason}\n"));
    }
    if let Some(logo) = job.logo.as_deref() {
        out.push_str(&format!("     Logo: {logo}\n"));
    }

    if button.enabled {
        out.push_str(&format!("     [{}]\n", button.label));
    } else {
        out.push_str(&format!("     [{}] (disabled)\n", button.label));
    }

    out
}

pub fn render_summary(total: usize) -> String {
    if total == 1 {
        "1 job found".to_string()
    } else {
        format!("{total} jobs found")
    }
}

pub fn render_no_results() -> String {
    "No jobs found matching your profile.\n\
     Try a different resume or search again later.\n"
        .to_string()
}

pub fn render_modal(modal: &Modal) -> String {
    match modal {
        Modal::Hidden => String::new(),
        Modal::Success => "Application submitted successfully!\n".to_string(),
        Modal::Error { message, tips } => {
            let mut out = format!("Error: {message}\n");
            if !tips.is_empty() {
                out.push_str("Troubleshooting tips:\n");
                for tip in tips.iter() {
                    out.push_str(&format!("  - {tip}\n"));
                }
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::model::APPLYING_LABEL;

    fn make_job() -> Job {
        Job {
            id: "job-42".to_string(),
            title: "Senior Rust Engineer".to_string(),
            company: "Ferrous Systems".to_string(),
            location: "Berlin, Germany".to_string(),
            description: "Own the core crates.".to_string(),
            skills: vec!["Rust".to_string(), "Tokio".to_string()],
            salary: Some("€90k-110k".to_string()),
            employment_type: Some("Full-time".to_string()),
            logo: None,
            explanation_for_recommendation: Some("Systems overlap.".to_string()),
        }
    }

    #[test]
    fn test_card_shows_all_present_fields() {
        let card = render_card(3, &make_job(), &ApplyButton::default());
        assert!(card.contains("3. Senior Rust Engineer @ Ferrous Systems"));
        assert!(card.contains("Berlin, Germany | €90k-110k | Full-time"));
        assert!(card.contains("Skills: Rust, Tokio"));
        assert!(card.contains("Own the core crates."));
        assert!(card.contains("Why this match: Systems overlap."));
        assert!(card.contains("[Apply Now]"));
        assert!(!card.contains("Logo:"));
    }

    #[test]
    fn test_card_omits_absent_optional_fields() {
        let mut job = make_job();
        job.skills.clear();
        job.salary = None;
        job.employment_type = None;
        job.explanation_for_recommendation = None;

        let card = render_card(1, &job, &ApplyButton::default());
        assert!(!card.contains("Skills:"));
        assert!(!card.contains("Why this match:"));
        assert!(card.contains("Berlin, Germany\n"));
    }

    #[test]
    fn test_pending_button_renders_disabled() {
        let card = render_card(1, &make_job(), &ApplyButton::pending());
        assert!(card.contains(&format!("[{APPLYING_LABEL}] (disabled)")));
    }

    #[test]
    fn test_summary_pluralizes() {
        assert_eq!(render_summary(1), "1 job found");
        assert_eq!(render_summary(42), "42 jobs found");
        assert_eq!(render_summary(0), "0 jobs found");
    }

    #[test]
    fn test_error_modal_lists_tips() {
        let modal = Modal::error("Failed to fetch jobs: boom", &["tip one", "tip two"]);
        let text = render_modal(&modal);
        assert!(text.contains("Error: Failed to fetch jobs: boom"));
        assert!(text.contains("Troubleshooting tips:"));
        assert!(text.contains("- tip one"));
        assert!(text.contains("- tip two"));
    }

    #[test]
    fn test_error_modal_without_tips_has_no_tip_block() {
        let text = render_modal(&Modal::error("plain failure", &[]));
        assert!(!text.contains("Troubleshooting tips"));
    }

    #[test]
    fn test_hidden_modal_renders_nothing() {
        assert!(render_modal(&Modal::Hidden).is_empty());
    }
}
