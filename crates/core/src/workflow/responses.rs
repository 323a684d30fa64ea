//! User-facing copy for every workflow outcome.
//!
//! All responses are plain markdown strings for the messaging channel.
//! Keeping them in one pure module means the engine and its tests share the
//! exact rendered text.

use crate::domain::assignment::SubmissionId;
use crate::domain::submission::Submission;
use crate::workflow::steps::Intent;

const ENTRY_SEPARATOR: &str = "\n---\n";

pub fn greeting() -> String {
    concat!(
        "Hello! I'm your friendly **AssignmentDrop assistant** 🤖.\n\n",
        "I can help you manage assignments right here in chat.\n\n",
        "🔹 **For Teachers:** You can say *'Create an assignment'* to get started.\n",
        "🔹 **For Students:** You can say *'I want to submit my work'* to begin a submission.\n\n",
        "How can I help you today?"
    )
    .to_string()
}

pub fn dropbox_created(submission_id: &SubmissionId) -> String {
    format!(
        "✅ All set! Your new assignment dropbox has been created.\n\n\
         The unique submission ID is: *{submission_id}*\n\n\
         Please share this code with your students. They will need it to submit their work."
    )
}

pub fn prompt_for_assignment_id(intent: Intent) -> String {
    match intent {
        Intent::Submit => "Of course! To submit your assignment, I first need the \
                           **6-character assignment ID** your teacher gave you. What is the ID?"
            .to_string(),
        _ => "Sure, I can show you the submissions. Which assignment are you interested in? \
              Please provide the **6-character assignment ID**."
            .to_string(),
    }
}

pub fn unknown_assignment(assignment_id: &str) -> String {
    format!(
        "❌ It seems the assignment ID '{assignment_id}' is not valid. \
         Please double-check the code with your teacher and try again."
    )
}

pub fn prompt_for_link() -> String {
    "Great, I've found that assignment! Now, please reply with the **shareable link** to \
     your file. (Remember to set the link's permission so anyone with the link can view.)"
        .to_string()
}

pub fn submission_received() -> String {
    "✅ Thank you! Your submission has been successfully received. Well done!".to_string()
}

pub fn no_submissions_yet(assignment_id: &str) -> String {
    format!(
        "It looks like there are no submissions for assignment ID *{assignment_id}* just yet. \
         Once students start submitting their work, you'll see them listed here."
    )
}

/// Renders submissions in the order given; the store lists newest first.
pub fn submission_list(assignment_id: &str, submissions: &[Submission]) -> String {
    let entries = submissions.iter().map(submission_entry).collect::<Vec<_>>();
    format!(
        "📚 Here are the submissions for Assignment ID *{assignment_id}*:\n\n{}",
        entries.join(ENTRY_SEPARATOR)
    )
}

fn submission_entry(submission: &Submission) -> String {
    format!(
        "👤 From: *{}*\n🔗 Link: {}\n🗓️ Date: {}",
        submission.submitter_identity,
        submission.content_link,
        submission.submitted_at.format("%Y-%m-%d"),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use crate::domain::assignment::SubmissionId;
    use crate::domain::submission::Submission;
    use crate::workflow::steps::Intent;

    use super::{
        dropbox_created, greeting, no_submissions_yet, prompt_for_assignment_id, submission_list,
        unknown_assignment,
    };

    fn submission(submitter: &str, link: &str, at: &str) -> Submission {
        Submission {
            assignment_submission_id: SubmissionId::from("AB12CD"),
            submitter_identity: submitter.to_string(),
            content_link: link.to_string(),
            submitted_at: DateTime::parse_from_rfc3339(at)
                .expect("valid rfc3339")
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn greeting_names_both_entry_points() {
        let text = greeting();
        assert!(text.contains("For Teachers"));
        assert!(text.contains("For Students"));
    }

    #[test]
    fn creation_confirmation_contains_the_shareable_id() {
        let text = dropbox_created(&SubmissionId::from("XK93PQ"));
        assert!(text.contains("*XK93PQ*"));
        assert!(text.contains("share this code"));
    }

    #[test]
    fn id_prompts_differ_by_intent() {
        let submit = prompt_for_assignment_id(Intent::Submit);
        let view = prompt_for_assignment_id(Intent::View);
        assert!(submit.contains("submit your assignment"));
        assert!(view.contains("show you the submissions"));
        assert_ne!(submit, view);
    }

    #[test]
    fn unknown_assignment_names_the_offending_id() {
        assert!(unknown_assignment("ZZZZZZ").contains("'ZZZZZZ'"));
    }

    #[test]
    fn empty_list_renders_soft_message_not_error() {
        let text = no_submissions_yet("AB12CD");
        assert!(text.contains("*AB12CD*"));
        assert!(text.contains("just yet"));
    }

    #[test]
    fn list_preserves_given_order_and_truncates_dates_to_days() {
        let submissions = vec![
            submission("S3", "http://x/3", "2026-03-03T18:45:11+00:00"),
            submission("S2", "http://x/2", "2026-03-02T09:12:00+00:00"),
            submission("S1", "http://x/1", "2026-03-01T07:00:59+00:00"),
        ];

        let text = submission_list("AB12CD", &submissions);
        let s3 = text.find("*S3*").expect("newest entry present");
        let s2 = text.find("*S2*").expect("middle entry present");
        let s1 = text.find("*S1*").expect("oldest entry present");
        assert!(s3 < s2 && s2 < s1, "entries must render newest first as given");

        assert!(text.contains("2026-03-03"));
        assert!(!text.contains("18:45"), "time of day must be truncated away");
        assert_eq!(text.matches("---").count(), 2);
    }
}
