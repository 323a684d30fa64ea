use rand::Rng;

use crate::domain::assignment::SubmissionId;

pub const SUBMISSION_ID_LEN: usize = 6;

const SUBMISSION_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of fresh submission ids for newly created dropboxes.
///
/// Injected into the workflow engine so tests can script the sequence;
/// production uses [`RandomSubmissionIds`]. Uniqueness is not guaranteed at
/// generation time (36^6 space): the store's uniqueness constraint is the
/// backstop, and the engine regenerates on conflict.
pub trait SubmissionIdSource: Send + Sync {
    fn next_id(&self) -> SubmissionId;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RandomSubmissionIds;

impl SubmissionIdSource for RandomSubmissionIds {
    fn next_id(&self) -> SubmissionId {
        let mut rng = rand::thread_rng();
        let code = (0..SUBMISSION_ID_LEN)
            .map(|_| {
                let index = rng.gen_range(0..SUBMISSION_ID_ALPHABET.len());
                SUBMISSION_ID_ALPHABET[index] as char
            })
            .collect::<String>();
        SubmissionId(code)
    }
}

pub fn is_well_formed(candidate: &str) -> bool {
    candidate.len() == SUBMISSION_ID_LEN
        && candidate.bytes().all(|byte| SUBMISSION_ID_ALPHABET.contains(&byte))
}

#[cfg(test)]
mod tests {
    use super::{is_well_formed, RandomSubmissionIds, SubmissionIdSource, SUBMISSION_ID_LEN};

    #[test]
    fn generated_ids_are_six_uppercase_alphanumerics() {
        let source = RandomSubmissionIds;
        for _ in 0..200 {
            let id = source.next_id();
            assert_eq!(id.as_str().len(), SUBMISSION_ID_LEN);
            assert!(is_well_formed(id.as_str()), "unexpected id shape: {id}");
        }
    }

    #[test]
    fn well_formed_rejects_lowercase_and_wrong_length() {
        assert!(is_well_formed("AB12CD"));
        assert!(!is_well_formed("ab12cd"));
        assert!(!is_well_formed("AB12C"));
        assert!(!is_well_formed("AB12CD7"));
        assert!(!is_well_formed("AB 2CD"));
    }
}
