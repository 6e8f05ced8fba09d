//! Keyword retrieval — maps a free-text query to résumé chunks.
//!
//! No scoring or ranking. Each route is tested on its own, so a query can pull
//! in several chunks; the output keeps route declaration order.

use crate::knowledge::chunks::{chunk, ChunkId};

/// Keyword routes, evaluated independently in this order.
const ROUTES: &[(ChunkId, &[&str])] = &[
    (
        ChunkId::Skills,
        &["skill", "know", "stack", "tech", "python", "cpp", "tools"],
    ),
    (
        ChunkId::Experience,
        &["work", "experience", "job", "intern", "tihan", "iit"],
    ),
    (
        ChunkId::Projects,
        &["project", "build", "app", "safety", "football", "gender", "research", "paper"],
    ),
    (
        ChunkId::Achievements,
        &["achieve", "win", "hackathon", "award", "rank", "gdg"],
    ),
    (
        ChunkId::Contact,
        &["contact", "email", "reach", "github", "linkedin", "phone"],
    ),
    (
        ChunkId::Bio,
        &["who", "about", "bio", "study", "college", "cgpa"],
    ),
];

/// Used when no route matches.
const FALLBACK: [ChunkId; 2] = [ChunkId::Bio, ChunkId::Skills];

/// Returns the chunk ids selected for `query`.
pub fn select_chunks(query: &str) -> Vec<ChunkId> {
    let query = query.to_lowercase();

    let selected: Vec<ChunkId> = ROUTES
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| query.contains(k)))
        .map(|(id, _)| *id)
        .collect();

    if selected.is_empty() {
        FALLBACK.to_vec()
    } else {
        selected
    }
}

/// Joins the texts of `ids` with `\n`, in the given order.
pub fn join_chunks(ids: &[ChunkId]) -> String {
    ids.iter()
        .map(|id| chunk(*id).text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the context block for `query`.
pub fn retrieve_context(query: &str) -> String {
    join_chunks(&select_chunks(query))
}
