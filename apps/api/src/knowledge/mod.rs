// Résumé knowledge base and keyword retrieval.
// Pure functions over static data — no I/O, no LLM calls.

pub mod chunks;
pub mod retrieval;
