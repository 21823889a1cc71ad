//! Task Resolver: matches human references to tasks.
//!
//! A reference is tried as a full id, then as a unique id prefix, and finally
//! (unless strict) as an exact title or a fuzzy match against titles and
//! descriptions. Ties are errors, never guesses.

use super::task::Task;
use anyhow::{bail, Result};
use std::collections::HashSet;

/// Shortest id prefix accepted, so a stray digit does not match by accident.
pub const MIN_PREFIX: usize = 4;

/// Length of the id prefix shown to users.
pub const SHORT_ID: usize = 8;

/// Highest confidence reported for a fuzzy match.
const FUZZY_CEILING: f64 = 0.99;

pub struct ResolveResult<'a> {
    pub task: &'a Task,
    pub confidence: f64,
}

pub struct TaskResolver<'a> {
    tasks: &'a [Task],
    strict: bool,
}

impl<'a> TaskResolver<'a> {
    #[must_use]
    pub fn new(tasks: &'a [Task]) -> Self {
        Self {
            tasks,
            strict: false,
        }
    }

    /// Creates a resolver that only accepts ids and id prefixes.
    #[must_use]
    pub fn strict(tasks: &'a [Task]) -> Self {
        Self {
            tasks,
            strict: true,
        }
    }

    /// Resolves a user query into a task.
    ///
    /// # Errors
    /// Returns an error if no match is found, or if an id prefix, a title or
    /// the best fuzzy score matches more than one task.
    pub fn resolve(&self, query: &str) -> Result<ResolveResult<'a>> {
        let query = query.trim();
        if query.is_empty() {
            bail!("Empty task reference");
        }

        if let Some(task) = self.tasks.iter().find(|t| t.id() == query) {
            return Ok(ResolveResult {
                task,
                confidence: 1.0,
            });
        }

        if query.len() >= MIN_PREFIX {
            let prefixed: Vec<_> = self
                .tasks
                .iter()
                .filter(|t| t.id().starts_with(query))
                .collect();
            match prefixed.as_slice() {
                [task] => {
                    return Ok(ResolveResult {
                        task: *task,
                        confidence: 1.0,
                    })
                }
                [] => {}
                many => bail!("Id prefix '{query}' matches {} tasks", many.len()),
            }
        }

        if self.strict {
            bail!("No task with id '{query}' in strict mode.");
        }
        self.fuzzy_resolve(query)
    }

    fn fuzzy_resolve(&self, query: &str) -> Result<ResolveResult<'a>> {
        let query_lower = query.to_lowercase();

        let exact: Vec<_> = self
            .tasks
            .iter()
            .filter(|t| t.title().to_lowercase() == query_lower)
            .collect();
        match exact.as_slice() {
            [task] => {
                return Ok(ResolveResult {
                    task: *task,
                    confidence: 1.0,
                })
            }
            [] => {}
            many => bail!("Title '{query}' matches {} tasks; use an id", many.len()),
        }

        let words: Vec<_> = query_lower.split_whitespace().collect();

        let mut matches: Vec<_> = self
            .tasks
            .iter()
            .map(|t| (calculate_score(t, &query_lower, &words), t))
            .filter(|(s, _)| *s > 0.3)
            .collect();

        matches.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let (best, task) = match matches.as_slice() {
            [] => bail!("No task matches '{query}'"),
            [(best, task)] => (*best, *task),
            [(best, task), (next, _), ..] => {
                if (best - next).abs() < f64::EPSILON {
                    let tied = matches
                        .iter()
                        .take_while(|(s, _)| (best - s).abs() < f64::EPSILON)
                        .count();
                    bail!("'{query}' matches {tied} tasks equally well; use an id");
                }
                (*best, *task)
            }
        };

        Ok(ResolveResult {
            task,
            confidence: best.min(FUZZY_CEILING),
        })
    }
}

/// Shortened id for display.
#[must_use]
pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID).unwrap_or(id)
}

/// Calculates a match score between a task and a query.
fn calculate_score(task: &Task, query: &str, query_words: &[&str]) -> f64 {
    let title_lower = task.title().to_lowercase();
    let desc_lower = task.description().to_lowercase();

    let mut score = 0.0;

    if title_lower == query {
        score += 1.0;
    }
    if title_lower.contains(query) {
        score += 0.7;
    }
    if desc_lower.contains(query) {
        score += 0.4;
    }

    for word in query_words {
        if title_lower.contains(word) {
            score += 0.25;
        }
        if desc_lower.contains(word) {
            score += 0.1;
        }
    }

    if title_lower.starts_with(query) {
        score += 0.5;
    }

    score += string_similarity(&title_lower, query) * 0.4;

    score.min(1.0)
}

#[allow(clippy::cast_precision_loss)]
fn string_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_chars: HashSet<char> = a.chars().collect();
    let b_chars: HashSet<char> = b.chars().collect();

    let intersection = a_chars.intersection(&b_chars).count();
    let union = a_chars.union(&b_chars).count();

    if union == 0 {
        return 0.0;
    }

    intersection as f64 / union as f64
}
