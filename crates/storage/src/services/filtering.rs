use std::collections::HashSet;

use crate::dto::filter::{ALL, ParticipantFilter};
use crate::models::{ParticipantRecord, ParticipantStatus};

/// Records matching every active filter, in store order.
///
/// Pure: the result depends only on the arguments, so callers can recompute it
/// after each mutation without caching.
pub fn filter_participants<'a>(
    records: &'a [ParticipantRecord],
    filter: &ParticipantFilter,
) -> Result<Vec<&'a ParticipantRecord>, String> {
    let search = filter.search_term();
    let program = filter.program_filter();
    let status = filter.status_filter()?;

    Ok(records
        .iter()
        .filter(|record| {
            let matches_search = search.as_deref().is_none_or(|term| {
                record.biodata.name.to_lowercase().contains(term)
                    || record.biodata.email.to_lowercase().contains(term)
            });
            let matches_program =
                program.is_none_or(|program| record.biodata.program_enrolled == program);
            let matches_status = status.is_none_or(|status| record.status == status);

            matches_search && matches_program && matches_status
        })
        .collect())
}

/// `"All"` followed by each distinct program in first-seen order.
pub fn program_options(records: &[ParticipantRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    std::iter::once(ALL.to_string())
        .chain(
            records
                .iter()
                .map(|r| r.biodata.program_enrolled.clone())
                .filter(|program| seen.insert(program.clone())),
        )
        .collect()
}

pub fn status_options() -> Vec<String> {
    std::iter::once(ALL.to_string())
        .chain(ParticipantStatus::ALL.iter().map(|s| s.to_string()))
        .collect()
}
