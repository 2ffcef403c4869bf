use quiz_core::model::{HistoryEntryId, max_score};
use services::HistoryListItem;

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryItemVm {
    pub id: HistoryEntryId,
    pub label: String,
}

/// Numbers attempts from 1 in list order.
#[must_use]
pub fn map_history_items(items: &[HistoryListItem]) -> Vec<HistoryItemVm> {
    let max = max_score();
    items
        .iter()
        .enumerate()
        .map(|(index, item)| HistoryItemVm {
            id: item.id,
            label: format!(
                "Attempt {}: {}/{max} on {}",
                index + 1,
                item.score,
                format_datetime(item.recorded_at)
            ),
        })
        .collect()
}
