//! View state machine
//!
//! A single enum replaces the pile of independent show-this-view flags, so
//! exactly one screen is active at any time and transitions are explicit.
//! The machine is pure; rendering is an external collaborator.

/// The active screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Home,
    RecordForm,
    RecordList,
    Calendar { year: i32, month: u32 },
    Statistics,
    CsvUpload,
    Editing { record_id: String },
    Deleting { record_id: String },
    CategoryModal,
}

/// A user interaction the state machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    GoHome,
    OpenRecordForm,
    OpenRecordList,
    OpenCalendar { year: i32, month: u32 },
    OpenStatistics,
    OpenCsvUpload,
    /// Category suggestion modal, layered over the record form.
    OpenCategoryModal,
    StartEditing { record_id: String },
    StartDeleting { record_id: String },
    /// Commit the pending edit or delete.
    Confirm,
    /// Abandon the current modal-like state.
    Cancel,
    NextMonth,
    PrevMonth,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::Home
    }
}

impl ViewState {
    /// Apply an event, returning the next state.
    ///
    /// Events that make no sense in the current state leave it unchanged;
    /// a stray click never corrupts navigation.
    pub fn apply(self, event: ViewEvent) -> Self {
        match (self, event) {
            (_, ViewEvent::GoHome) => Self::Home,
            (_, ViewEvent::OpenRecordForm) => Self::RecordForm,
            (_, ViewEvent::OpenRecordList) => Self::RecordList,
            (_, ViewEvent::OpenCalendar { year, month }) => Self::Calendar { year, month },
            (_, ViewEvent::OpenStatistics) => Self::Statistics,
            (_, ViewEvent::OpenCsvUpload) => Self::CsvUpload,

            // The suggestion modal only layers over the record form.
            (Self::RecordForm, ViewEvent::OpenCategoryModal) => Self::CategoryModal,
            (Self::CategoryModal, ViewEvent::Confirm | ViewEvent::Cancel) => Self::RecordForm,

            // Edit and delete flows start from the list and return to it.
            (Self::RecordList, ViewEvent::StartEditing { record_id }) => {
                Self::Editing { record_id }
            }
            (Self::RecordList, ViewEvent::StartDeleting { record_id }) => {
                Self::Deleting { record_id }
            }
            (Self::Editing { .. } | Self::Deleting { .. }, ViewEvent::Confirm) => Self::RecordList,
            (Self::Editing { .. } | Self::Deleting { .. }, ViewEvent::Cancel) => Self::RecordList,

            (Self::Calendar { year, month }, ViewEvent::NextMonth) => {
                if month == 12 {
                    Self::Calendar { year: year + 1, month: 1 }
                } else {
                    Self::Calendar { year, month: month + 1 }
                }
            }
            (Self::Calendar { year, month }, ViewEvent::PrevMonth) => {
                if month == 1 {
                    Self::Calendar { year: year - 1, month: 12 }
                } else {
                    Self::Calendar { year, month: month - 1 }
                }
            }

            (state, _) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_home() {
        assert_eq!(ViewState::default(), ViewState::Home);
    }

    #[test]
    fn open_events_replace_the_active_screen() {
        let state = ViewState::Home
            .apply(ViewEvent::OpenRecordList)
            .apply(ViewEvent::OpenStatistics)
            .apply(ViewEvent::OpenCsvUpload);
        assert_eq!(state, ViewState::CsvUpload);
    }

    #[test]
    fn edit_flow_starts_and_ends_at_the_list() {
        let state = ViewState::RecordList
            .apply(ViewEvent::StartEditing { record_id: "rec-1".to_string() });
        assert_eq!(state, ViewState::Editing { record_id: "rec-1".to_string() });

        assert_eq!(state.clone().apply(ViewEvent::Confirm), ViewState::RecordList);
        assert_eq!(state.apply(ViewEvent::Cancel), ViewState::RecordList);
    }

    #[test]
    fn delete_flow_requires_the_list() {
        let state =
            ViewState::Home.apply(ViewEvent::StartDeleting { record_id: "rec-1".to_string() });
        assert_eq!(state, ViewState::Home);
    }

    #[test]
    fn category_modal_layers_over_the_form() {
        let state = ViewState::RecordForm.apply(ViewEvent::OpenCategoryModal);
        assert_eq!(state, ViewState::CategoryModal);
        assert_eq!(state.apply(ViewEvent::Cancel), ViewState::RecordForm);

        // Not reachable from anywhere else.
        assert_eq!(ViewState::Statistics.apply(ViewEvent::OpenCategoryModal), ViewState::Statistics);
    }

    #[test]
    fn calendar_months_wrap_at_year_boundaries() {
        let state = ViewState::Calendar { year: 2025, month: 12 }.apply(ViewEvent::NextMonth);
        assert_eq!(state, ViewState::Calendar { year: 2026, month: 1 });

        let state = ViewState::Calendar { year: 2025, month: 1 }.apply(ViewEvent::PrevMonth);
        assert_eq!(state, ViewState::Calendar { year: 2024, month: 12 });
    }

    #[test]
    fn month_navigation_is_ignored_outside_the_calendar() {
        assert_eq!(ViewState::Home.apply(ViewEvent::NextMonth), ViewState::Home);
    }

    #[test]
    fn go_home_works_from_anywhere() {
        let state = ViewState::Editing { record_id: "rec-1".to_string() };
        assert_eq!(state.apply(ViewEvent::GoHome), ViewState::Home);
    }
}
