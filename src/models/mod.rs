//! Task selection domain models.
//!
//! | u-taskpick | Coursework | Operations | Backlog |
//! |------------|------------|------------|---------|
//! | Task | Assignment | Work order | Ticket |
//! | Budget | Free hours | Crew shifts | Sprint slots |
//! | ScheduleResult | Study plan | Shift plan | Sprint scope |

mod result;
mod task;

pub use result::ScheduleResult;
pub use task::Task;
