mod game_vm;
mod menu_vm;
mod result_vm;
mod screen;
mod subject_vm;
mod time_fmt;

pub use game_vm::{GameVm, NavCellVm, NavStatus, OptionVm};
pub use menu_vm::{CountChoiceVm, MenuVm, TopicChoiceVm, count_choices};
pub use result_vm::{Praise, ResultVm, ReviewRowVm};
pub use screen::Screen;
pub use subject_vm::{SubjectCardVm, map_subject_cards};
pub use time_fmt::format_datetime;
