mod grid;
mod planner;
mod widget;
pub(crate) use self::planner::Planner;
pub(crate) use self::widget::MonthView;
