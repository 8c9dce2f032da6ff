pub mod month_view;
pub mod theme;
