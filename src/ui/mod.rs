pub mod chart_panel;
pub mod chart_utils;
pub mod dashboard;
pub mod news_panel;
pub mod prediction_panel;
pub mod search_bar;
