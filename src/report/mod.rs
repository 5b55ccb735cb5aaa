pub mod cost_plot;
pub mod table;
pub mod tour_plot;
