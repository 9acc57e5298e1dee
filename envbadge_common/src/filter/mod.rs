pub mod badge_filter;
pub mod capture;
