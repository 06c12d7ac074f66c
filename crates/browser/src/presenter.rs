//! The presentation surface the session feeds.
//!
//! A presenter only draws; it never queries the catalog. Every dispatched
//! intent ends in exactly one of `render_list`, `render_detail`,
//! `render_empty` or `render_error`.

use model::{DetailRecord, QueryLabel};

pub trait Presenter {
    /// Show a page of recipe cards. `label` decides whether the summary
    /// line applies.
    fn render_list(&mut self, records: &[DetailRecord], label: &QueryLabel);

    /// Show one recipe in full.
    fn render_detail(&mut self, record: &DetailRecord);

    fn render_loading(&mut self);

    /// Nothing to show. The surface should offer a "show all" action.
    fn render_empty(&mut self, message: &str);

    /// A required call failed. The surface should offer a "try again" action.
    fn render_error(&mut self, message: &str);

    /// Informational banner shown above a list, e.g. when related recipes
    /// stand in for an exact match.
    fn render_notice(&mut self, message: &str);
}
