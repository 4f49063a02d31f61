//! Report suppression and the settings applied once at startup.
//!
//! Neither of these is an algorithm: the hidden report names and the staff
//! visibility toggle come from the [`PolicyTable`] and are pushed into the
//! host once, or consulted when a report listing is assembled.

use crate::{
    capability::{can_see_pii, Caller},
    policy::PolicyTable,
};

/// Separator the host expects between hidden report names.
pub const REPORT_SEPARATOR: &str = "|";

/// The host settings this crate configures at startup.
pub trait SiteSettings {
    /// Whether staff below full admin may see raw contact fields.
    fn set_moderators_view_emails(&mut self, allowed: bool);

    /// Report names hidden from the dashboard, joined by [`REPORT_SEPARATOR`].
    fn set_dashboard_hidden_reports(&mut self, reports: &str);
}

/// Pushes the policy's startup settings into the host.
///
/// Call once during initialization, after the policy table is built.
pub fn apply_startup_settings<T>(policy: &PolicyTable, settings: &mut T)
where
    T: SiteSettings + ?Sized,
{
    settings.set_moderators_view_emails(policy.moderators_view_emails());
    let hidden = policy
        .hidden_reports()
        .collect::<Vec<_>>()
        .join(REPORT_SEPARATOR);
    settings.set_dashboard_hidden_reports(&hidden);
}

/// Filters a report listing for `caller`.
///
/// Privileged callers see every report. Everyone else loses the policy's
/// hidden reports; the order of the remaining names is kept.
pub fn visible_reports<'r, I, C>(
    policy: &PolicyTable,
    reports: I,
    caller: Option<&C>,
) -> Vec<&'r str>
where
    I: IntoIterator<Item = &'r str>,
    C: Caller + ?Sized,
{
    let privileged = can_see_pii(caller);
    reports
        .into_iter()
        .filter(|report| privileged || !policy.is_report_hidden(report))
        .collect()
}
